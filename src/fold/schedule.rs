use crate::foundation::core::Millis;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerId(pub u64);

#[derive(Clone, Debug)]
struct Entry<T> {
    id: TimerId,
    due: Millis,
    payload: T,
}

/// One-shot timers on a virtual clock owned by the host.
///
/// Timers due at the same instant fire in the order they were scheduled.
#[derive(Clone, Debug)]
pub struct Timers<T> {
    now: Millis,
    next_id: u64,
    entries: Vec<Entry<T>>,
}

impl<T> Default for Timers<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Timers<T> {
    pub fn new() -> Self {
        Self {
            now: Millis::ZERO,
            next_id: 0,
            entries: Vec::new(),
        }
    }

    pub fn now(&self) -> Millis {
        self.now
    }

    /// Fire `payload` once, `delay` after the current clock.
    pub fn schedule(&mut self, delay: Millis, payload: T) -> TimerId {
        let due = self.now.saturating_add(delay);
        let id = TimerId(self.next_id);
        self.next_id += 1;
        // Ids increase monotonically, so (due, id) is the firing order.
        let pos = self.entries.partition_point(|e| e.due <= due);
        self.entries.insert(pos, Entry { id, due, payload });
        id
    }

    pub fn cancel(&mut self, id: TimerId) -> bool {
        let before = self.entries.len();
        self.entries.retain(|e| e.id != id);
        self.entries.len() != before
    }

    /// Drop every pending timer. Returns how many were cancelled.
    pub fn clear(&mut self) -> usize {
        let n = self.entries.len();
        self.entries.clear();
        n
    }

    pub fn pending(&self) -> usize {
        self.entries.len()
    }

    pub fn is_idle(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn next_due(&self) -> Option<Millis> {
        self.entries.first().map(|e| e.due)
    }

    /// Pop the earliest timer due at or before `until`, moving the clock to its due time.
    ///
    /// Timers scheduled by the caller between pops are picked up by later pops.
    pub fn pop_due(&mut self, until: Millis) -> Option<(Millis, T)> {
        if self.entries.first().is_none_or(|e| e.due > until) {
            return None;
        }
        let entry = self.entries.remove(0);
        self.now = self.now.max(entry.due);
        Some((entry.due, entry.payload))
    }

    /// Run the clock forward to `until`, returning every timer that fired, in order.
    /// The clock never runs backwards.
    pub fn advance_to(&mut self, until: Millis) -> Vec<(Millis, T)> {
        let mut fired = Vec::new();
        while let Some(hit) = self.pop_due(until) {
            fired.push(hit);
        }
        self.settle(until);
        fired
    }

    /// Move the clock to `until` without firing anything.
    pub fn settle(&mut self, until: Millis) {
        self.now = self.now.max(until);
    }
}

#[cfg(test)]
#[path = "../../tests/unit/fold/schedule.rs"]
mod tests;
