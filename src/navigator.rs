/// Sheets in the demo book: cover, two interior leaves and the back.
pub const DEFAULT_TOTAL_SHEETS: usize = 3;

/// Horizontal shift of the book while only the cover is showing.
const COVER_OFFSET_X: f64 = -200.0;
/// Depth step between stacked sheets, in pixels.
const SHEET_DEPTH_STEP: f64 = 5.0;

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
/// Placement of one physical sheet in the open book.
pub struct SheetPose {
    /// Y rotation about the spine: `-180` once turned, `0` before.
    pub rotate_y_deg: f64,
    /// Lift off the back cover so stacked sheets do not z-fight.
    pub depth: f64,
    /// Paint order; higher draws on top.
    pub paint_order: i32,
}

/// Spread index of the book, `0` (cover) to `total_sheets` (back).
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
pub struct Navigator {
    position: usize,
    total_sheets: usize,
}

impl Default for Navigator {
    fn default() -> Self {
        Self::new(DEFAULT_TOTAL_SHEETS)
    }
}

impl Navigator {
    pub fn new(total_sheets: usize) -> Self {
        Self {
            position: 0,
            total_sheets,
        }
    }

    pub fn position(&self) -> usize {
        self.position
    }

    pub fn total_sheets(&self) -> usize {
        self.total_sheets
    }

    pub fn can_next(&self) -> bool {
        self.position < self.total_sheets
    }

    pub fn can_prev(&self) -> bool {
        self.position > 0
    }

    /// Turn forward one sheet. Returns `false` at the back cover.
    pub fn next(&mut self) -> bool {
        if !self.can_next() {
            return false;
        }
        self.position += 1;
        true
    }

    /// Turn back one sheet. Returns `false` at the front cover.
    pub fn prev(&mut self) -> bool {
        if !self.can_prev() {
            return false;
        }
        self.position -= 1;
        true
    }

    /// Close back to the cover. Returns `false` if already there.
    pub fn rewind(&mut self) -> bool {
        if self.position == 0 {
            return false;
        }
        self.position = 0;
        true
    }

    /// Pose of `sheet` (`0` is the cover leaf) at the current position.
    pub fn sheet_pose(&self, sheet: usize) -> SheetPose {
        let flipped = self.position > sheet;
        let sheet_i = i32::try_from(sheet).unwrap_or(i32::MAX);
        SheetPose {
            rotate_y_deg: if flipped { -180.0 } else { 0.0 },
            depth: SHEET_DEPTH_STEP * (self.total_sheets.saturating_sub(sheet) as f64),
            paint_order: if flipped { sheet_i } else { 100i32.saturating_sub(sheet_i) },
        }
    }

    /// The closed book sits centered on its spine; open spreads are centered on the fold.
    pub fn book_offset_x(&self) -> f64 {
        if self.position == 0 { COVER_OFFSET_X } else { 0.0 }
    }
}

#[cfg(test)]
#[path = "../tests/unit/navigator/navigator.rs"]
mod tests;
