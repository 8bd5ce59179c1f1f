use std::sync::{Arc, Mutex};

use crate::audio::synth::{Cue, SYNTH_SAMPLE_RATE, SoundBurst, synthesize};
use crate::foundation::rng::Rng64;
use crate::scene::config::SceneConfig;

/// Output device for synthesized bursts. Each call plays one burst once;
/// overlapping bursts layer.
pub trait AudioSink {
    fn play(&mut self, burst: SoundBurst) -> anyhow::Result<()>;
}

/// Opens the host's output device on first use.
pub type SinkOpener = Box<dyn FnMut() -> anyhow::Result<Box<dyn AudioSink>>>;

enum Device {
    Closed,
    Open(Box<dyn AudioSink>),
    Unavailable,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize)]
pub struct AudioStats {
    /// Cues requested while audible.
    pub requested: u64,
    /// Noise buffers synthesized.
    pub synthesized: u64,
    /// Bursts the sink refused.
    pub dropped: u64,
}

/// Per-scene sound service. Muted scenes and hosts without a sound device are silent.
pub struct AudioEngine {
    opener: Option<SinkOpener>,
    device: Device,
    rng: Rng64,
    sample_rate: u32,
    stats: AudioStats,
}

impl std::fmt::Debug for AudioEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let device = match self.device {
            Device::Closed => "closed",
            Device::Open(_) => "open",
            Device::Unavailable => "unavailable",
        };
        f.debug_struct("AudioEngine")
            .field("device", &device)
            .field("sample_rate", &self.sample_rate)
            .field("stats", &self.stats)
            .finish()
    }
}

const DEFAULT_NOISE_SEED: u64 = 0x5EED_0F_7A9E;

impl AudioEngine {
    /// Engine that opens its device lazily through `opener`.
    pub fn new(opener: impl FnMut() -> anyhow::Result<Box<dyn AudioSink>> + 'static) -> Self {
        Self {
            opener: Some(Box::new(opener)),
            device: Device::Closed,
            rng: Rng64::new(DEFAULT_NOISE_SEED),
            sample_rate: SYNTH_SAMPLE_RATE,
            stats: AudioStats::default(),
        }
    }

    /// Engine for a host without any sound subsystem.
    pub fn unavailable() -> Self {
        Self {
            opener: None,
            device: Device::Unavailable,
            rng: Rng64::new(DEFAULT_NOISE_SEED),
            sample_rate: SYNTH_SAMPLE_RATE,
            stats: AudioStats::default(),
        }
    }

    /// Engine writing into a shared [`MemorySink`].
    pub fn with_memory_sink(sink: MemorySink) -> Self {
        Self::new(move || Ok(Box::new(sink.clone()) as Box<dyn AudioSink>))
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = Rng64::new(seed);
        self
    }

    pub fn with_sample_rate(mut self, sample_rate: u32) -> Self {
        self.sample_rate = sample_rate.max(1);
        self
    }

    pub fn stats(&self) -> AudioStats {
        self.stats
    }

    pub fn is_available(&self) -> bool {
        !matches!(self.device, Device::Unavailable)
    }

    /// Synthesize and play `cue`. Returns `true` if a burst reached the device.
    pub fn play(&mut self, cue: Cue, config: &SceneConfig) -> bool {
        if !config.is_audible() {
            return false;
        }
        self.stats.requested += 1;

        if matches!(self.device, Device::Closed) {
            self.device = match self.opener.as_mut().map(|open| open()) {
                Some(Ok(sink)) => Device::Open(sink),
                Some(Err(err)) => {
                    tracing::warn!(error = %err, "audio device unavailable; cues are silent");
                    Device::Unavailable
                }
                None => Device::Unavailable,
            };
        }
        let Device::Open(sink) = &mut self.device else {
            return false;
        };

        let burst = synthesize(cue, config, &mut self.rng, self.sample_rate);
        self.stats.synthesized += 1;
        tracing::debug!(cue = cue.name(), samples = burst.samples.len(), "play cue");
        match sink.play(burst) {
            Ok(()) => true,
            Err(err) => {
                self.stats.dropped += 1;
                tracing::warn!(cue = cue.name(), error = %err, "audio sink dropped cue");
                false
            }
        }
    }

    /// Close the device. A later audible cue reopens it.
    pub fn shutdown(&mut self) {
        if matches!(self.device, Device::Open(_)) {
            self.device = Device::Closed;
        }
    }
}

/// Sink that keeps every burst in memory; clones share storage.
#[derive(Clone, Debug, Default)]
pub struct MemorySink {
    bursts: Arc<Mutex<Vec<SoundBurst>>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn bursts(&self) -> Vec<SoundBurst> {
        match self.bursts.lock() {
            Ok(g) => g.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    pub fn cues(&self) -> Vec<Cue> {
        self.bursts().into_iter().map(|b| b.cue).collect()
    }

    pub fn len(&self) -> usize {
        match self.bursts.lock() {
            Ok(g) => g.len(),
            Err(poisoned) => poisoned.into_inner().len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl AudioSink for MemorySink {
    fn play(&mut self, burst: SoundBurst) -> anyhow::Result<()> {
        self.bursts
            .lock()
            .map_err(|_| anyhow::anyhow!("memory sink lock poisoned"))?
            .push(burst);
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/audio/engine.rs"]
mod tests;
