use std::path::Path;

use crate::foundation::core::Millis;
use crate::foundation::error::{SceneError, SceneResult};
use crate::foundation::rng::Rng64;
use crate::scene::config::SceneConfig;

pub const SYNTH_SAMPLE_RATE: u32 = 48_000;

/// Exponential ramps stop at this level instead of zero.
const EXP_RAMP_FLOOR: f64 = 0.001;

const FILTER_Q: f64 = 1.0;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
/// Named paper sound effect.
pub enum Cue {
    /// Page turn / whoosh.
    Turn,
    /// Paper being handled.
    Rustle,
    /// Crease being pressed.
    Fold,
    /// Paper landing.
    Thud,
    /// Paper crumpled into a ball.
    Crunch,
}

impl Cue {
    pub const ALL: [Cue; 5] = [Cue::Turn, Cue::Rustle, Cue::Fold, Cue::Thud, Cue::Crunch];

    pub fn name(self) -> &'static str {
        match self {
            Self::Turn => "turn",
            Self::Rustle => "rustle",
            Self::Fold => "fold",
            Self::Thud => "thud",
            Self::Crunch => "crunch",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.name() == s)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
pub enum FilterKind {
    HighPass,
    BandPass,
    LowPass,
}

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
/// Gain ramp applied over the burst, starting at [`CueSpec::start_gain`].
pub enum Envelope {
    /// Exponential decay to 0.001 at `target_secs`, held afterwards.
    Exponential { target_secs: f64 },
    /// Linear decay to 0 at `target_secs`, held afterwards.
    Linear { target_secs: f64 },
}

impl Envelope {
    pub fn gain_at(self, start_gain: f64, t: f64) -> f64 {
        match self {
            Self::Exponential { target_secs } => {
                if target_secs <= 0.0 || t >= target_secs {
                    EXP_RAMP_FLOOR
                } else {
                    start_gain * (EXP_RAMP_FLOOR / start_gain).powf(t / target_secs)
                }
            }
            Self::Linear { target_secs } => {
                if target_secs <= 0.0 || t >= target_secs {
                    0.0
                } else {
                    start_gain * (1.0 - t / target_secs)
                }
            }
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
/// Synthesis recipe for one cue.
pub struct CueSpec {
    /// Noise buffer length.
    pub length_secs: f64,
    pub filter: FilterKind,
    pub cutoff_hz: f64,
    pub start_gain: f64,
    pub envelope: Envelope,
}

impl CueSpec {
    /// Recipe for `cue`. The turn whoosh decays over 30% of the configured turn time.
    pub fn for_cue(cue: Cue, turn_duration: Millis) -> Self {
        match cue {
            Cue::Turn => Self {
                length_secs: 0.5,
                filter: FilterKind::HighPass,
                cutoff_hz: 1200.0,
                start_gain: 0.05,
                envelope: Envelope::Exponential {
                    target_secs: turn_duration.as_secs_f64() * 0.3,
                },
            },
            Cue::Rustle => Self {
                length_secs: 1.0,
                filter: FilterKind::BandPass,
                cutoff_hz: 800.0,
                start_gain: 0.05,
                envelope: Envelope::Linear { target_secs: 0.8 },
            },
            Cue::Fold => Self {
                length_secs: 1.0,
                filter: FilterKind::LowPass,
                cutoff_hz: 800.0,
                start_gain: 0.08,
                envelope: Envelope::Exponential { target_secs: 0.6 },
            },
            Cue::Thud => Self {
                length_secs: 0.5,
                filter: FilterKind::LowPass,
                cutoff_hz: 150.0,
                start_gain: 0.4,
                envelope: Envelope::Exponential { target_secs: 0.2 },
            },
            Cue::Crunch => Self {
                length_secs: 1.5,
                filter: FilterKind::HighPass,
                cutoff_hz: 400.0,
                start_gain: 0.1,
                envelope: Envelope::Exponential { target_secs: 1.2 },
            },
        }
    }

    pub fn sample_count(&self, sample_rate: u32) -> usize {
        (self.length_secs * f64::from(sample_rate)).round() as usize
    }
}

/// Second-order IIR section (RBJ cookbook coefficients, direct form I).
#[derive(Clone, Copy, Debug)]
pub struct Biquad {
    b0: f64,
    b1: f64,
    b2: f64,
    a1: f64,
    a2: f64,
    x1: f64,
    x2: f64,
    y1: f64,
    y2: f64,
}

impl Biquad {
    pub fn new(kind: FilterKind, cutoff_hz: f64, q: f64, sample_rate: u32) -> Self {
        let nyquist = f64::from(sample_rate) / 2.0;
        let f0 = cutoff_hz.clamp(1.0, nyquist * 0.999);
        let w0 = std::f64::consts::TAU * f0 / f64::from(sample_rate);
        let (sin_w0, cos_w0) = w0.sin_cos();
        let alpha = sin_w0 / (2.0 * q.max(1e-6));

        let (b0, b1, b2) = match kind {
            FilterKind::LowPass => ((1.0 - cos_w0) / 2.0, 1.0 - cos_w0, (1.0 - cos_w0) / 2.0),
            FilterKind::HighPass => ((1.0 + cos_w0) / 2.0, -(1.0 + cos_w0), (1.0 + cos_w0) / 2.0),
            FilterKind::BandPass => (alpha, 0.0, -alpha),
        };
        let a0 = 1.0 + alpha;
        let a1 = -2.0 * cos_w0;
        let a2 = 1.0 - alpha;

        Self {
            b0: b0 / a0,
            b1: b1 / a0,
            b2: b2 / a0,
            a1: a1 / a0,
            a2: a2 / a0,
            x1: 0.0,
            x2: 0.0,
            y1: 0.0,
            y2: 0.0,
        }
    }

    pub fn process(&mut self, x: f64) -> f64 {
        let y = self.b0 * x + self.b1 * self.x1 + self.b2 * self.x2 - self.a1 * self.y1 - self.a2 * self.y2;
        self.x2 = self.x1;
        self.x1 = x;
        self.y2 = self.y1;
        self.y1 = y;
        y
    }
}

#[derive(Clone, Debug, PartialEq)]
/// A synthesized mono burst ready for an output device.
pub struct SoundBurst {
    pub cue: Cue,
    pub sample_rate: u32,
    pub samples: Vec<f32>,
}

impl SoundBurst {
    pub fn duration_secs(&self) -> f64 {
        (self.samples.len() as f64) / f64::from(self.sample_rate)
    }

    pub fn peak(&self) -> f32 {
        self.samples.iter().fold(0.0f32, |m, s| m.max(s.abs()))
    }
}

/// Filtered white noise shaped by the cue's envelope and scaled by the master volume.
pub fn synthesize(cue: Cue, config: &SceneConfig, rng: &mut Rng64, sample_rate: u32) -> SoundBurst {
    let spec = CueSpec::for_cue(cue, config.turn_duration);
    let n = spec.sample_count(sample_rate);
    let mut filter = Biquad::new(spec.filter, spec.cutoff_hz, FILTER_Q, sample_rate);
    let master = config.volume.clamp(0.0, 1.0);

    let mut samples = Vec::with_capacity(n);
    for i in 0..n {
        let t = (i as f64) / f64::from(sample_rate);
        let filtered = filter.process(f64::from(rng.next_signed()));
        let gain = spec.envelope.gain_at(spec.start_gain, t) * master;
        samples.push(((filtered * gain) as f32).clamp(-1.0, 1.0));
    }

    SoundBurst {
        cue,
        sample_rate,
        samples,
    }
}

/// Write raw little-endian f32 samples, creating parent directories as needed.
pub fn write_burst_to_f32le_file(burst: &SoundBurst, out_path: &Path) -> SceneResult<()> {
    if let Some(parent) = out_path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| {
            SceneError::audio(format!(
                "failed to create cue output directory '{}': {e}",
                parent.display()
            ))
        })?;
    }

    let mut bytes = Vec::<u8>::with_capacity(burst.samples.len() * 4);
    for &sample in &burst.samples {
        bytes.extend_from_slice(&sample.to_le_bytes());
    }
    std::fs::write(out_path, bytes).map_err(|e| {
        SceneError::audio(format!(
            "failed to write cue file '{}': {e}",
            out_path.display()
        ))
    })
}

#[cfg(test)]
#[path = "../../tests/unit/audio/synth.rs"]
mod tests;
