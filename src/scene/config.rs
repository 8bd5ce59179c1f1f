use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use crate::foundation::core::Millis;
use crate::foundation::error::{SceneError, SceneResult};

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
/// User-editable scene settings read by every render path.
///
/// Durations are read once when a fold sequence starts; editing them afterwards only
/// affects the next sequence.
pub struct SceneConfig {
    /// Length of each fold step in milliseconds.
    #[serde(default = "default_fold_duration")]
    pub fold_duration: Millis,
    /// Length of one page turn in milliseconds.
    #[serde(default = "default_turn_duration")]
    pub turn_duration: Millis,
    /// Master volume in `[0, 1]`.
    #[serde(default = "default_volume")]
    pub volume: f64,
    /// Silences every cue when `true`.
    #[serde(default)]
    pub is_muted: bool,
    /// Paper background as `#rrggbb`.
    #[serde(default = "default_paper_color")]
    pub paper_color: String,
    /// Brightness multiplier applied to the whole stage.
    #[serde(default = "default_lighting")]
    pub lighting: f64,
    /// Typeface family used for headline and body treatments.
    #[serde(default)]
    pub font_style: FontStyle,
    /// Masthead printed on the cover.
    #[serde(default = "default_publication_title")]
    pub publication_title: String,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
/// Typeface family for page text.
pub enum FontStyle {
    /// Serif newspaper type.
    #[default]
    Classic,
    /// Monospace type with tightened tracking.
    Typewriter,
    /// Sans-serif type.
    Modern,
}

fn default_fold_duration() -> Millis {
    Millis(1000)
}

fn default_turn_duration() -> Millis {
    Millis(1000)
}

fn default_volume() -> f64 {
    0.3
}

fn default_paper_color() -> String {
    "#f4f1ea".to_string()
}

fn default_lighting() -> f64 {
    1.0
}

fn default_publication_title() -> String {
    "THE DAILY FOLD".to_string()
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            fold_duration: default_fold_duration(),
            turn_duration: default_turn_duration(),
            volume: default_volume(),
            is_muted: false,
            paper_color: default_paper_color(),
            lighting: default_lighting(),
            font_style: FontStyle::default(),
            publication_title: default_publication_title(),
        }
    }
}

const DURATION_RANGE_MS: std::ops::RangeInclusive<u64> = 100..=10_000;

impl SceneConfig {
    /// Parse a config from a JSON reader. Missing fields take their defaults.
    pub fn from_reader<R: std::io::Read>(r: R) -> SceneResult<Self> {
        let cfg: SceneConfig = serde_json::from_reader(r)
            .map_err(|e| SceneError::validation(format!("parse scene config JSON: {e}")))?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Parse a config from a JSON file on disk.
    pub fn from_path(path: impl AsRef<Path>) -> SceneResult<Self> {
        let path = path.as_ref();
        let f = File::open(path).map_err(|e| {
            SceneError::validation(format!("open scene config JSON '{}': {e}", path.display()))
        })?;
        Self::from_reader(BufReader::new(f))
    }

    pub fn validate(&self) -> SceneResult<()> {
        for (name, value) in [
            ("foldDuration", self.fold_duration),
            ("turnDuration", self.turn_duration),
        ] {
            if !DURATION_RANGE_MS.contains(&value.0) {
                return Err(SceneError::validation(format!(
                    "{name} must be within {}..={} ms, got {}",
                    DURATION_RANGE_MS.start(),
                    DURATION_RANGE_MS.end(),
                    value.0
                )));
            }
        }
        if !self.volume.is_finite() || !(0.0..=1.0).contains(&self.volume) {
            return Err(SceneError::validation("volume must be finite and in [0, 1]"));
        }
        if !self.lighting.is_finite() || self.lighting <= 0.0 {
            return Err(SceneError::validation("lighting must be finite and > 0"));
        }
        parse_hex_rgb(&self.paper_color)?;
        Ok(())
    }

    /// Whether cues should be synthesized at all.
    pub fn is_audible(&self) -> bool {
        !self.is_muted && self.volume > 0.0
    }

    /// Paper color as RGB bytes.
    pub fn paper_rgb(&self) -> SceneResult<[u8; 3]> {
        parse_hex_rgb(&self.paper_color)
    }
}

/// Parse `#rrggbb` into RGB bytes.
pub fn parse_hex_rgb(s: &str) -> SceneResult<[u8; 3]> {
    let hex = s
        .strip_prefix('#')
        .filter(|h| h.len() == 6 && h.bytes().all(|b| b.is_ascii_hexdigit()))
        .ok_or_else(|| SceneError::validation(format!("color must be #rrggbb, got '{s}'")))?;
    let channel = |i: usize| {
        u8::from_str_radix(&hex[i..i + 2], 16)
            .map_err(|e| SceneError::validation(format!("color channel in '{s}': {e}")))
    };
    Ok([channel(0)?, channel(2)?, channel(4)?])
}

#[cfg(test)]
#[path = "../../tests/unit/scene/config.rs"]
mod tests;
