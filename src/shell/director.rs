use crate::foundation::error::{SceneError, SceneResult};
use crate::scene::config::parse_hex_rgb;

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Speed {
    Slow,
    Medium,
    Fast,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Shape {
    Circle,
    Square,
    Line,
}

#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
/// Abstract composition a director backend derives from a free-form scene prompt.
pub struct DirectorParams {
    pub primary_color: String,
    pub secondary_color: String,
    pub accent_color: String,
    pub animation_speed: Speed,
    pub shape: Shape,
    pub mood_description: String,
}

impl DirectorParams {
    pub fn validate(&self) -> SceneResult<()> {
        for (name, color) in [
            ("primaryColor", &self.primary_color),
            ("secondaryColor", &self.secondary_color),
            ("accentColor", &self.accent_color),
        ] {
            parse_hex_rgb(color).map_err(|_| SceneError::validation(format!("{name} must be #rrggbb, got '{color}'")))?;
        }
        Ok(())
    }
}

/// Parse and validate a backend's JSON answer.
pub fn parse_director_response(text: &str) -> SceneResult<DirectorParams> {
    let params: DirectorParams =
        serde_json::from_str(text).map_err(|e| SceneError::serde(format!("director response: {e}")))?;
    params.validate()?;
    Ok(params)
}

#[derive(thiserror::Error, Debug)]
pub enum DirectorError {
    /// The backend could not be reached or refused the request.
    #[error("director transport error: {0}")]
    Transport(String),
    /// The backend answered with something that is not a valid parameter set.
    #[error("director response rejected: {0}")]
    Rejected(#[from] SceneError),
}

/// Generative backend that turns a prompt into [`DirectorParams`].
///
/// `Ok(None)` means the backend answered without a result; `Err` is a failure the UI
/// reports differently.
pub trait Director {
    fn direct(&mut self, prompt: &str) -> Result<Option<DirectorParams>, DirectorError>;
}

/// Interpret a raw backend body: empty bodies are "no result", anything else must parse.
pub fn interpret_response(body: Option<&str>) -> Result<Option<DirectorParams>, DirectorError> {
    match body.map(str::trim).filter(|b| !b.is_empty()) {
        None => Ok(None),
        Some(text) => Ok(Some(parse_director_response(text)?)),
    }
}

#[cfg(test)]
#[path = "../../tests/unit/shell/director.rs"]
mod tests;
