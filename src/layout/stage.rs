use crate::foundation::error::{SceneError, SceneResult};

/// Fits the fixed-size stage into a host viewport with one uniform scale.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct StageFit {
    /// Content box width the stage needs, in unscaled pixels.
    pub stage_width: f64,
    /// Content box height the stage needs, in unscaled pixels.
    pub stage_height: f64,
    /// Vertical space reserved above/below the stage.
    pub vertical_gap: f64,
    /// Lower bound so the stage never collapses to nothing.
    pub min_scale: f64,
}

impl Default for StageFit {
    fn default() -> Self {
        Self {
            stage_width: 950.0,
            stage_height: 510.0,
            vertical_gap: 10.0,
            min_scale: 0.2,
        }
    }
}

impl StageFit {
    pub fn validate(&self) -> SceneResult<()> {
        for (name, v) in [
            ("stage_width", self.stage_width),
            ("stage_height", self.stage_height),
            ("min_scale", self.min_scale),
        ] {
            if !v.is_finite() || v <= 0.0 {
                return Err(SceneError::validation(format!("{name} must be finite and > 0")));
            }
        }
        if !self.vertical_gap.is_finite() || self.vertical_gap < 0.0 {
            return Err(SceneError::validation("vertical_gap must be finite and >= 0"));
        }
        Ok(())
    }

    /// `min(w / stage_w, (h - gap) / stage_h)`, floored at `min_scale`.
    pub fn scale_for(&self, viewport_width: f64, viewport_height: f64) -> f64 {
        let avail_w = viewport_width.max(0.0);
        let avail_h = (viewport_height - self.vertical_gap).max(0.0);
        let scale = (avail_w / self.stage_width).min(avail_h / self.stage_height);
        if scale.is_finite() {
            scale.max(self.min_scale)
        } else {
            self.min_scale
        }
    }
}

/// Height of the resizable control panel under the stage.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct PanelSplit {
    pub panel_height: f64,
    pub min_panel_height: f64,
    /// Space always left to the stage above the panel.
    pub min_stage_height: f64,
}

impl Default for PanelSplit {
    fn default() -> Self {
        Self {
            panel_height: 350.0,
            min_panel_height: 150.0,
            min_stage_height: 100.0,
        }
    }
}

impl PanelSplit {
    /// Move the divider to `pointer_y` inside a container spanning
    /// `[container_top, container_top + container_height]`. Returns the new panel height.
    pub fn drag_divider(&mut self, container_top: f64, container_height: f64, pointer_y: f64) -> f64 {
        let container_bottom = container_top + container_height;
        let wanted = container_bottom - pointer_y;
        let max = (container_height - self.min_stage_height).max(self.min_panel_height);
        self.panel_height = wanted.clamp(self.min_panel_height, max);
        self.panel_height
    }

    /// Height left for the stage viewport.
    pub fn stage_height(&self, container_height: f64) -> f64 {
        (container_height - self.panel_height).max(0.0)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/layout/stage.rs"]
mod tests;
