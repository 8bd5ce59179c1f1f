use crate::document::model::{ElementBox, ElementPatch, MIN_ELEMENT_SIZE};
use crate::foundation::core::{Point, Vec2};
use crate::foundation::error::{SceneError, SceneResult};

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
/// What a pointer drag does to the element box.
pub enum GestureMode {
    /// Translate the box.
    Move,
    /// Grow/shrink the box from its bottom-right corner.
    Resize,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
/// Which part of an element the pointer went down on.
pub enum HitTarget {
    /// Element body: move gesture in edit mode, link activation otherwise.
    Body,
    /// Bottom-right resize handle (edit mode only).
    ResizeHandle,
    /// Delete affordance (edit mode only).
    DeleteButton,
}

/// A single drag in progress.
///
/// The scene scale is captured when the gesture begins, so a viewport resize
/// mid-drag cannot skew the math of an in-flight gesture.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DragGesture {
    mode: GestureMode,
    start_pointer: Point,
    start_box: ElementBox,
    scale: f64,
}

impl DragGesture {
    pub fn begin(mode: GestureMode, start_pointer: Point, start_box: ElementBox, scale: f64) -> SceneResult<Self> {
        if !scale.is_finite() || scale <= 0.0 {
            return Err(SceneError::validation(format!(
                "gesture scale must be finite and > 0, got {scale}"
            )));
        }
        Ok(Self {
            mode,
            start_pointer,
            start_box,
            scale,
        })
    }

    pub fn mode(&self) -> GestureMode {
        self.mode
    }

    pub fn scale(&self) -> f64 {
        self.scale
    }

    /// Pointer displacement converted from viewport pixels to page units.
    pub fn document_delta(&self, pointer: Point) -> Vec2 {
        let raw = pointer - self.start_pointer;
        Vec2::new(raw.x / self.scale, raw.y / self.scale)
    }

    /// Patch that brings the element to where the pointer now puts it.
    pub fn patch_for(&self, pointer: Point) -> ElementPatch {
        let d = self.document_delta(pointer);
        match self.mode {
            GestureMode::Move => {
                ElementPatch::position(self.start_box.x + d.x, self.start_box.y + d.y)
            }
            GestureMode::Resize => ElementPatch::size(
                (self.start_box.w + d.x).max(MIN_ELEMENT_SIZE),
                (self.start_box.h + d.y).max(MIN_ELEMENT_SIZE),
            ),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
/// The gesture currently holding pointer capture, and what it edits.
pub struct ActiveGesture {
    pub page_index: usize,
    pub element_id: String,
    pub gesture: DragGesture,
}

/// Pointer-capture owner for one scene. At most one gesture is active at a time.
#[derive(Debug, Default)]
pub struct Interaction {
    active: Option<ActiveGesture>,
}

impl Interaction {
    pub fn active(&self) -> Option<&ActiveGesture> {
        self.active.as_ref()
    }

    pub fn is_dragging(&self) -> bool {
        self.active.is_some()
    }

    /// Take pointer capture. A gesture that is still active is replaced.
    pub fn capture(&mut self, page_index: usize, element_id: impl Into<String>, gesture: DragGesture) {
        self.active = Some(ActiveGesture {
            page_index,
            element_id: element_id.into(),
            gesture,
        });
    }

    /// Patch for the captured element, if a gesture is active.
    pub fn track(&self, pointer: Point) -> Option<(usize, &str, ElementPatch)> {
        self.active.as_ref().map(|a| {
            (
                a.page_index,
                a.element_id.as_str(),
                a.gesture.patch_for(pointer),
            )
        })
    }

    /// End the active gesture. No snapping or rounding is applied.
    pub fn release(&mut self) -> Option<ActiveGesture> {
        self.active.take()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/interaction/gesture.rs"]
mod tests;
