use crate::foundation::core::{Millis, Pose3, Vec2};
use crate::fold::phase::{AirplanePhase, BallPhase, DinoPhase, FoldPhase, TablePhase};
use crate::scene::config::SceneConfig;

/// How long the airplane takes to leave the stage.
pub const FLIGHT_DURATION: Millis = Millis(4000);
/// How long the crumpled ball takes to reach the bin.
pub const TOSS_DURATION: Millis = Millis(1000);

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
/// Stage geometry for one phase, ready for a renderer to interpolate toward.
pub struct FoldVisual {
    /// Whole-stage brightness multiplier.
    pub brightness: f64,
    /// Time the renderer should take to reach this geometry.
    pub transition: Millis,
    pub shape: FoldShape,
}

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub enum FoldShape {
    /// Open or closed book, drawn from the navigator's sheet poses.
    Book { closed: bool },
    Airplane(AirplaneVisual),
    Ball(BallVisual),
    Dino(DinoVisual),
    Table(TableVisual),
}

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
/// Left/right halves mirror each other; angles are given for the right half.
pub struct AirplaneVisual {
    /// X rotation of the dog-eared corner about its diagonal.
    pub corner_fold_deg: f64,
    pub corner_opacity: f64,
    /// Y rotation of each half about the spine.
    pub spine_deg: f64,
    /// Y rotation of each wing about its inner edge.
    pub wing_deg: f64,
    /// Opacity of the shading on folded wings.
    pub wing_shade: f64,
    pub flight: FlightPose,
}

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
/// Airplane placement. Planar offset is a fraction of the viewport; depth is in pixels.
pub struct FlightPose {
    pub viewport_offset: Vec2,
    pub depth: f64,
    pub rotate_deg: [f64; 3],
}

impl FlightPose {
    pub const GROUNDED: Self = Self {
        viewport_offset: Vec2::new(0.0, 0.0),
        depth: 0.0,
        rotate_deg: [0.0, 0.0, 0.0],
    };

    pub const AWAY: Self = Self {
        viewport_offset: Vec2::new(1.5, -0.4),
        depth: -1500.0,
        rotate_deg: [-15.0, 30.0, 10.0],
    };
}

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct BallVisual {
    pub pose: Pose3,
    /// Transform of the page texture inside the ball.
    pub texture: Pose3,
    pub crease_opacity: f64,
}

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct DinoVisual {
    pub pose: Pose3,
    pub body_deg: f64,
    pub neck_deg: f64,
    pub head: Pose3,
    pub tail: Pose3,
    pub legs_opacity: f64,
}

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct TableVisual {
    /// Placement of the whole sheet.
    pub prop: Pose3,
    /// X rotation of the lower half about the horizontal crease.
    pub flap_deg: f64,
}

/// Geometry for `phase`. Pure; the renderer owns interpolation.
pub fn derive_visual(phase: FoldPhase, config: &SceneConfig) -> FoldVisual {
    let d = config.fold_duration;
    let (transition, shape) = match phase {
        FoldPhase::Reading => (d, FoldShape::Book { closed: false }),
        FoldPhase::ClosedVertical => (d, FoldShape::Book { closed: true }),
        FoldPhase::Airplane(p) => {
            let t = if p == AirplanePhase::Flying { FLIGHT_DURATION } else { d };
            (t, FoldShape::Airplane(airplane(p)))
        }
        FoldPhase::Ball(p) => {
            let t = if p == BallPhase::Trashed { TOSS_DURATION } else { d };
            (t, FoldShape::Ball(ball(p)))
        }
        FoldPhase::Dino(p) => (d, FoldShape::Dino(dino(p))),
        FoldPhase::Table(p) => (d, FoldShape::Table(table(p))),
    };
    FoldVisual {
        brightness: config.lighting,
        transition,
        shape,
    }
}

fn airplane(p: AirplanePhase) -> AirplaneVisual {
    // Each phase keeps the folds of the phases before it.
    let folded_wings = p >= AirplanePhase::Folding3;
    AirplaneVisual {
        corner_fold_deg: -179.0,
        corner_opacity: 1.0,
        spine_deg: if p >= AirplanePhase::Folding2 { 90.0 } else { 0.0 },
        wing_deg: if folded_wings { -75.0 } else { 0.0 },
        wing_shade: if folded_wings { 1.0 } else { 0.0 },
        flight: if p == AirplanePhase::Flying {
            FlightPose::AWAY
        } else {
            FlightPose::GROUNDED
        },
    }
}

fn ball(p: BallPhase) -> BallVisual {
    let pose = match p {
        BallPhase::Crumpling => Pose3::IDENTITY.rotated(0.0, 0.0, 15.0).scaled(0.4),
        BallPhase::Trashed => Pose3::IDENTITY
            .translated(800.0, 400.0, 0.0)
            .rotated(0.0, 0.0, 720.0)
            .scaled(0.1),
    };
    BallVisual {
        pose,
        texture: Pose3::IDENTITY.rotated(0.0, 0.0, 10.0).scaled(1.5),
        crease_opacity: 0.6,
    }
}

fn dino(p: DinoPhase) -> DinoVisual {
    let neck = p >= DinoPhase::Neck;
    let head = p >= DinoPhase::Head;
    let done = p == DinoPhase::Done;
    let hidden = Pose3::IDENTITY.rotated(0.0, 0.0, 90.0).scaled(0.0);
    DinoVisual {
        pose: if done {
            Pose3::IDENTITY.translated(0.0, 100.0, 0.0).scaled(0.6)
        } else {
            Pose3::IDENTITY
        },
        body_deg: -10.0,
        neck_deg: if neck { -20.0 } else { 130.0 },
        head: if head {
            Pose3::IDENTITY.translated(-5.0, -140.0, 0.0).rotated(0.0, 0.0, -10.0)
        } else {
            hidden
        },
        tail: Pose3::IDENTITY.rotated(0.0, 0.0, 10.0),
        legs_opacity: if done { 1.0 } else { 0.0 },
    }
}

fn table(p: TablePhase) -> TableVisual {
    let prop = match p {
        TablePhase::FoldingHorizontal => Pose3::IDENTITY.translated(0.0, 125.0, 0.0),
        TablePhase::OnTable => Pose3::IDENTITY
            .translated(0.0, 100.0, -100.0)
            .rotated(70.0, 0.0, -10.0)
            .scaled(0.6),
    };
    TableVisual {
        prop,
        flap_deg: -179.0,
    }
}

#[cfg(test)]
#[path = "../../tests/unit/fold/visual.rs"]
mod tests;
