#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
/// Which terminal choreography a fold sequence runs.
pub enum Pipeline {
    /// Dart-shaped paper airplane that flies off stage.
    #[default]
    Airplane,
    /// Crumpled ball tossed away.
    Ball,
    /// Origami dinosaur that settles into a resting pose.
    Dinosaur,
    /// Single sheet folded horizontally and laid on a table; reversible.
    Table,
}

impl Pipeline {
    pub const ALL: [Pipeline; 4] = [
        Pipeline::Airplane,
        Pipeline::Ball,
        Pipeline::Dinosaur,
        Pipeline::Table,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Self::Airplane => "airplane",
            Self::Ball => "ball",
            Self::Dinosaur => "dinosaur",
            Self::Table => "table",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|p| p.name() == s)
    }

    /// Whether reset plays the sequence backwards instead of snapping to reading.
    pub fn is_reversible(self) -> bool {
        matches!(self, Self::Table)
    }

    /// Terminal phase of this pipeline.
    pub fn terminal(self) -> FoldPhase {
        match self {
            Self::Airplane => FoldPhase::Airplane(AirplanePhase::Flying),
            Self::Ball => FoldPhase::Ball(BallPhase::Trashed),
            Self::Dinosaur => FoldPhase::Dino(DinoPhase::Done),
            Self::Table => FoldPhase::Table(TablePhase::OnTable),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize)]
pub enum AirplanePhase {
    /// Corners dog-eared toward the spine.
    Folding1,
    /// Panels rotated vertical about the spine.
    Folding2,
    /// Wings folded down into the dart.
    Folding3,
    Flying,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize)]
pub enum BallPhase {
    Crumpling,
    Trashed,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize)]
pub enum DinoPhase {
    Base,
    Neck,
    Head,
    Done,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize)]
pub enum TablePhase {
    FoldingHorizontal,
    OnTable,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
/// The scene-wide fold/flight phase.
pub enum FoldPhase {
    /// Open book; the only phase in which pages turn and elements are editable.
    #[default]
    Reading,
    /// Book closed to the cover, shared by every pipeline.
    ClosedVertical,
    Airplane(AirplanePhase),
    Ball(BallPhase),
    Dino(DinoPhase),
    Table(TablePhase),
}

impl FoldPhase {
    pub fn is_reading(self) -> bool {
        self == Self::Reading
    }

    /// Pipeline-specific phases belong to exactly one pipeline.
    pub fn pipeline(self) -> Option<Pipeline> {
        match self {
            Self::Reading | Self::ClosedVertical => None,
            Self::Airplane(_) => Some(Pipeline::Airplane),
            Self::Ball(_) => Some(Pipeline::Ball),
            Self::Dino(_) => Some(Pipeline::Dinosaur),
            Self::Table(_) => Some(Pipeline::Table),
        }
    }

    pub fn is_terminal(self) -> bool {
        self.pipeline().is_some_and(|p| p.terminal() == self)
    }

    /// Upper-case name used in logs and timelines.
    pub fn name(self) -> &'static str {
        match self {
            Self::Reading => "READING",
            Self::ClosedVertical => "CLOSED_VERTICAL",
            Self::Airplane(AirplanePhase::Folding1) => "FOLDING_1",
            Self::Airplane(AirplanePhase::Folding2) => "FOLDING_2",
            Self::Airplane(AirplanePhase::Folding3) => "FOLDING_3",
            Self::Airplane(AirplanePhase::Flying) => "FLYING",
            Self::Ball(BallPhase::Crumpling) => "CRUMPLING",
            Self::Ball(BallPhase::Trashed) => "TRASHED",
            Self::Dino(DinoPhase::Base) => "DINO_BASE",
            Self::Dino(DinoPhase::Neck) => "DINO_NECK",
            Self::Dino(DinoPhase::Head) => "DINO_HEAD",
            Self::Dino(DinoPhase::Done) => "DINO_DONE",
            Self::Table(TablePhase::FoldingHorizontal) => "FOLDING_HORIZONTAL",
            Self::Table(TablePhase::OnTable) => "ON_TABLE",
        }
    }
}

impl std::fmt::Display for FoldPhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/fold/phase.rs"]
mod tests;
