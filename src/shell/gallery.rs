use crate::fold::phase::Pipeline;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
/// Selectable scene in the gallery.
pub enum SceneId {
    #[default]
    #[serde(rename = "HAL_9000")]
    Hal9000,
    Matrix,
    MatrixPills,
    Hyperspace,
    Noir,
    StockNap,
    /// Single-sheet paper that folds onto a table.
    Newspaper,
    /// Editable six-page paper with airplane, ball and dinosaur folds.
    NewspaperAirplane,
    AiDirector,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
/// Gallery card for one scene.
pub struct SceneEntry {
    pub id: SceneId,
    pub title: &'static str,
    pub movie: &'static str,
    pub year: &'static str,
    pub description: &'static str,
}

const QUERY_KEY: &str = "scene";

pub static CATALOG: [SceneEntry; 9] = [
    SceneEntry {
        id: SceneId::Hal9000,
        title: "Logic Memory Center",
        movie: "2001: A Space Odyssey",
        year: "1968",
        description: "The unblinking red eye of HAL 9000. A study in minimal geometric menace.",
    },
    SceneEntry {
        id: SceneId::Matrix,
        title: "Digital Rain",
        movie: "The Matrix",
        year: "1999",
        description: "Streaming green code representing the simulated reality. A classic falling text effect.",
    },
    SceneEntry {
        id: SceneId::MatrixPills,
        title: "The Choice",
        movie: "The Matrix",
        year: "1999",
        description: "Blue pill or Red pill. A moment of truth suspended in reflection.",
    },
    SceneEntry {
        id: SceneId::Hyperspace,
        title: "Light Speed",
        movie: "Star Wars",
        year: "1977",
        description: "The stretching of stars into streaks of light as the Millennium Falcon jumps to hyperspace.",
    },
    SceneEntry {
        id: SceneId::Noir,
        title: "Shadows & Fog",
        movie: "Generic Noir",
        year: "1940s",
        description: "Venetian blinds casting shadows in a smoke-filled room. High contrast and mystery.",
    },
    SceneEntry {
        id: SceneId::StockNap,
        title: "StockNap Splash",
        movie: "App Concept",
        year: "2024",
        description: "An animated splash screen featuring a sleeping figure on a moon and falling money.",
    },
    SceneEntry {
        id: SceneId::Newspaper,
        title: "The Daily Code",
        movie: "Harry Potter",
        year: "2001",
        description: "A magical newspaper with moving images and 3D page turning interactions.",
    },
    SceneEntry {
        id: SceneId::NewspaperAirplane,
        title: "The Daily Fold",
        movie: "Paper Craft",
        year: "2024",
        description: "An editable newspaper that folds itself into an airplane, a paper ball or a dinosaur.",
    },
    SceneEntry {
        id: SceneId::AiDirector,
        title: "AI Director",
        movie: "Generative",
        year: "2024",
        description: "Describe a scene, and the AI will generate an abstract CSS composition for it.",
    },
];

impl SceneId {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Hal9000 => "HAL_9000",
            Self::Matrix => "MATRIX",
            Self::MatrixPills => "MATRIX_PILLS",
            Self::Hyperspace => "HYPERSPACE",
            Self::Noir => "NOIR",
            Self::StockNap => "STOCK_NAP",
            Self::Newspaper => "NEWSPAPER",
            Self::NewspaperAirplane => "NEWSPAPER_AIRPLANE",
            Self::AiDirector => "AI_DIRECTOR",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        CATALOG.iter().map(|e| e.id).find(|id| id.as_str() == s)
    }

    pub fn entry(self) -> &'static SceneEntry {
        // CATALOG lists every id in declaration order.
        &CATALOG[self as usize]
    }

    /// Scene selected by a `?scene=ID` query string. Missing or unknown ids fall back
    /// to the default scene.
    pub fn from_query(query: &str) -> Self {
        let query = query.strip_prefix('?').unwrap_or(query);
        query
            .split('&')
            .filter_map(|pair| pair.split_once('='))
            .find(|(k, _)| *k == QUERY_KEY)
            .and_then(|(_, v)| Self::parse(v))
            .unwrap_or_default()
    }

    pub fn to_query(self) -> String {
        format!("?{QUERY_KEY}={}", self.as_str())
    }

    /// Fold pipeline a paper scene starts with.
    pub fn paper_pipeline(self) -> Option<Pipeline> {
        match self {
            Self::Newspaper => Some(Pipeline::Table),
            Self::NewspaperAirplane => Some(Pipeline::Airplane),
            _ => None,
        }
    }
}

impl std::fmt::Display for SceneId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/shell/gallery.rs"]
mod tests;
