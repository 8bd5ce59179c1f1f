#![forbid(unsafe_code)]

pub mod audio;
pub mod document;
pub mod fold;
pub mod foundation;
pub mod ingest;
pub mod interaction;
pub mod layout;
pub mod navigator;
pub mod scene;
pub mod shell;

pub use audio::engine::{AudioEngine, AudioSink, AudioStats, MemorySink};
pub use audio::synth::{Cue, CueSpec, SYNTH_SAMPLE_RATE, SoundBurst, synthesize, write_burst_to_f32le_file};
pub use document::model::{
    Document, Element, ElementBox, ElementContent, ElementKind, ElementPatch, ImageSource, MIN_ELEMENT_SIZE, Page,
};
pub use document::render::{DrawItem, PageDisplay, Paint, render_page};
pub use fold::phase::{AirplanePhase, BallPhase, DinoPhase, FoldPhase, Pipeline, TablePhase};
pub use fold::plan::{PlannedStep, SequencePlan, StepAction};
pub use fold::schedule::{TimerId, Timers};
pub use fold::visual::{FoldShape, FoldVisual, derive_visual};
pub use foundation::core::{Millis, Point, Pose3, Rect, Vec2};
pub use foundation::error::{SceneError, SceneResult};
pub use foundation::rng::Rng64;
pub use ingest::{INGEST_FAILURE_ALERT, IngestOptions, IngestReport, PdfRasterizer, ingest_pdf};
pub use interaction::gesture::{DragGesture, GestureMode, HitTarget, Interaction};
pub use layout::stage::{PanelSplit, StageFit};
pub use navigator::Navigator;
pub use scene::config::{FontStyle, SceneConfig};
pub use scene::instance::{Confirm, DELETE_PROMPT, PointerOutcome, Scene, SceneEvent, SceneEventKind};
pub use shell::director::{Director, DirectorError, DirectorParams, Shape, Speed, parse_director_response};
pub use shell::gallery::{CATALOG, SceneEntry, SceneId};
