use crate::audio::engine::{AudioEngine, AudioStats};
use crate::audio::synth::Cue;
use crate::document::model::{Document, Element};
use crate::document::render::{PageDisplay, render_page};
use crate::fold::phase::{FoldPhase, Pipeline};
use crate::fold::plan::{SequencePlan, StepAction};
use crate::fold::schedule::Timers;
use crate::fold::visual::{FoldVisual, derive_visual};
use crate::foundation::core::{Millis, Point};
use crate::foundation::error::{SceneError, SceneResult};
use crate::interaction::gesture::{DragGesture, GestureMode, HitTarget, Interaction};
use crate::layout::stage::{PanelSplit, StageFit};
use crate::navigator::Navigator;
use crate::scene::config::SceneConfig;

/// Pause after the rewind page turn before the fold sequence begins.
const REWIND_SETTLE: Millis = Millis(100);

pub const DELETE_PROMPT: &str = "Delete this element?";

/// Host confirmation dialog for destructive actions.
pub trait Confirm {
    fn confirm(&mut self, prompt: &str) -> bool;
}

impl<F: FnMut(&str) -> bool> Confirm for F {
    fn confirm(&mut self, prompt: &str) -> bool {
        self(prompt)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
/// What a pointer-down did.
pub enum PointerOutcome {
    GestureStarted(GestureMode),
    /// Open this URL in a new browsing context.
    Navigate(String),
    Deleted,
    DeleteDeclined,
    Ignored,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
pub enum SceneEventKind {
    Phase(FoldPhase),
    Cue(Cue),
    PageTurn { position: usize },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
/// Something observable that happened on the scene clock.
pub struct SceneEvent {
    pub at: Millis,
    pub kind: SceneEventKind,
}

#[derive(Clone, Debug)]
enum SceneTimer {
    /// Start a fold plan once the rewind page turn has settled.
    Begin(SequencePlan),
    Step(StepAction),
}

/// One mounted paper scene.
///
/// Owns everything a scene mutates. All time is virtual: the host moves the clock with
/// [`Scene::advance`] and every scheduled phase change and cue fires from there, in order.
pub struct Scene {
    pipeline: Pipeline,
    document: Document,
    config: SceneConfig,
    phase: FoldPhase,
    navigator: Navigator,
    timers: Timers<SceneTimer>,
    interaction: Interaction,
    audio: AudioEngine,
    stage: StageFit,
    panel: PanelSplit,
    viewport_width: Option<f64>,
    scale: f64,
    edit_mode: bool,
    loading: bool,
    events: Vec<SceneEvent>,
}

impl std::fmt::Debug for Scene {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Scene")
            .field("pipeline", &self.pipeline)
            .field("phase", &self.phase)
            .field("now", &self.timers.now())
            .field("pending_timers", &self.timers.pending())
            .field("navigator", &self.navigator)
            .field("scale", &self.scale)
            .field("edit_mode", &self.edit_mode)
            .field("loading", &self.loading)
            .finish()
    }
}

impl Scene {
    pub fn new(pipeline: Pipeline, document: Document, config: SceneConfig) -> SceneResult<Self> {
        config.validate()?;
        document.validate()?;
        Ok(Self {
            pipeline,
            document,
            config,
            phase: FoldPhase::Reading,
            navigator: Navigator::default(),
            timers: Timers::new(),
            interaction: Interaction::default(),
            audio: AudioEngine::unavailable(),
            stage: StageFit::default(),
            panel: PanelSplit::default(),
            viewport_width: None,
            scale: 1.0,
            edit_mode: false,
            loading: false,
            events: Vec::new(),
        })
    }

    pub fn with_audio(mut self, audio: AudioEngine) -> Self {
        self.audio = audio;
        self
    }

    pub fn with_navigator(mut self, navigator: Navigator) -> Self {
        self.navigator = navigator;
        self
    }

    pub fn with_stage(mut self, stage: StageFit) -> SceneResult<Self> {
        stage.validate()?;
        self.stage = stage;
        Ok(self)
    }

    pub fn pipeline(&self) -> Pipeline {
        self.pipeline
    }

    pub fn phase(&self) -> FoldPhase {
        self.phase
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    /// Direct access for editor input (text, links, new elements).
    pub fn document_mut(&mut self) -> &mut Document {
        &mut self.document
    }

    pub fn config(&self) -> &SceneConfig {
        &self.config
    }

    pub fn navigator(&self) -> &Navigator {
        &self.navigator
    }

    pub fn interaction(&self) -> &Interaction {
        &self.interaction
    }

    pub fn audio_stats(&self) -> AudioStats {
        self.audio.stats()
    }

    pub fn now(&self) -> Millis {
        self.timers.now()
    }

    pub fn scale(&self) -> f64 {
        self.scale
    }

    pub fn panel(&self) -> &PanelSplit {
        &self.panel
    }

    pub fn is_edit_mode(&self) -> bool {
        self.edit_mode
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub(crate) fn set_loading(&mut self, loading: bool) {
        self.loading = loading;
    }

    /// A fold, rewind or reverse sequence still has pending steps.
    pub fn is_sequence_running(&self) -> bool {
        !self.timers.is_idle()
    }

    pub fn pending_timers(&self) -> usize {
        self.timers.pending()
    }

    /// Page turns, gestures and pipeline changes are only allowed while reading and idle.
    pub fn is_idle_reading(&self) -> bool {
        self.phase.is_reading() && self.timers.is_idle()
    }

    pub fn drain_events(&mut self) -> Vec<SceneEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn set_config(&mut self, config: SceneConfig) -> SceneResult<()> {
        config.validate()?;
        self.config = config;
        Ok(())
    }

    pub fn set_pipeline(&mut self, pipeline: Pipeline) -> SceneResult<()> {
        if !self.is_idle_reading() {
            return Err(SceneError::transition(format!(
                "cannot switch to {} while {} is in progress",
                pipeline.name(),
                self.phase
            )));
        }
        self.pipeline = pipeline;
        Ok(())
    }

    /// Leaving edit mode drops any gesture in progress.
    pub fn set_edit_mode(&mut self, edit_mode: bool) {
        self.edit_mode = edit_mode;
        if !edit_mode {
            self.interaction.release();
        }
    }

    /// Refit the stage into a `width` x `height` viewport. Returns the new scale.
    pub fn resize_viewport(&mut self, width: f64, height: f64) -> f64 {
        self.viewport_width = Some(width);
        self.scale = self.stage.scale_for(width, height);
        self.scale
    }

    /// Move the control-panel divider and refit the stage into the space left above it.
    pub fn drag_panel_divider(&mut self, container_top: f64, container_height: f64, pointer_y: f64) -> f64 {
        self.panel.drag_divider(container_top, container_height, pointer_y);
        if let Some(width) = self.viewport_width {
            self.scale = self.stage.scale_for(width, self.panel.stage_height(container_height));
        }
        self.scale
    }

    pub fn render_page(&self, page_index: usize) -> Option<PageDisplay> {
        self.document
            .page(page_index)
            .map(|page| render_page(page_index, page, &self.config, self.edit_mode))
    }

    pub fn visual(&self) -> FoldVisual {
        derive_visual(self.phase, &self.config)
    }

    pub fn next_page(&mut self) -> bool {
        self.turn_page(true)
    }

    pub fn prev_page(&mut self) -> bool {
        self.turn_page(false)
    }

    fn turn_page(&mut self, forward: bool) -> bool {
        if !self.is_idle_reading() {
            return false;
        }
        let moved = if forward {
            self.navigator.next()
        } else {
            self.navigator.prev()
        };
        if moved {
            self.record(SceneEventKind::PageTurn {
                position: self.navigator.position(),
            });
            self.play(Cue::Turn);
        }
        moved
    }

    /// Begin the fold sequence for the current pipeline.
    ///
    /// An open book is turned back to the cover first; the sequence then waits for that
    /// turn to finish. Durations are read now and not revisited.
    #[tracing::instrument(skip(self), fields(pipeline = self.pipeline.name()))]
    pub fn start_sequence(&mut self) -> SceneResult<()> {
        if !self.phase.is_reading() {
            return Err(SceneError::transition(format!(
                "sequence can only start from READING, scene is {}",
                self.phase
            )));
        }
        if !self.timers.is_idle() {
            return Err(SceneError::transition("a sequence is already in flight"));
        }
        self.interaction.release();

        let plan = SequencePlan::forward(self.pipeline, self.config.fold_duration);
        tracing::info!(
            steps = plan.len(),
            total_ms = plan.total().0,
            spread = self.navigator.position(),
            "start fold sequence"
        );
        if self.navigator.rewind() {
            self.record(SceneEventKind::PageTurn { position: 0 });
            self.play(Cue::Turn);
            let wait = self.config.turn_duration.saturating_add(REWIND_SETTLE);
            self.timers.schedule(wait, SceneTimer::Begin(plan));
        } else {
            self.begin(plan);
        }
        Ok(())
    }

    /// Return to `READING`. Returns `false` if there was nothing to undo.
    ///
    /// A table resting in its terminal pose unfolds in reverse; everything else
    /// cancels what is pending and snaps back.
    #[tracing::instrument(skip(self), fields(phase = self.phase.name()))]
    pub fn reset(&mut self) -> bool {
        if self.is_idle_reading() {
            return false;
        }
        let cancelled = self.timers.clear();

        if self.pipeline.is_reversible() && self.phase == self.pipeline.terminal() {
            tracing::info!(cancelled, "unfold");
            self.begin(SequencePlan::table_reverse(self.config.fold_duration));
            return true;
        }

        tracing::info!(cancelled, "reset to reading");
        if !self.phase.is_reading() {
            self.enter(FoldPhase::Reading);
            self.play(Cue::Rustle);
        }
        true
    }

    /// Move the clock forward by `elapsed`. Returns how many timers fired.
    pub fn advance(&mut self, elapsed: Millis) -> usize {
        let until = self.timers.now().saturating_add(elapsed);
        self.advance_to(until)
    }

    pub fn advance_to(&mut self, until: Millis) -> usize {
        let mut fired = 0;
        while let Some((_, timer)) = self.timers.pop_due(until) {
            fired += 1;
            match timer {
                SceneTimer::Begin(plan) => self.begin(plan),
                SceneTimer::Step(action) => self.apply(action),
            }
        }
        self.timers.settle(until);
        fired
    }

    /// Fire everything pending. Returns the clock at the last step.
    pub fn run_until_idle(&mut self) -> Millis {
        while let Some(due) = self.timers.next_due() {
            self.advance_to(due);
        }
        self.timers.now()
    }

    fn begin(&mut self, plan: SequencePlan) {
        for step in plan.steps() {
            if step.at == Millis::ZERO {
                self.apply(step.action);
            } else {
                self.timers.schedule(step.at, SceneTimer::Step(step.action));
            }
        }
    }

    fn apply(&mut self, action: StepAction) {
        match action {
            StepAction::Enter { phase, cue } => {
                self.enter(phase);
                if let Some(cue) = cue {
                    self.play(cue);
                }
            }
            StepAction::Play(cue) => self.play(cue),
        }
    }

    fn enter(&mut self, phase: FoldPhase) {
        tracing::debug!(from = self.phase.name(), to = phase.name(), at = self.timers.now().0, "phase");
        self.phase = phase;
        self.record(SceneEventKind::Phase(phase));
    }

    fn play(&mut self, cue: Cue) {
        self.record(SceneEventKind::Cue(cue));
        self.audio.play(cue, &self.config);
    }

    fn record(&mut self, kind: SceneEventKind) {
        self.events.push(SceneEvent {
            at: self.timers.now(),
            kind,
        });
    }

    /// Pointer pressed on `target` of an element.
    pub fn pointer_down(
        &mut self,
        page_index: usize,
        element_id: &str,
        target: HitTarget,
        pointer: Point,
        confirm: &mut dyn Confirm,
    ) -> PointerOutcome {
        if !self.is_idle_reading() {
            return PointerOutcome::Ignored;
        }
        let Some((start_box, link)) = self
            .find_element(page_index, element_id)
            .map(|e| (e.bbox, e.link.clone()))
        else {
            return PointerOutcome::Ignored;
        };

        if !self.edit_mode {
            return match (link, target) {
                (Some(link), HitTarget::Body) if !link.is_empty() => PointerOutcome::Navigate(link),
                _ => PointerOutcome::Ignored,
            };
        }

        let mode = match target {
            HitTarget::DeleteButton => {
                return if self.delete_element(page_index, element_id, confirm) {
                    PointerOutcome::Deleted
                } else {
                    PointerOutcome::DeleteDeclined
                };
            }
            HitTarget::Body => GestureMode::Move,
            HitTarget::ResizeHandle => GestureMode::Resize,
        };
        match DragGesture::begin(mode, pointer, start_box, self.scale) {
            Ok(gesture) => {
                self.interaction.capture(page_index, element_id, gesture);
                PointerOutcome::GestureStarted(mode)
            }
            Err(err) => {
                tracing::warn!(error = %err, "gesture rejected");
                PointerOutcome::Ignored
            }
        }
    }

    /// Apply the active gesture at `pointer`. Returns `true` if an element changed.
    pub fn pointer_move(&mut self, pointer: Point) -> bool {
        match self.interaction.track(pointer) {
            Some((page_index, element_id, patch)) => {
                self.document.update_element(page_index, element_id, &patch)
            }
            None => false,
        }
    }

    pub fn pointer_up(&mut self) -> bool {
        self.interaction.release().is_some()
    }

    /// Delete after asking `confirm`. Declining, or an unknown element, changes nothing.
    pub fn delete_element(&mut self, page_index: usize, element_id: &str, confirm: &mut dyn Confirm) -> bool {
        if self.find_element(page_index, element_id).is_none() {
            return false;
        }
        if !confirm.confirm(DELETE_PROMPT) {
            return false;
        }
        if self
            .interaction
            .active()
            .is_some_and(|a| a.page_index == page_index && a.element_id == element_id)
        {
            self.interaction.release();
        }
        self.document.delete_element(page_index, element_id)
    }

    fn find_element(&self, page_index: usize, element_id: &str) -> Option<&Element> {
        self.document.page(page_index)?.element(element_id)
    }

    /// Cancel pending timers, drop any gesture and close the audio device.
    /// Also runs on drop.
    pub fn teardown(&mut self) {
        let cancelled = self.timers.clear();
        self.interaction.release();
        self.audio.shutdown();
        if cancelled > 0 {
            tracing::debug!(cancelled, "scene teardown");
        }
    }
}

impl Drop for Scene {
    fn drop(&mut self) {
        self.teardown();
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/instance.rs"]
mod tests;
