use crate::audio::synth::Cue;
use crate::foundation::core::Millis;
use crate::fold::phase::{AirplanePhase, BallPhase, DinoPhase, FoldPhase, Pipeline, TablePhase};

/// Delay between closing the book and the first pipeline-specific phase.
pub const FIRST_FOLD_DELAY: Millis = Millis(500);

/// How long the folded sheet falls before it lands on the table.
pub const LANDING_DELAY: Millis = Millis(600);

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
pub enum StepAction {
    /// Switch the scene to `phase`, playing `cue` at the same instant.
    Enter { phase: FoldPhase, cue: Option<Cue> },
    /// Play a cue without changing phase.
    Play(Cue),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
pub struct PlannedStep {
    /// Offset from the start of the sequence.
    pub at: Millis,
    pub action: StepAction,
}

/// Every step of one fold sequence, with offsets measured from the sequence start.
///
/// The whole plan is scheduled at once; steps are never chained off each other.
#[derive(Clone, Debug, Default, PartialEq, Eq, serde::Serialize)]
pub struct SequencePlan {
    steps: Vec<PlannedStep>,
}

impl SequencePlan {
    /// Forward choreography from `READING` to the pipeline's terminal phase.
    pub fn forward(pipeline: Pipeline, fold_duration: Millis) -> Self {
        let d = fold_duration;
        let base = FIRST_FOLD_DELAY;
        let mut plan = Self::default();
        plan.enter(Millis::ZERO, FoldPhase::ClosedVertical, Some(Cue::Rustle));

        match pipeline {
            Pipeline::Airplane => {
                let phases = [
                    (AirplanePhase::Folding1, Cue::Fold),
                    (AirplanePhase::Folding2, Cue::Fold),
                    (AirplanePhase::Folding3, Cue::Fold),
                    (AirplanePhase::Flying, Cue::Turn),
                ];
                for (i, (phase, cue)) in phases.into_iter().enumerate() {
                    plan.enter(base.saturating_add(d.scaled(i as f64)), FoldPhase::Airplane(phase), Some(cue));
                }
            }
            Pipeline::Ball => {
                plan.enter(base, FoldPhase::Ball(BallPhase::Crumpling), Some(Cue::Crunch));
                plan.enter(
                    base.saturating_add(d.scaled(1.5)),
                    FoldPhase::Ball(BallPhase::Trashed),
                    Some(Cue::Thud),
                );
            }
            Pipeline::Dinosaur => {
                let phases = [DinoPhase::Base, DinoPhase::Neck, DinoPhase::Head, DinoPhase::Done];
                for (i, phase) in phases.into_iter().enumerate() {
                    plan.enter(base.saturating_add(d.scaled(i as f64)), FoldPhase::Dino(phase), Some(Cue::Fold));
                }
            }
            Pipeline::Table => {
                plan.enter(base, FoldPhase::Table(TablePhase::FoldingHorizontal), Some(Cue::Fold));
                let landed = base.saturating_add(d);
                plan.enter(landed, FoldPhase::Table(TablePhase::OnTable), None);
                plan.play(landed.saturating_add(LANDING_DELAY), Cue::Thud);
            }
        }
        plan
    }

    /// Lift the sheet off the table and unfold it back to reading.
    pub fn table_reverse(fold_duration: Millis) -> Self {
        let mut plan = Self::default();
        plan.enter(Millis::ZERO, FoldPhase::Table(TablePhase::FoldingHorizontal), Some(Cue::Rustle));
        plan.enter(fold_duration, FoldPhase::ClosedVertical, Some(Cue::Fold));
        plan.enter(fold_duration.saturating_add(LANDING_DELAY), FoldPhase::Reading, None);
        plan
    }

    fn enter(&mut self, at: Millis, phase: FoldPhase, cue: Option<Cue>) {
        self.steps.push(PlannedStep {
            at,
            action: StepAction::Enter { phase, cue },
        });
    }

    fn play(&mut self, at: Millis, cue: Cue) {
        self.steps.push(PlannedStep {
            at,
            action: StepAction::Play(cue),
        });
    }

    pub fn steps(&self) -> &[PlannedStep] {
        &self.steps
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Offset of the last step.
    pub fn total(&self) -> Millis {
        self.steps.iter().map(|s| s.at).max().unwrap_or(Millis::ZERO)
    }

    /// Phase changes in plan order.
    pub fn phases(&self) -> impl Iterator<Item = (Millis, FoldPhase)> + '_ {
        self.steps.iter().filter_map(|s| match s.action {
            StepAction::Enter { phase, .. } => Some((s.at, phase)),
            StepAction::Play(_) => None,
        })
    }

    /// Phase the plan leaves the scene in.
    pub fn final_phase(&self) -> Option<FoldPhase> {
        self.phases().last().map(|(_, p)| p)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/fold/plan.rs"]
mod tests;
