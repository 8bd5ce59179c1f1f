use super::*;

fn entered(plan: &SequencePlan) -> Vec<(u64, &'static str)> {
    plan.phases().map(|(at, p)| (at.0, p.name())).collect()
}

#[test]
fn airplane_steps_are_spaced_by_fold_duration() {
    let plan = SequencePlan::forward(Pipeline::Airplane, Millis(800));
    assert_eq!(
        entered(&plan),
        vec![
            (0, "CLOSED_VERTICAL"),
            (500, "FOLDING_1"),
            (1300, "FOLDING_2"),
            (2100, "FOLDING_3"),
            (2900, "FLYING"),
        ]
    );
    assert_eq!(
        plan.steps().last().map(|s| s.action),
        Some(StepAction::Enter {
            phase: FoldPhase::Airplane(AirplanePhase::Flying),
            cue: Some(Cue::Turn),
        })
    );
}

#[test]
fn ball_trashes_after_one_and_a_half_folds() {
    let plan = SequencePlan::forward(Pipeline::Ball, Millis(1000));
    assert_eq!(
        entered(&plan),
        vec![(0, "CLOSED_VERTICAL"), (500, "CRUMPLING"), (2000, "TRASHED")]
    );
    let cues: Vec<_> = plan
        .steps()
        .iter()
        .filter_map(|s| match s.action {
            StepAction::Enter { cue, .. } => cue,
            StepAction::Play(c) => Some(c),
        })
        .collect();
    assert_eq!(cues, vec![Cue::Rustle, Cue::Crunch, Cue::Thud]);
}

#[test]
fn dinosaur_folds_on_every_step() {
    let plan = SequencePlan::forward(Pipeline::Dinosaur, Millis(1000));
    assert_eq!(plan.len(), 5);
    assert_eq!(plan.total(), Millis(3500));
    for step in &plan.steps()[1..] {
        assert!(matches!(step.action, StepAction::Enter { cue: Some(Cue::Fold), .. }));
    }
    assert_eq!(plan.final_phase(), Some(FoldPhase::Dino(DinoPhase::Done)));
}

#[test]
fn table_thud_lands_after_the_drop() {
    let plan = SequencePlan::forward(Pipeline::Table, Millis(1000));
    assert_eq!(
        plan.steps().last(),
        Some(&PlannedStep {
            at: Millis(2100),
            action: StepAction::Play(Cue::Thud),
        })
    );
    assert_eq!(plan.final_phase(), Some(FoldPhase::Table(TablePhase::OnTable)));
}

#[test]
fn table_reverse_ends_reading() {
    let plan = SequencePlan::table_reverse(Millis(700));
    assert_eq!(
        entered(&plan),
        vec![(0, "FOLDING_HORIZONTAL"), (700, "CLOSED_VERTICAL"), (1300, "READING")]
    );
}

#[test]
fn steps_never_go_back_in_time() {
    for p in Pipeline::ALL {
        let plan = SequencePlan::forward(p, Millis(1234));
        assert!(plan.steps().windows(2).all(|w| w[0].at <= w[1].at));
    }
}
