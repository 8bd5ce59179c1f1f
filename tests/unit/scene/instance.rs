use super::*;
use crate::audio::engine::MemorySink;
use crate::document::model::{ElementBox, Page};
use crate::fold::phase::{AirplanePhase, BallPhase, TablePhase};

fn scene_with(pipeline: Pipeline) -> (Scene, MemorySink) {
    let sink = MemorySink::new();
    let scene = Scene::new(pipeline, Document::daily_fold(), SceneConfig::default())
        .unwrap()
        .with_audio(AudioEngine::with_memory_sink(sink.clone()).with_sample_rate(4_000));
    (scene, sink)
}

fn phases(events: &[SceneEvent]) -> Vec<(u64, &'static str)> {
    events
        .iter()
        .filter_map(|e| match e.kind {
            SceneEventKind::Phase(p) => Some((e.at.0, p.name())),
            _ => None,
        })
        .collect()
}

#[test]
fn closes_the_book_immediately() {
    let (mut s, sink) = scene_with(Pipeline::Airplane);
    s.start_sequence().unwrap();
    assert_eq!(s.phase(), FoldPhase::ClosedVertical);
    assert_eq!(sink.cues(), vec![Cue::Rustle]);
    assert!(s.is_sequence_running());
}

#[test]
fn second_start_is_rejected_while_in_flight() {
    let (mut s, _) = scene_with(Pipeline::Ball);
    s.start_sequence().unwrap();
    assert!(matches!(s.start_sequence(), Err(SceneError::Transition(_))));

    s.run_until_idle();
    assert_eq!(s.phase(), FoldPhase::Ball(BallPhase::Trashed));
    // Terminal, not reading: still rejected.
    assert!(s.start_sequence().is_err());
}

#[test]
fn open_book_rewinds_before_folding() {
    let (mut s, sink) = scene_with(Pipeline::Airplane);
    assert!(s.next_page());
    assert!(s.next_page());
    s.drain_events();

    s.start_sequence().unwrap();
    assert_eq!(s.navigator().position(), 0);
    assert_eq!(s.phase(), FoldPhase::Reading);
    assert!(!s.next_page());

    // Turn duration 1000 + 100 settle.
    s.advance(Millis(1099));
    assert_eq!(s.phase(), FoldPhase::Reading);
    s.advance(Millis(1));
    assert_eq!(s.phase(), FoldPhase::ClosedVertical);

    s.run_until_idle();
    assert_eq!(
        phases(&s.drain_events()),
        vec![
            (1100, "CLOSED_VERTICAL"),
            (1600, "FOLDING_1"),
            (2600, "FOLDING_2"),
            (3600, "FOLDING_3"),
            (4600, "FLYING"),
        ]
    );
    assert_eq!(
        sink.cues(),
        vec![Cue::Turn, Cue::Turn, Cue::Turn, Cue::Rustle, Cue::Fold, Cue::Fold, Cue::Fold, Cue::Turn]
    );
}

#[test]
fn durations_are_captured_at_start() {
    let (mut s, _) = scene_with(Pipeline::Airplane);
    s.start_sequence().unwrap();
    s.set_config(SceneConfig {
        fold_duration: Millis(3000),
        ..SceneConfig::default()
    })
    .unwrap();
    assert_eq!(s.run_until_idle(), Millis(3500));
    assert_eq!(s.phase(), FoldPhase::Airplane(AirplanePhase::Flying));
}

#[test]
fn reset_snaps_mid_sequence() {
    let (mut s, sink) = scene_with(Pipeline::Airplane);
    s.start_sequence().unwrap();
    s.advance(Millis(600));
    assert_eq!(s.phase(), FoldPhase::Airplane(AirplanePhase::Folding1));

    assert!(s.reset());
    assert_eq!(s.phase(), FoldPhase::Reading);
    assert_eq!(s.pending_timers(), 0);
    assert_eq!(sink.cues().last(), Some(&Cue::Rustle));

    s.advance(Millis(10_000));
    assert_eq!(s.phase(), FoldPhase::Reading);
    assert!(!s.reset());
}

#[test]
fn reset_cancels_a_pending_rewind() {
    let (mut s, _) = scene_with(Pipeline::Dinosaur);
    s.next_page();
    s.start_sequence().unwrap();
    assert!(s.reset());
    s.advance(Millis(5_000));
    assert_eq!(s.phase(), FoldPhase::Reading);
}

#[test]
fn table_unfolds_in_reverse() {
    let (mut s, sink) = scene_with(Pipeline::Table);
    s.start_sequence().unwrap();
    s.run_until_idle();
    assert_eq!(s.phase(), FoldPhase::Table(TablePhase::OnTable));
    assert_eq!(sink.cues().last(), Some(&Cue::Thud));
    s.drain_events();

    assert!(s.reset());
    assert_eq!(s.phase(), FoldPhase::Table(TablePhase::FoldingHorizontal));
    let start = s.now().0;
    s.run_until_idle();
    assert_eq!(
        phases(&s.drain_events()),
        vec![
            (start, "FOLDING_HORIZONTAL"),
            (start + 1000, "CLOSED_VERTICAL"),
            (start + 1600, "READING"),
        ]
    );
    assert!(s.is_idle_reading());
}

#[test]
fn navigation_is_locked_while_folded() {
    let (mut s, sink) = scene_with(Pipeline::Ball);
    s.start_sequence().unwrap();
    s.run_until_idle();
    let before = sink.len();
    assert!(!s.next_page());
    assert!(!s.prev_page());
    assert_eq!(sink.len(), before);
}

#[test]
fn prev_at_cover_is_silent() {
    let (mut s, sink) = scene_with(Pipeline::Airplane);
    assert!(!s.prev_page());
    assert!(sink.is_empty());
}

#[test]
fn next_at_last_spread_is_silent() {
    let (mut s, sink) = scene_with(Pipeline::Airplane);
    for _ in 0..3 {
        assert!(s.next_page());
    }
    let before = sink.len();
    assert!(!s.next_page());
    assert_eq!(sink.len(), before);
    assert_eq!(s.navigator().position(), 3);
    let turns = s
        .drain_events()
        .iter()
        .filter(|e| matches!(e.kind, SceneEventKind::PageTurn { .. }))
        .count();
    assert_eq!(turns, 3);
}

#[test]
fn table_reset_before_landing_drops_the_thud() {
    let (mut s, sink) = scene_with(Pipeline::Table);
    s.start_sequence().unwrap();
    s.advance_to(Millis(1700));
    assert_eq!(s.phase(), FoldPhase::Table(TablePhase::OnTable));
    assert_eq!(s.pending_timers(), 1);

    assert!(s.reset());
    s.run_until_idle();
    assert_eq!(sink.cues(), vec![Cue::Rustle, Cue::Fold, Cue::Rustle, Cue::Fold]);
    assert!(s.is_idle_reading());
}

#[test]
fn scene_rejects_duplicate_element_ids() {
    let dup = Element::body_text("x", ElementBox::new(0.0, 0.0, 50.0, 50.0), "a");
    let doc = Document::from_pages(vec![Page::new(vec![dup.clone(), dup])]);
    let err = Scene::new(Pipeline::Airplane, doc, SceneConfig::default()).unwrap_err();
    assert!(matches!(err, SceneError::Validation(_)));
}

#[test]
fn pipeline_switch_requires_idle_reading() {
    let (mut s, _) = scene_with(Pipeline::Airplane);
    s.set_pipeline(Pipeline::Ball).unwrap();
    s.start_sequence().unwrap();
    assert!(s.set_pipeline(Pipeline::Dinosaur).is_err());
    assert_eq!(s.pipeline(), Pipeline::Ball);
}

#[test]
fn drag_moves_by_scaled_delta() {
    let (mut s, _) = scene_with(Pipeline::Airplane);
    s.document_mut()
        .replace_page(1, vec![Element::body_text("t", ElementBox::new(10.0, 10.0, 100.0, 50.0), "x")])
        .unwrap();
    s.set_edit_mode(true);
    let scale = s.resize_viewport(475.0, 265.0);
    assert_eq!(scale, 0.5);

    let mut never = |_: &str| -> bool { panic!("no prompt expected") };
    let out = s.pointer_down(1, "t", HitTarget::Body, Point::new(100.0, 100.0), &mut never);
    assert_eq!(out, PointerOutcome::GestureStarted(GestureMode::Move));

    // A resize mid-drag does not change the captured scale.
    s.resize_viewport(950.0, 520.0);
    assert!(s.pointer_move(Point::new(110.0, 95.0)));
    assert!(s.pointer_up());

    let bbox = s.document().page(1).unwrap().element("t").unwrap().bbox;
    assert_eq!((bbox.x, bbox.y), (30.0, 0.0));
    assert!(!s.pointer_move(Point::new(500.0, 500.0)));
}

#[test]
fn resize_never_goes_below_minimum() {
    let (mut s, _) = scene_with(Pipeline::Airplane);
    s.set_edit_mode(true);
    let mut yes = |_: &str| true;
    let out = s.pointer_down(0, "i1", HitTarget::ResizeHandle, Point::new(0.0, 0.0), &mut yes);
    assert_eq!(out, PointerOutcome::GestureStarted(GestureMode::Resize));
    s.pointer_move(Point::new(-10_000.0, -10_000.0));
    let bbox = s.document().page(0).unwrap().element("i1").unwrap().bbox;
    assert_eq!((bbox.w, bbox.h), (20.0, 20.0));
}

#[test]
fn links_only_outside_edit_mode() {
    let (mut s, _) = scene_with(Pipeline::Airplane);
    s.document_mut()
        .replace_page(
            2,
            vec![Element::image_url("a", ElementBox::full_page(), "https://example.com/a.png").with_link("https://example.com")],
        )
        .unwrap();
    let mut yes = |_: &str| true;

    let out = s.pointer_down(2, "a", HitTarget::Body, Point::ZERO, &mut yes);
    assert_eq!(out, PointerOutcome::Navigate("https://example.com".to_owned()));

    s.set_edit_mode(true);
    let out = s.pointer_down(2, "a", HitTarget::Body, Point::ZERO, &mut yes);
    assert_eq!(out, PointerOutcome::GestureStarted(GestureMode::Move));
    assert!(s.render_page(2).unwrap().items[0].link.is_none());
}

#[test]
fn delete_needs_confirmation() {
    let (mut s, _) = scene_with(Pipeline::Airplane);
    s.set_edit_mode(true);
    let before = s.document().page(0).unwrap().elements.len();

    let mut prompts = Vec::new();
    let mut no = |p: &str| {
        prompts.push(p.to_owned());
        false
    };
    let out = s.pointer_down(0, "h1", HitTarget::DeleteButton, Point::ZERO, &mut no);
    assert_eq!(out, PointerOutcome::DeleteDeclined);
    assert_eq!(prompts, vec![DELETE_PROMPT.to_owned()]);
    assert_eq!(s.document().page(0).unwrap().elements.len(), before);

    let mut yes = |_: &str| true;
    assert!(s.delete_element(0, "h1", &mut yes));
    assert_eq!(s.document().page(0).unwrap().elements.len(), before - 1);
    assert!(!s.delete_element(0, "h1", &mut yes));
}

#[test]
fn gestures_are_ignored_while_folded() {
    let (mut s, _) = scene_with(Pipeline::Airplane);
    s.set_edit_mode(true);
    s.start_sequence().unwrap();
    let mut yes = |_: &str| true;
    let out = s.pointer_down(0, "h1", HitTarget::Body, Point::ZERO, &mut yes);
    assert_eq!(out, PointerOutcome::Ignored);
}

#[test]
fn panel_divider_refits_stage() {
    let (mut s, _) = scene_with(Pipeline::Airplane);
    s.resize_viewport(1900.0, 1030.0);
    assert_eq!(s.scale(), 2.0);
    // Panel grows to 500, leaving 520 for the stage.
    let scale = s.drag_panel_divider(0.0, 1020.0, 520.0);
    assert_eq!(s.panel().panel_height, 500.0);
    assert_eq!(scale, 1.0);
}

#[test]
fn teardown_clears_everything() {
    let (mut s, sink) = scene_with(Pipeline::Dinosaur);
    s.start_sequence().unwrap();
    s.teardown();
    assert_eq!(s.pending_timers(), 0);
    s.advance(Millis(10_000));
    assert_eq!(s.phase(), FoldPhase::ClosedVertical);
    assert_eq!(sink.cues(), vec![Cue::Rustle]);
}

#[test]
fn config_is_validated() {
    let (mut s, _) = scene_with(Pipeline::Airplane);
    let bad = SceneConfig {
        volume: 2.0,
        ..SceneConfig::default()
    };
    assert!(s.set_config(bad).is_err());
    assert_eq!(s.config().volume, 0.3);
}
