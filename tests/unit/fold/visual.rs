use super::*;

fn config() -> SceneConfig {
    SceneConfig {
        fold_duration: Millis(900),
        lighting: 0.8,
        ..SceneConfig::default()
    }
}

#[test]
fn book_phases_render_the_book() {
    let v = derive_visual(FoldPhase::Reading, &config());
    assert_eq!(v.shape, FoldShape::Book { closed: false });
    assert_eq!(v.brightness, 0.8);
    let v = derive_visual(FoldPhase::ClosedVertical, &config());
    assert_eq!(v.shape, FoldShape::Book { closed: true });
}

#[test]
fn airplane_folds_accumulate() {
    let FoldShape::Airplane(f1) = derive_visual(FoldPhase::Airplane(AirplanePhase::Folding1), &config()).shape
    else {
        panic!("expected airplane");
    };
    assert_eq!(f1.corner_fold_deg, -179.0);
    assert_eq!(f1.spine_deg, 0.0);
    assert_eq!(f1.wing_deg, 0.0);

    let flying = derive_visual(FoldPhase::Airplane(AirplanePhase::Flying), &config());
    assert_eq!(flying.transition, FLIGHT_DURATION);
    let FoldShape::Airplane(f) = flying.shape else {
        panic!("expected airplane");
    };
    assert_eq!(f.spine_deg, 90.0);
    assert_eq!(f.wing_deg, -75.0);
    assert_eq!(f.flight, FlightPose::AWAY);
}

#[test]
fn ball_is_tossed_quickly() {
    let v = derive_visual(FoldPhase::Ball(BallPhase::Crumpling), &config());
    assert_eq!(v.transition, Millis(900));
    let v = derive_visual(FoldPhase::Ball(BallPhase::Trashed), &config());
    assert_eq!(v.transition, TOSS_DURATION);
    let FoldShape::Ball(b) = v.shape else {
        panic!("expected ball");
    };
    assert_eq!(b.pose.translate, [800.0, 400.0, 0.0]);
    assert_eq!(b.pose.scale, 0.1);
}

#[test]
fn dinosaur_grows_neck_then_head_then_legs() {
    let dino = |p| match derive_visual(FoldPhase::Dino(p), &config()).shape {
        FoldShape::Dino(d) => d,
        other => panic!("unexpected {other:?}"),
    };
    assert_eq!(dino(DinoPhase::Base).neck_deg, 130.0);
    assert_eq!(dino(DinoPhase::Neck).neck_deg, -20.0);
    assert_eq!(dino(DinoPhase::Neck).head.scale, 0.0);
    assert_eq!(dino(DinoPhase::Head).head.scale, 1.0);
    assert_eq!(dino(DinoPhase::Head).legs_opacity, 0.0);
    let done = dino(DinoPhase::Done);
    assert_eq!(done.legs_opacity, 1.0);
    assert_eq!(done.pose.scale, 0.6);
}

#[test]
fn table_rests_tilted() {
    let FoldShape::Table(t) = derive_visual(FoldPhase::Table(TablePhase::OnTable), &config()).shape else {
        panic!("expected table");
    };
    assert_eq!(t.prop.rotate_deg, [70.0, 0.0, -10.0]);
    assert_eq!(t.prop.translate, [0.0, 100.0, -100.0]);
    assert_eq!(t.flap_deg, -179.0);
}
