use super::*;

const GOOD: &str = r##"{
    "primaryColor": "#112233",
    "secondaryColor": "#aabbcc",
    "accentColor": "#FF0000",
    "animationSpeed": "slow",
    "shape": "circle",
    "moodDescription": "quiet dread"
}"##;

#[test]
fn parses_camel_case_response() {
    let p = parse_director_response(GOOD).unwrap();
    assert_eq!(p.animation_speed, Speed::Slow);
    assert_eq!(p.shape, Shape::Circle);
    assert_eq!(p.accent_color, "#FF0000");
}

#[test]
fn rejects_bad_colors_and_enums() {
    let bad_color = GOOD.replace("#112233", "red");
    assert!(matches!(parse_director_response(&bad_color), Err(SceneError::Validation(_))));
    let bad_speed = GOOD.replace("\"slow\"", "\"warp\"");
    assert!(matches!(parse_director_response(&bad_speed), Err(SceneError::Serde(_))));
}

#[test]
fn empty_body_is_no_result() {
    assert!(interpret_response(None).unwrap().is_none());
    assert!(interpret_response(Some("  ")).unwrap().is_none());
    assert!(interpret_response(Some(GOOD)).unwrap().is_some());
    assert!(matches!(interpret_response(Some("{}")), Err(DirectorError::Rejected(_))));
}

struct Offline;

impl Director for Offline {
    fn direct(&mut self, _prompt: &str) -> Result<Option<DirectorParams>, DirectorError> {
        Err(DirectorError::Transport("connection refused".to_owned()))
    }
}

#[test]
fn transport_failure_is_distinct() {
    let err = Offline.direct("a rainy rooftop").unwrap_err();
    assert_eq!(err.to_string(), "director transport error: connection refused");
}
