use super::*;

#[test]
fn defaults_match_flying_scene() {
    let cfg = SceneConfig::default();
    assert_eq!(cfg.fold_duration, Millis(1000));
    assert_eq!(cfg.turn_duration, Millis(1000));
    assert_eq!(cfg.volume, 0.3);
    assert!(!cfg.is_muted);
    assert_eq!(cfg.paper_color, "#f4f1ea");
    assert_eq!(cfg.font_style, FontStyle::Classic);
    assert_eq!(cfg.publication_title, "THE DAILY FOLD");
    cfg.validate().unwrap();
}

#[test]
fn json_missing_fields_take_defaults() {
    let cfg = SceneConfig::from_reader(r#"{"foldDuration": 2500, "fontStyle": "typewriter"}"#.as_bytes())
        .unwrap();
    assert_eq!(cfg.fold_duration, Millis(2500));
    assert_eq!(cfg.turn_duration, Millis(1000));
    assert_eq!(cfg.font_style, FontStyle::Typewriter);
}

#[test]
fn validate_rejects_out_of_range_values() {
    let cfg = SceneConfig {
        volume: 1.5,
        ..SceneConfig::default()
    };
    assert!(cfg.validate().is_err());

    let cfg = SceneConfig {
        fold_duration: Millis(0),
        ..SceneConfig::default()
    };
    assert!(cfg.validate().is_err());

    let cfg = SceneConfig {
        paper_color: "f4f1ea".to_string(),
        ..SceneConfig::default()
    };
    assert!(cfg.validate().is_err());

    let cfg = SceneConfig {
        lighting: 0.0,
        ..SceneConfig::default()
    };
    assert!(cfg.validate().is_err());
}

#[test]
fn audibility_follows_mute_and_volume() {
    let mut cfg = SceneConfig::default();
    assert!(cfg.is_audible());
    cfg.volume = 0.0;
    assert!(!cfg.is_audible());
    cfg.volume = 0.5;
    cfg.is_muted = true;
    assert!(!cfg.is_audible());
}

#[test]
fn hex_colors_parse() {
    assert_eq!(parse_hex_rgb("#f4f1ea").unwrap(), [0xf4, 0xf1, 0xea]);
    assert!(parse_hex_rgb("#zzzzzz").is_err());
    assert!(parse_hex_rgb("#fff").is_err());
}
