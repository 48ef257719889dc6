use super::*;

#[test]
fn minimal_config_takes_defaults() {
    let cfg = RetimeConfig::from_reader(r#"{ "frame_count": 142 }"#.as_bytes()).unwrap();
    assert_eq!(cfg, RetimeConfig::new(142));
    assert_eq!(cfg.curve.spec(), CurvePreset::EaseIn.spec());
    assert_eq!(cfg.interval_ms, 35);
    cfg.validate().unwrap();
}

#[test]
fn preset_and_modes_parse_from_snake_case() {
    let json = r#"{
        "frame_count": 10,
        "curve": "ease_in_out",
        "extend_mode": "freeze",
        "rounding": "half_even",
        "frames": { "dir": "src" }
    }"#;
    let cfg = RetimeConfig::from_reader(json.as_bytes()).unwrap();
    assert_eq!(cfg.curve, CurveSelection::Preset(CurvePreset::EaseInOut));
    assert_eq!(cfg.extend_mode, ExtendMode::Freeze);
    assert_eq!(cfg.rounding, RoundingMode::HalfEven);
    assert_eq!(cfg.frames.unwrap().pattern, "{index}.png");
}

#[test]
fn custom_curve_points_parse() {
    let json = r#"{
        "frame_count": 4,
        "curve": {
            "p0": { "x": 0, "y": 100 },
            "c1": { "x": 10, "y": 0 },
            "c2": { "x": 100, "y": 0 },
            "p1": { "x": 100, "y": 0 }
        },
        "baseline": { "start": { "x": 0, "y": 100 }, "end": { "x": 100, "y": 0 } }
    }"#;
    let cfg = RetimeConfig::from_reader(json.as_bytes()).unwrap();
    let spec = cfg.curve.spec();
    assert_eq!(spec.c1, Point::new(10.0, 0.0));
    assert_eq!(cfg.baseline.end, Point::new(100.0, 0.0));
}

#[test]
fn unknown_fields_are_rejected() {
    let err = RetimeConfig::from_reader(r#"{ "frame_count": 3, "fps": 30 }"#.as_bytes())
        .unwrap_err();
    assert!(matches!(err, RetimeError::Serde(_)));
}

#[test]
fn validate_catches_ranges() {
    assert!(RetimeConfig::new(0).validate().is_err());

    let mut cfg = RetimeConfig::new(3);
    cfg.interval_ms = 0;
    assert!(cfg.validate().is_err());

    let mut cfg = RetimeConfig::new(3);
    cfg.frames = Some(FrameSource {
        dir: "frames".to_string(),
        pattern: "frame.png".to_string(),
    });
    assert!(cfg.validate().is_err());
}

#[test]
fn config_serializes_back_to_equal_value() {
    let mut cfg = RetimeConfig::new(8);
    cfg.curve = CurveSelection::Custom(CurvePreset::EaseInOut.spec());
    let json = serde_json::to_string(&cfg).unwrap();
    assert_eq!(RetimeConfig::from_reader(json.as_bytes()).unwrap(), cfg);
}

#[test]
fn missing_file_is_a_validation_error() {
    let err = RetimeConfig::from_path("target/definitely/missing.json").unwrap_err();
    assert!(err.to_string().contains("open retime config"));
}

#[test]
fn hold_extend_mode_parses() {
    let cfg =
        RetimeConfig::from_reader(r#"{ "frame_count": 6, "extend_mode": "hold" }"#.as_bytes())
            .unwrap();
    assert_eq!(cfg.extend_mode, ExtendMode::Hold);
}
