use super::*;

#[test]
fn defaults_cover_every_algorithm() {
    let cfg = VizConfig::default();
    for a in Algorithm::ALL {
        assert!(cfg.visualizers.contains_key(a), "missing {}", a.as_str());
    }
    assert_eq!(cfg.settings(Algorithm::Factorial).max_input, 12);
    assert_eq!(cfg.settings(Algorithm::BinarySearch).speed_ms, 1500);
    assert_eq!(cfg.settings(Algorithm::LinkedList).max_input, 9);
    cfg.validate().unwrap();
}

#[test]
fn partial_json_overrides_only_named_entries() {
    let cfg = VizConfig::from_json_str(
        r#"{ "visualizers": { "bubble-sort": { "max_input": 30, "speed_ms": 50 } } }"#,
    )
    .unwrap();
    assert_eq!(
        cfg.settings(Algorithm::BubbleSort),
        VisualizerSettings {
            max_input: 30,
            speed_ms: 50
        }
    );
    assert_eq!(cfg.settings(Algorithm::QuickSort).speed_ms, 500);
}

#[test]
fn zero_values_are_rejected() {
    let err = VizConfig::from_json_str(
        r#"{ "visualizers": { "stack": { "max_input": 0, "speed_ms": 10 } } }"#,
    )
    .unwrap_err();
    assert!(matches!(err, VizError::InvalidInput(_)));

    let err = VizConfig::from_json_str(
        r#"{ "visualizers": { "stack": { "max_input": 3, "speed_ms": 0 } } }"#,
    )
    .unwrap_err();
    assert!(err.to_string().contains("speed_ms"));
}

#[test]
fn dump_round_trips() {
    let cfg = VizConfig::default();
    let json = cfg.to_json_pretty().unwrap();
    assert_eq!(VizConfig::from_json_str(&json).unwrap(), cfg);
}

#[test]
fn missing_file_is_reported() {
    let err = VizConfig::from_path(Path::new("definitely/not/here.json")).unwrap_err();
    assert!(matches!(err, VizError::Other(_)));
}
