use super::*;
use serde_json::json;

fn sample() -> ColorRegistry {
    ColorRegistry::from_value(&json!({
        "background": "#ffffff",
        "decision": {
            "spill": "#1f77b4",
            "hold": [0.5, 0.5, 0.5],
            "ops": { "release": "r" }
        }
    }))
    .unwrap()
}

#[test]
fn key_parse_splits_on_last_dot() {
    assert_eq!(
        ColorKey::parse("decision.ops.release").unwrap(),
        ColorKey::new("decision.ops", "release")
    );
    assert_eq!(ColorKey::parse("background").unwrap(), ColorKey::new("", "background"));
    assert!(ColorKey::parse("a..b").is_err());
    assert!(ColorKey::parse("").is_err());
}

#[test]
fn flattens_nested_groups() {
    let reg = sample();
    assert_eq!(reg.len(), 4);
    assert_eq!(reg.resolve("background").unwrap(), ColorDef::WHITE);
    assert_eq!(
        reg.resolve("decision.hold").unwrap(),
        ColorDef::rgba(0.5, 0.5, 0.5, 1.0)
    );
    assert_eq!(
        reg.resolve("decision.ops.release").unwrap(),
        ColorDef::rgba(1.0, 0.0, 0.0, 1.0)
    );
}

#[test]
fn unknown_and_group_keys_are_config_errors() {
    let reg = sample();
    let err = reg.resolve("decision.nope").unwrap_err();
    assert!(matches!(err, CalendarError::Config(_)));
    assert!(err.to_string().contains("decision.nope"));

    let err = reg.resolve("decision.ops").unwrap_err();
    assert!(err.to_string().contains("does not resolve to a color"));
}

#[test]
fn bad_leaf_names_its_path() {
    let err = ColorRegistry::from_value(&json!({"flows": {"high": "#12"}})).unwrap_err();
    assert!(err.to_string().contains("colors.flows.high"));

    let err = ColorRegistry::from_value(&json!({"flows": 3})).unwrap_err();
    assert!(err.to_string().contains("colors.flows"));
}

#[test]
fn dotted_color_names_are_rejected() {
    let err = ColorRegistry::from_value(&json!({"a": {"b.c": "#fff"}})).unwrap_err();
    assert!(matches!(err, CalendarError::Config(_)));
    assert!(err.to_string().contains("'b.c'"), "{err}");

    let err = ColorRegistry::from_value(&json!({"x.y": "red"})).unwrap_err();
    assert!(err.to_string().contains("'x.y'"), "{err}");
}

#[test]
fn leaves_accept_plot_color_spellings() {
    let reg = ColorRegistry::from_value(&json!({
        "ops": { "spill": "tab:blue", "hold": "k", "low": "lightblue", "pale": "#abc" }
    }))
    .unwrap();
    assert_eq!(reg.len(), 4);
    assert_eq!(reg.resolve("ops.hold").unwrap().to_rgba8(), [0, 0, 0, 255]);
    assert_eq!(reg.resolve("ops.pale").unwrap().to_rgba8(), [0xaa, 0xbb, 0xcc, 255]);
}
