use super::*;
use serde_json::json;

fn colors() -> ColorRegistry {
    ColorRegistry::from_value(&json!({
        "flow": { "env": "#1f77b4", "mean": "#000000" },
        "decision": { "spill": "#ff0000" }
    }))
    .unwrap()
}

#[test]
fn infill_resolves_color_and_defaults() {
    let tracks = resolve_track_entry(
        "spill",
        json!({"type": "infill", "r_start": 70, "r_end": 80, "color": "decision.spill", "months": ["Jan"]}),
        &colors(),
    )
    .unwrap();
    assert_eq!(tracks.len(), 1);
    let t = &tracks[0];
    assert_eq!(t.name, "spill");
    assert_eq!(t.type_name(), "infill");
    assert!(t.applies_to("Jan"));
    assert!(!t.applies_to("Feb"));
    match &t.kind {
        TrackKind::Infill { band, color, alpha } => {
            assert_eq!(band.lim(), (70.0, 80.0));
            assert_eq!(*color, ColorDef::rgba(1.0, 0.0, 0.0, 1.0));
            assert_eq!(*alpha, 1.0);
        }
        other => panic!("unexpected kind {other:?}"),
    }
}

#[test]
fn list_entries_are_suffixed_and_kept_in_order() {
    let tracks = resolve_track_entry(
        "ops",
        json!([
            {"type": "line", "r_start": 50, "r_end": 51, "color": "flow.mean", "linestyle": "--"},
            {"type": "arrow", "r_start": 52, "r_end": 56, "color": "flow.env"}
        ]),
        &colors(),
    )
    .unwrap();
    assert_eq!(tracks[0].name, "ops[0]");
    assert_eq!(tracks[1].name, "ops[1]");
    match &tracks[0].kind {
        TrackKind::Line { stroke, .. } => assert_eq!(stroke.style, LineStyle::Dashed),
        other => panic!("unexpected kind {other:?}"),
    }
    match &tracks[1].kind {
        TrackKind::Arrow {
            alpha,
            shaft_ratio,
            head_length,
            ..
        } => {
            assert_eq!(*alpha, 0.7);
            assert_eq!(*shaft_ratio, 0.3);
            assert_eq!(*head_length, 0.0);
        }
        other => panic!("unexpected kind {other:?}"),
    }
}

#[test]
fn unknown_type_names_track_and_type() {
    let err = resolve_track_entry(
        "weird",
        json!({"type": "spiral", "r_start": 1, "r_end": 2, "color": "flow.env"}),
        &colors(),
    )
    .unwrap_err();
    assert!(matches!(err, CalendarError::Config(_)));
    let msg = err.to_string();
    assert!(msg.contains("weird"));
    assert!(msg.contains("spiral"));
}

#[test]
fn unresolvable_color_fails_at_load() {
    let err = resolve_track_entry(
        "spill",
        json!({"type": "infill", "r_start": 70, "r_end": 80, "color": "decision.nope"}),
        &colors(),
    )
    .unwrap_err();
    assert!(err.to_string().contains("decision.nope"));
    assert!(err.to_string().contains("spill"));
}

#[test]
fn marker_requires_point_for_each_month() {
    let err = resolve_track_entry(
        "gauge",
        json!({
            "type": "marker", "color": "flow.mean", "months": ["Jan", "Feb"],
            "r_points": {"Jan": 40}, "position": 15, "marker": "o"
        }),
        &colors(),
    )
    .unwrap_err();
    assert!(err.to_string().contains("'Feb'"));
}

#[test]
fn data_plot_line_color_defaults_to_fill() {
    let tracks = resolve_track_entry(
        "flow",
        json!({"type": "data_plot", "r_start": 30, "r_end": 60, "source": "streamflow", "color": "flow.env"}),
        &colors(),
    )
    .unwrap();
    match &tracks[0].kind {
        TrackKind::DataPlot {
            fill, line, alpha, ..
        } => {
            assert_eq!(fill, line);
            assert_eq!(*alpha, 0.4);
        }
        other => panic!("unexpected kind {other:?}"),
    }
}

#[test]
fn inverted_band_is_rejected() {
    let err = resolve_track_entry(
        "bad",
        json!({"type": "infill", "r_start": 80, "r_end": 70, "color": "flow.env"}),
        &colors(),
    )
    .unwrap_err();
    assert!(err.to_string().contains("invalid radial band"));
}

#[test]
fn band_scales_unit_values() {
    let band = RadialBand::new(30.0, 60.0).unwrap();
    assert_eq!(band.scale(0.0), 30.0);
    assert_eq!(band.scale(1.0), 60.0);
    assert_eq!(band.scale(0.5), 45.0);
}
