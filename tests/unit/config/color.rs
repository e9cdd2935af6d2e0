use super::*;
use serde_json::json;

fn rgba8(s: &str) -> [u8; 4] {
    ColorDef::parse(s)
        .unwrap_or_else(|e| panic!("{s}: {e}"))
        .to_rgba8()
}

#[test]
fn parses_hex_in_every_length() {
    assert_eq!(rgba8("#ff0000"), [255, 0, 0, 255]);
    assert_eq!(rgba8("#abc"), [0xaa, 0xbb, 0xcc, 255]);
    assert_eq!(rgba8("#0000ff80"), [0, 0, 255, 128]);
    assert_eq!(rgba8("#FFF"), [255, 255, 255, 255]);
}

#[test]
fn parses_css_names() {
    assert_eq!(rgba8("lightblue"), [173, 216, 230, 255]);
    assert_eq!(rgba8("darkgreen"), [0, 100, 0, 255]);
    assert_eq!(rgba8("skyblue"), [135, 206, 235, 255]);
    assert_eq!(rgba8("navy"), [0, 0, 128, 255]);
    assert_eq!(rgba8("purple"), [128, 0, 128, 255]);
    assert_eq!(rgba8("White"), [255, 255, 255, 255]);
    assert_eq!(rgba8("lightgrey"), [211, 211, 211, 255]);
}

#[test]
fn parses_single_letter_base_colors() {
    assert_eq!(rgba8("k"), [0, 0, 0, 255]);
    assert_eq!(rgba8("w"), [255, 255, 255, 255]);
    assert_eq!(rgba8("r"), [255, 0, 0, 255]);
    assert_eq!(rgba8("g"), [0, 128, 0, 255]);
    assert_eq!(rgba8("c"), [0, 191, 191, 255]);
}

#[test]
fn parses_tableau_and_cycle_colors() {
    assert_eq!(rgba8("tab:blue"), [0x1f, 0x77, 0xb4, 255]);
    assert_eq!(rgba8("tab:grey"), rgba8("tab:gray"));
    assert_eq!(rgba8("C1"), rgba8("tab:orange"));
    assert_eq!(rgba8("C9"), [0x17, 0xbe, 0xcf, 255]);

    let err = ColorDef::parse("tab:mauve").unwrap_err();
    assert!(err.contains("tab:mauve"), "{err}");
}

#[test]
fn parses_grey_levels_and_none() {
    assert_eq!(rgba8("0.5"), [128, 128, 128, 255]);
    assert_eq!(rgba8("1"), [255, 255, 255, 255]);
    assert!(ColorDef::parse("1.5").is_err());
    assert!(ColorDef::parse("none").unwrap().is_transparent());
}

#[test]
fn unknown_names_are_not_reported_as_hex() {
    let err = ColorDef::parse("chartreuse-ish").unwrap_err();
    assert!(err.contains("unknown color name"), "{err}");

    // Six letters that happen to be hex digits are still not a name.
    let err = ColorDef::parse("facade").unwrap_err();
    assert!(err.contains("unknown color name"), "{err}");

    let err = ColorDef::parse("#12").unwrap_err();
    assert!(err.contains("invalid hex color"), "{err}");
}

#[test]
fn deserializes_text_and_channel_lists() {
    let c: ColorDef = serde_json::from_value(json!("tab:red")).unwrap();
    assert_eq!(c.to_rgba8(), [0xd6, 0x27, 0x28, 255]);

    let c: ColorDef = serde_json::from_value(json!([0.25, 0.5, 0.75])).unwrap();
    assert_eq!(c, ColorDef::rgba(0.25, 0.5, 0.75, 1.0));
    let c: ColorDef = serde_json::from_value(json!([0.25, 0.5, 0.75, 0.9])).unwrap();
    assert_eq!(c, ColorDef::rgba(0.25, 0.5, 0.75, 0.9));

    assert!(serde_json::from_value::<ColorDef>(json!([0.1, 0.2])).is_err());
    assert!(serde_json::from_value::<ColorDef>(json!({"r": 1.0, "g": 0.0, "b": 0.0})).is_err());
}

#[test]
fn svg_paint_multiplies_alpha() {
    let (paint, opacity) = ColorDef::rgba(1.0, 0.5, 0.0, 0.5).svg_paint(0.5);
    assert_eq!(paint, "#ff8000");
    assert!((opacity - 0.25).abs() < 1e-9);
}
