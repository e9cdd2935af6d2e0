use super::*;
use crate::config::model::LegendSettings;
use crate::render::primitive::{PolarPoint, Primitive};

fn label(layer: Layer, sector: &str) -> DrawCall {
    DrawCall {
        layer,
        sector: sector.to_owned(),
        track: None,
        primitive: Primitive::Label {
            at: PolarPoint::new(0.0, 26.0),
            text: sector.to_owned(),
            size: 15.0,
            color: ColorDef::rgba(0.0, 0.0, 0.0, 1.0),
        },
    }
}

fn empty_legend(size: FigureSize) -> LegendLayout {
    let settings = LegendSettings {
        bbox: [0.0, 0.0],
        facecolor: ColorDef::WHITE,
        edgecolor: ColorDef::rgba(0.0, 0.0, 0.0, 1.0),
        fontsize: 10.0,
        title_fontsize: 12.0,
    };
    LegendLayout::build(&[], &settings, size)
}

#[test]
fn calls_are_sorted_by_layer_keeping_emission_order() {
    let size = FigureSize::new(4.0, 4.0).unwrap();
    let calls = vec![
        label(Layer::Text, "a"),
        label(Layer::Background, "b"),
        label(Layer::Text, "c"),
        label(Layer::Decoration, "d"),
        label(Layer::Background, "e"),
    ];
    let fig = Figure::new(size, ColorDef::WHITE, calls, empty_legend(size), None);
    let order: Vec<_> = fig.calls().iter().map(|c| c.sector.as_str()).collect();
    assert_eq!(order, ["b", "e", "d", "a", "c"]);
    assert_eq!(fig.calls_on(Layer::Text).count(), 2);
}

#[test]
fn content_bounds_is_page_without_legend() {
    let size = FigureSize::new(4.0, 3.0).unwrap();
    let fig = Figure::new(size, ColorDef::WHITE, Vec::new(), empty_legend(size), None);
    assert_eq!(fig.content_bounds(), Rect::new(0.0, 0.0, 288.0, 216.0));
    assert!(fig.center_image().is_none());
}
