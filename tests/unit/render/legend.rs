use super::*;
use crate::config::style::{LineStyle, MarkerShape};
use crate::config::track::StrokeStyle;

fn settings() -> LegendSettings {
    LegendSettings {
        bbox: [0.0, -0.1],
        facecolor: ColorDef::WHITE,
        edgecolor: ColorDef::rgba(0.0, 0.0, 0.0, 1.0),
        fontsize: 10.0,
        title_fontsize: 12.0,
    }
}

fn red() -> ColorDef {
    ColorDef::rgba(1.0, 0.0, 0.0, 1.0)
}

fn groups() -> Vec<LegendGroup> {
    vec![
        LegendGroup {
            name: "Reservoir_Ops".to_owned(),
            entries: vec![
                LegendEntry::Patch {
                    label: "Spill".to_owned(),
                    color: red(),
                },
                LegendEntry::Space,
                LegendEntry::Line {
                    label: "Flood control".to_owned(),
                    color: red(),
                    stroke: StrokeStyle {
                        width: 2.0,
                        style: LineStyle::Dashed,
                    },
                },
            ],
        },
        LegendGroup {
            name: "Events".to_owned(),
            entries: vec![LegendEntry::Marker {
                label: "Survey".to_owned(),
                color: red(),
                shape: MarkerShape::Star,
                size: 10.0,
                linewidth: 1.0,
            }],
        },
    ]
}

#[test]
fn columns_are_anchored_side_by_side() {
    let size = FigureSize::new(10.0, 10.0).unwrap();
    let layout = LegendLayout::build(&groups(), &settings(), size);
    assert_eq!(layout.columns.len(), 2);

    // bbox y = -0.1 puts the anchor top on the figure's bottom edge.
    let first = &layout.columns[0];
    assert!((first.frame.x0 - 5.0).abs() < 1e-9);
    assert!((first.frame.y0 - 725.0).abs() < 1e-9);

    let second = &layout.columns[1];
    assert!((second.frame.x0 - (360.0 + 5.0)).abs() < 1e-9);
    assert_eq!(second.frame.y0, first.frame.y0);
}

#[test]
fn header_and_rows_are_stacked_inside_frame() {
    let size = FigureSize::new(8.0, 6.0).unwrap();
    let layout = LegendLayout::build(&groups(), &settings(), size);
    let col = &layout.columns[0];

    assert_eq!(col.header, "Reservoir Ops:");
    assert_eq!(col.rows.len(), 3);
    assert!(col.header_at.y < col.rows[0].label_at.y);
    for pair in col.rows.windows(2) {
        assert!(pair[0].label_at.y < pair[1].label_at.y);
    }
    for row in &col.rows {
        assert!(col.frame.contains(row.handle.origin()));
        assert!(row.handle.x1 < row.label_at.x);
    }
    let last = col.rows.last().unwrap();
    let label_end = last.label_at.x + text_width("Flood control", 10.0, false);
    assert!(label_end <= col.frame.x1);
    assert!(last.handle.y1 <= col.frame.y1);
}

#[test]
fn bounds_cover_every_column() {
    let size = FigureSize::new(10.0, 10.0).unwrap();
    let layout = LegendLayout::build(&groups(), &settings(), size);
    let bounds = layout.bounds().unwrap();
    for col in &layout.columns {
        assert_eq!(bounds.union(col.frame), bounds);
    }
    assert!(LegendLayout::build(&[], &settings(), size).bounds().is_none());
}
