use crate::config::color::ColorDef;
use crate::config::legend::{LegendEntry, LegendGroup};
use crate::config::model::LegendSettings;
use crate::foundation::core::{FigureSize, Point, Rect, Vec2};

/// Height of each column's anchor box, as a figure fraction.
pub const ANCHOR_HEIGHT: f64 = 0.1;

// Spacing in units of the entry font size.
const BORDER_AXES_PAD: f64 = 0.5;
const BORDER_PAD: f64 = 0.4;
const HANDLE_LENGTH: f64 = 2.0;
const HANDLE_HEIGHT: f64 = 0.7;
const HANDLE_TEXT_PAD: f64 = 0.8;
const LABEL_SPACING: f64 = 0.5;
const LINE_HEIGHT: f64 = 1.2;

// Average glyph advance, as a fraction of the font size.
const CHAR_ADVANCE: f64 = 0.6;
const BOLD_CHAR_ADVANCE: f64 = 0.65;

/// Legend frame colors and font sizes.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LegendStyle {
    /// Frame fill.
    pub facecolor: ColorDef,
    /// Frame edge.
    pub edgecolor: ColorDef,
    /// Entry font size in points.
    pub fontsize: f64,
    /// Header font size in points.
    pub title_fontsize: f64,
}

/// One placed legend row.
#[derive(Clone, Debug, PartialEq)]
pub struct LegendRow {
    /// What to draw in the handle box.
    pub entry: LegendEntry,
    /// Handle box in figure points.
    pub handle: Rect,
    /// Label anchor (left, vertical centre).
    pub label_at: Point,
}

/// One framed legend column.
#[derive(Clone, Debug, PartialEq)]
pub struct LegendColumn {
    /// Frame in figure points (y down).
    pub frame: Rect,
    /// Bold header text.
    pub header: String,
    /// Header anchor (left, vertical centre).
    pub header_at: Point,
    /// Rows below the header.
    pub rows: Vec<LegendRow>,
}

/// Placed legend: one column per group, side by side.
#[derive(Clone, Debug, PartialEq)]
pub struct LegendLayout {
    /// Shared styling.
    pub style: LegendStyle,
    /// Columns in group order.
    pub columns: Vec<LegendColumn>,
}

impl LegendLayout {
    /// Place `groups` on a figure of `size`.
    ///
    /// Column `i` of `n` is anchored at the upper-left corner of the box
    /// `(bbox.x + i / n, bbox.y, 1 / n, 0.1)` given in figure fractions with the origin at the
    /// bottom left.
    pub fn build(groups: &[LegendGroup], settings: &LegendSettings, size: FigureSize) -> Self {
        let style = LegendStyle {
            facecolor: settings.facecolor,
            edgecolor: settings.edgecolor,
            fontsize: settings.fontsize,
            title_fontsize: settings.title_fontsize,
        };
        let (w, h) = (size.width_pt(), size.height_pt());
        let n = groups.len().max(1) as f64;
        let fs = style.fontsize;

        let columns = groups
            .iter()
            .enumerate()
            .map(|(i, group)| {
                let anchor = Point::new(
                    (settings.bbox[0] + i as f64 / n) * w,
                    (1.0 - (settings.bbox[1] + ANCHOR_HEIGHT)) * h,
                );
                place_column(group, &style, anchor + Vec2::new(BORDER_AXES_PAD * fs, BORDER_AXES_PAD * fs))
            })
            .collect();

        Self { style, columns }
    }

    /// Union of all column frames, `None` without columns.
    pub fn bounds(&self) -> Option<Rect> {
        self.columns
            .iter()
            .map(|c| c.frame)
            .reduce(|a, b| a.union(b))
    }

    /// Return `true` when there is nothing to draw.
    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }
}

/// Rough rendered width of `text` in points.
pub fn text_width(text: &str, size: f64, bold: bool) -> f64 {
    let advance = if bold { BOLD_CHAR_ADVANCE } else { CHAR_ADVANCE };
    text.chars().count() as f64 * advance * size
}

fn place_column(group: &LegendGroup, style: &LegendStyle, top_left: Point) -> LegendColumn {
    let fs = style.fontsize;
    let pad = BORDER_PAD * fs;
    let header = group.header();

    let header_h = LINE_HEIGHT * style.title_fontsize;
    let header_at = Point::new(top_left.x + pad, top_left.y + pad + 0.5 * header_h);
    let mut content_w = text_width(&header, style.title_fontsize, true);

    let mut y = top_left.y + pad + header_h;
    let mut rows = Vec::with_capacity(group.entries.len());
    for entry in &group.entries {
        y += LABEL_SPACING * fs;
        let row_h = LINE_HEIGHT * fs;
        let mid = y + 0.5 * row_h;
        let handle = Rect::new(
            top_left.x + pad,
            mid - 0.5 * HANDLE_HEIGHT * fs,
            top_left.x + pad + HANDLE_LENGTH * fs,
            mid + 0.5 * HANDLE_HEIGHT * fs,
        );
        let label_x = handle.x1 + HANDLE_TEXT_PAD * fs;
        let label_w = entry.label().map_or(0.0, |l| text_width(l, fs, false));
        content_w = content_w.max(label_x + label_w - (top_left.x + pad));

        rows.push(LegendRow {
            entry: entry.clone(),
            handle,
            label_at: Point::new(label_x, mid),
        });
        y += row_h;
    }

    let frame = Rect::new(top_left.x, top_left.y, top_left.x + content_w + 2.0 * pad, y + pad);
    LegendColumn {
        frame,
        header,
        header_at,
        rows,
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/legend.rs"]
mod tests;
