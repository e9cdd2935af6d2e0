use crate::config::color::ColorDef;
use crate::config::legend::LegendEntry;
use crate::config::style::LineStyle;
use crate::foundation::core::{BezPath, Point, Rect};
use crate::render::figure::Figure;
use crate::render::glyph::{area_to_diameter, marker_path};
use crate::render::legend::{LegendColumn, LegendStyle};
use crate::render::polar::PolarFrame;
use crate::render::primitive::{Paint, Primitive, Stroke};

const FONT_FAMILY: &str = "DejaVu Sans, Arial, Helvetica, sans-serif";
const LEGEND_FRAME_ALPHA: f64 = 0.8;
const LEGEND_FRAME_WIDTH: f64 = 0.8;
const LEGEND_PATCH_ALPHA: f64 = 0.5;

/// What the SVG document is produced for.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SvgTarget {
    /// Stand-alone file: painted background and a linked center image.
    Document,
    /// Rasterizer input: transparent background, no center image (painted beneath beforehand).
    Raster,
}

/// Serialize `figure` as an SVG document in point units.
///
/// The view box covers [`Figure::content_bounds`], so a legend placed outside the figure
/// rectangle is kept.
pub fn figure_to_svg(figure: &Figure, target: SvgTarget) -> String {
    let bounds = figure.content_bounds();
    let frame = figure.frame();

    let mut out = String::with_capacity(64 * 1024);
    out.push_str(&format!(
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="{x} {y} {w} {h}">"#,
        x = num(bounds.x0),
        y = num(bounds.y0),
        w = num(bounds.width()),
        h = num(bounds.height()),
    ));
    out.push('\n');

    if target == SvgTarget::Document {
        out.push_str(&rect_element(bounds, Some((figure.facecolor(), 1.0)), None));
        if let Some(img) = figure.center_image() {
            let side = img.size_frac * figure.size().width_pt().min(figure.size().height_pt());
            out.push_str(&format!(
                r#"<image href="{}" x="{}" y="{}" width="{s}" height="{s}" preserveAspectRatio="xMidYMid meet"/>"#,
                escape(&img.path.to_string_lossy()),
                num(frame.center.x - 0.5 * side),
                num(frame.center.y - 0.5 * side),
                s = num(side),
            ));
            out.push('\n');
        }
    }

    for call in figure.calls() {
        out.push_str(&primitive_element(&frame, &call.primitive));
    }

    let legend = figure.legend();
    for column in &legend.columns {
        out.push_str(&legend_column(column, &legend.style));
    }

    out.push_str("</svg>\n");
    out
}

/// Rotation in degrees that keeps a tangential label upright at `theta`.
pub fn upright_rotation(theta: f64) -> f64 {
    let t = theta.rem_euclid(360.0);
    if t > 90.0 && t < 270.0 { t - 180.0 } else { t }
}

fn primitive_element(frame: &PolarFrame, primitive: &Primitive) -> String {
    match primitive {
        Primitive::Wedge {
            theta,
            r,
            fill,
            stroke,
        } => path_element(
            &frame.wedge(*theta, *r),
            fill.map(|p| (p.color, p.alpha)),
            stroke.as_ref(),
        ),
        Primitive::Arrow {
            theta,
            r,
            shaft_ratio,
            head_deg,
            fill,
            stroke,
        } => path_element(
            &frame.arrow(*theta, *r, *shaft_ratio, *head_deg),
            Some(paint(fill)),
            Some(stroke),
        ),
        Primitive::Polyline { points, stroke } => {
            path_element(&frame.polyline(points), None, Some(stroke))
        }
        Primitive::Band { lower, upper, fill } => {
            path_element(&frame.band(lower, upper), Some(paint(fill)), None)
        }
        Primitive::Marker {
            at,
            shape,
            size,
            color,
            linewidth,
            ..
        } => {
            let glyph = marker_path(*shape, frame.point(*at), area_to_diameter(*size));
            let edge = Stroke {
                color: *color,
                alpha: 1.0,
                width: *linewidth,
                style: LineStyle::Solid,
            };
            let fill = shape.is_filled().then_some((*color, 1.0));
            path_element(&glyph, fill, Some(&edge))
        }
        Primitive::Label {
            at,
            text,
            size,
            color,
        } => {
            let p = frame.point(*at);
            text_element(
                p,
                text,
                *size,
                *color,
                TextAlign::Middle,
                false,
                Some(upright_rotation(at.theta)),
            )
        }
    }
}

fn legend_column(column: &LegendColumn, style: &LegendStyle) -> String {
    let mut out = rect_element(
        column.frame,
        Some((style.facecolor, LEGEND_FRAME_ALPHA)),
        Some(&Stroke {
            color: style.edgecolor,
            alpha: 1.0,
            width: LEGEND_FRAME_WIDTH,
            style: LineStyle::Solid,
        }),
    );
    out.push_str(&text_element(
        column.header_at,
        &column.header,
        style.title_fontsize,
        ColorDef::rgba(0.0, 0.0, 0.0, 1.0),
        TextAlign::Start,
        true,
        None,
    ));

    for row in &column.rows {
        let h = row.handle;
        let mid = 0.5 * (h.y0 + h.y1);
        match &row.entry {
            LegendEntry::Patch { color, .. } => {
                out.push_str(&rect_element(h, Some((*color, LEGEND_PATCH_ALPHA)), None));
            }
            LegendEntry::Line { color, stroke, .. } | LegendEntry::Arrow { color, stroke, .. } => {
                let mut line = BezPath::new();
                line.move_to((h.x0, mid));
                line.line_to((h.x1, mid));
                let stroke = Stroke {
                    color: *color,
                    alpha: 1.0,
                    width: stroke.width,
                    style: stroke.style,
                };
                out.push_str(&path_element(&line, None, Some(&stroke)));
            }
            LegendEntry::Marker {
                color,
                shape,
                size,
                linewidth,
                ..
            } => {
                let glyph = marker_path(*shape, h.center(), *size);
                let edge = Stroke {
                    color: *color,
                    alpha: 1.0,
                    width: *linewidth,
                    style: LineStyle::Solid,
                };
                let fill = shape.is_filled().then_some((*color, 1.0));
                out.push_str(&path_element(&glyph, fill, Some(&edge)));
            }
            LegendEntry::Space => {}
        }
        if let Some(label) = row.entry.label() {
            out.push_str(&text_element(
                row.label_at,
                label,
                style.fontsize,
                ColorDef::rgba(0.0, 0.0, 0.0, 1.0),
                TextAlign::Start,
                false,
                None,
            ));
        }
    }
    out
}

#[derive(Clone, Copy)]
enum TextAlign {
    Start,
    Middle,
}

fn text_element(
    at: Point,
    text: &str,
    size: f64,
    color: ColorDef,
    align: TextAlign,
    bold: bool,
    rotate: Option<f64>,
) -> String {
    let (fill, opacity) = color.svg_paint(1.0);
    let anchor = match align {
        TextAlign::Start => "start",
        TextAlign::Middle => "middle",
    };
    let weight = if bold { r#" font-weight="bold""# } else { "" };
    let transform = rotate
        .map(|deg| {
            format!(
                r#" transform="rotate({} {} {})""#,
                num(deg),
                num(at.x),
                num(at.y)
            )
        })
        .unwrap_or_default();
    format!(
        r#"<text x="{}" y="{}" font-family="{FONT_FAMILY}" font-size="{}"{weight} text-anchor="{anchor}" dominant-baseline="central" fill="{fill}" fill-opacity="{}"{transform}>{}</text>"#,
        num(at.x),
        num(at.y),
        num(size),
        num(opacity),
        escape(text),
    ) + "\n"
}

fn path_element(path: &BezPath, fill: Option<(ColorDef, f64)>, stroke: Option<&Stroke>) -> String {
    if path.elements().is_empty() {
        return String::new();
    }
    format!(
        r#"<path d="{}"{}{}/>"#,
        path.to_svg(),
        fill_attrs(fill),
        stroke_attrs(stroke)
    ) + "\n"
}

fn rect_element(rect: Rect, fill: Option<(ColorDef, f64)>, stroke: Option<&Stroke>) -> String {
    format!(
        r#"<rect x="{}" y="{}" width="{}" height="{}"{}{}/>"#,
        num(rect.x0),
        num(rect.y0),
        num(rect.width()),
        num(rect.height()),
        fill_attrs(fill),
        stroke_attrs(stroke)
    ) + "\n"
}

fn paint(p: &Paint) -> (ColorDef, f64) {
    (p.color, p.alpha)
}

fn fill_attrs(fill: Option<(ColorDef, f64)>) -> String {
    match fill {
        Some((color, alpha)) if !color.is_transparent() => {
            let (c, o) = color.svg_paint(alpha);
            format!(r#" fill="{c}" fill-opacity="{}""#, num(o))
        }
        _ => r#" fill="none""#.to_owned(),
    }
}

fn stroke_attrs(stroke: Option<&Stroke>) -> String {
    let Some(s) = stroke.filter(|s| !s.color.is_transparent() && s.width > 0.0) else {
        return r#" stroke="none""#.to_owned();
    };
    let (c, o) = s.color.svg_paint(s.alpha);
    let mut attrs = format!(
        r#" stroke="{c}" stroke-opacity="{}" stroke-width="{}" stroke-linejoin="round""#,
        num(o),
        num(s.width)
    );
    if let Some(dashes) = s.style.dash_array(s.width) {
        let list: Vec<String> = dashes.into_iter().map(num).collect();
        attrs.push_str(&format!(r#" stroke-dasharray="{}""#, list.join(" ")));
    }
    attrs
}

fn num(v: f64) -> String {
    let s = format!("{v:.3}");
    let s = s.trim_end_matches('0').trim_end_matches('.');
    if s == "-0" { "0".to_owned() } else { s.to_owned() }
}

/// Escape text for use in XML character data and attribute values.
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            c => out.push(c),
        }
    }
    out
}

#[cfg(test)]
#[path = "../../tests/unit/render/svg.rs"]
mod tests;
