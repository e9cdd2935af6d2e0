use crate::config::color::ColorDef;
use crate::config::model::SectorLabelSettings;
use crate::config::style::LineStyle;
use crate::config::track::{TrackConfig, TrackKind};
use crate::foundation::error::{CalendarError, CalendarResult};
use crate::layout::sector::Sector;
use crate::render::primitive::{DrawCall, Layer, Paint, PolarPoint, Primitive, Stroke};
use crate::stats::daily::DailyStatsTable;

/// Outer radius of the sector outline.
pub const OUTLINE_RADIUS: f64 = 100.0;

/// Radial height of the band framing a marker glyph.
pub const MARKER_BAND: f64 = 2.0;

/// Emit the draw calls for one track in one sector.
///
/// Returns no calls when the sector is not among the track's months, or when a data track's
/// statistics table is `None`.
pub fn render_track(
    sector: &Sector,
    track: &TrackConfig,
    stats: Option<&DailyStatsTable>,
) -> CalendarResult<Vec<DrawCall>> {
    if !track.applies_to(sector.name()) {
        return Ok(Vec::new());
    }

    let call = |layer: Layer, primitive: Primitive| DrawCall {
        layer,
        sector: sector.name().to_owned(),
        track: Some(track.name.clone()),
        primitive,
    };
    let theta = (sector.start_deg, sector.end_deg);

    let calls = match &track.kind {
        TrackKind::Infill { band, color, alpha } => vec![call(
            Layer::Decoration,
            Primitive::Wedge {
                theta,
                r: band.lim(),
                fill: Some(Paint {
                    color: *color,
                    alpha: *alpha,
                }),
                stroke: None,
            },
        )],
        TrackKind::Arrow {
            band,
            color,
            alpha,
            stroke,
            shaft_ratio,
            head_length,
        } => {
            let head_deg = (head_length / sector.size() * sector.extent_deg())
                .clamp(0.0, sector.extent_deg());
            vec![call(
                Layer::Decoration,
                Primitive::Arrow {
                    theta,
                    r: band.lim(),
                    shaft_ratio: *shaft_ratio,
                    head_deg,
                    fill: Paint {
                        color: *color,
                        alpha: *alpha,
                    },
                    stroke: Stroke {
                        color: *color,
                        alpha: *alpha,
                        width: stroke.width,
                        style: stroke.style,
                    },
                },
            )]
        }
        TrackKind::Line {
            band,
            color,
            stroke,
        } => vec![call(
            Layer::Decoration,
            Primitive::Polyline {
                points: vec![
                    PolarPoint::new(sector.start_deg, band.r_start),
                    PolarPoint::new(sector.end_deg, band.r_start),
                ],
                stroke: Stroke {
                    color: *color,
                    alpha: 1.0,
                    width: stroke.width,
                    style: stroke.style,
                },
            },
        )],
        TrackKind::Marker {
            color,
            r_points,
            position,
            shape,
            size,
            linewidth,
        } => {
            let point = *r_points.get(sector.name()).ok_or_else(|| {
                CalendarError::config(format!(
                    "track '{}': r_points has no entry for month '{}'",
                    track.name,
                    sector.name()
                ))
            })?;
            vec![call(
                Layer::Marker,
                Primitive::Marker {
                    at: PolarPoint::new(sector.theta(*position), point),
                    r_lim: (point - MARKER_BAND, point),
                    shape: *shape,
                    size: *size,
                    color: *color,
                    linewidth: *linewidth,
                },
            )]
        }
        TrackKind::DataPlot {
            band,
            source,
            fill,
            line,
            alpha,
            linewidth,
        } => {
            let Some(table) = stats else {
                tracing::warn!(
                    track = %track.name,
                    source = %source,
                    sector = sector.name(),
                    "statistics table not loaded; data track skipped"
                );
                return Ok(Vec::new());
            };

            let range = &sector.range;
            let n = range.day_count() as usize;
            let mut lower = Vec::with_capacity(n);
            let mut upper = Vec::with_capacity(n);
            let mut mean = Vec::with_capacity(n);
            for day in range.start..=range.end {
                let s = table.get_raw(day);
                // Day centers: day d sits half a day past its offset.
                let th = sector.theta(f64::from(day - range.start) + 0.5);
                lower.push(PolarPoint::new(th, band.scale(s.p10_scaled)));
                upper.push(PolarPoint::new(th, band.scale(s.p90_scaled)));
                mean.push(PolarPoint::new(th, band.scale(s.mean_scaled)));
            }

            vec![
                call(
                    Layer::EnvelopeFill,
                    Primitive::Band {
                        lower,
                        upper,
                        fill: Paint {
                            color: *fill,
                            alpha: *alpha,
                        },
                    },
                ),
                call(
                    Layer::MeanLine,
                    Primitive::Polyline {
                        points: mean,
                        stroke: Stroke {
                            color: *line,
                            alpha: 1.0,
                            width: *linewidth,
                            style: LineStyle::Solid,
                        },
                    },
                ),
            ]
        }
    };

    tracing::debug!(
        track = %track.name,
        kind = track.type_name(),
        sector = sector.name(),
        calls = calls.len(),
        "track drawn"
    );
    Ok(calls)
}

/// Outline and name label drawn for every sector.
pub fn sector_furniture(sector: &Sector, label: &SectorLabelSettings) -> Vec<DrawCall> {
    let grey = ColorDef::rgba(0.5, 0.5, 0.5, 1.0);
    vec![
        DrawCall {
            layer: Layer::Background,
            sector: sector.name().to_owned(),
            track: None,
            primitive: Primitive::Wedge {
                theta: (sector.start_deg, sector.end_deg),
                r: (0.0, OUTLINE_RADIUS),
                fill: None,
                stroke: Some(Stroke {
                    color: grey,
                    alpha: 0.5,
                    width: 1.0,
                    style: LineStyle::Solid,
                }),
            },
        },
        DrawCall {
            layer: Layer::Text,
            sector: sector.name().to_owned(),
            track: None,
            primitive: Primitive::Label {
                at: PolarPoint::new(sector.mid_deg(), label.r),
                text: sector.name().to_owned(),
                size: label.size,
                color: ColorDef::rgba(0.0, 0.0, 0.0, 1.0),
            },
        },
    ]
}

#[cfg(test)]
#[path = "../../tests/unit/render/track.rs"]
mod tests;
