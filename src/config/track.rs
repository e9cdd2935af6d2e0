use std::collections::BTreeMap;

use crate::config::color::ColorDef;
use crate::config::registry::ColorRegistry;
use crate::config::style::{LineStyle, MarkerShape};
use crate::foundation::error::{CalendarError, CalendarResult};

/// Radial extent `[r_start, r_end]` of a track, in the 0..100 radial unit space.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RadialBand {
    /// Inner radius.
    pub r_start: f64,
    /// Outer radius.
    pub r_end: f64,
}

impl RadialBand {
    /// Create a validated band (`r_start <= r_end`, both finite).
    pub fn new(r_start: f64, r_end: f64) -> CalendarResult<Self> {
        if !r_start.is_finite() || !r_end.is_finite() || r_start > r_end {
            return Err(CalendarError::config(format!(
                "invalid radial band ({r_start}, {r_end})"
            )));
        }
        Ok(Self { r_start, r_end })
    }

    /// Map a unit value (`0` → `r_start`, `1` → `r_end`) into the band.
    pub fn scale(self, v: f64) -> f64 {
        crate::foundation::math::lerp(self.r_start, self.r_end, v)
    }

    /// Band as an `(inner, outer)` tuple.
    pub fn lim(self) -> (f64, f64) {
        (self.r_start, self.r_end)
    }
}

/// Stroke parameters shared by arrows, lines and data-plot mean lines.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct StrokeStyle {
    /// Width in points.
    pub width: f64,
    /// Dash pattern.
    pub style: LineStyle,
}

/// One resolved track descriptor; read-only after configuration load.
#[derive(Clone, Debug, PartialEq)]
pub struct TrackConfig {
    /// Configuration key, suffixed with `[i]` for list entries.
    pub name: String,
    /// Sector names this track draws into.
    pub months: Vec<String>,
    /// Type-specific parameters.
    pub kind: TrackKind,
}

/// Closed set of track types.
#[derive(Clone, Debug, PartialEq)]
pub enum TrackKind {
    /// Solid annular fill over the whole sector.
    Infill {
        /// Radial extent.
        band: RadialBand,
        /// Fill color.
        color: ColorDef,
        /// Opacity multiplier.
        alpha: f64,
    },
    /// Arrow glyph spanning the sector.
    Arrow {
        /// Radial extent of the arrow head; the shaft is `shaft_ratio` of it.
        band: RadialBand,
        /// Fill and edge color.
        color: ColorDef,
        /// Opacity multiplier.
        alpha: f64,
        /// Edge stroke.
        stroke: StrokeStyle,
        /// Shaft thickness as a fraction of the band.
        shaft_ratio: f64,
        /// Head length in days; `0` draws a bare shaft.
        head_length: f64,
    },
    /// Constant-radius line at `band.r_start`.
    Line {
        /// Radial extent; only `r_start` is drawn.
        band: RadialBand,
        /// Stroke color.
        color: ColorDef,
        /// Stroke parameters.
        stroke: StrokeStyle,
    },
    /// Single point glyph at a per-sector radius.
    Marker {
        /// Stroke and fill color.
        color: ColorDef,
        /// Radius per sector name.
        r_points: BTreeMap<String, f64>,
        /// Day offset inside the sector.
        position: f64,
        /// Glyph.
        shape: MarkerShape,
        /// Glyph area in square points.
        size: f64,
        /// Edge width in points.
        linewidth: f64,
    },
    /// Percentile envelope plus mean line from a daily statistics table.
    DataPlot {
        /// Radial extent onto which `[0, 1]` is mapped.
        band: RadialBand,
        /// Name of the statistics table to draw.
        source: String,
        /// Envelope fill color.
        fill: ColorDef,
        /// Mean line color.
        line: ColorDef,
        /// Envelope opacity.
        alpha: f64,
        /// Mean line width in points.
        linewidth: f64,
    },
}

impl TrackConfig {
    /// Return `true` when `sector` is listed in this track's months.
    pub fn applies_to(&self, sector: &str) -> bool {
        self.months.iter().any(|m| m == sector)
    }

    /// Short type name, as written in configuration.
    pub fn type_name(&self) -> &'static str {
        match self.kind {
            TrackKind::Infill { .. } => "infill",
            TrackKind::Arrow { .. } => "arrow",
            TrackKind::Line { .. } => "line",
            TrackKind::Marker { .. } => "marker",
            TrackKind::DataPlot { .. } => "data_plot",
        }
    }
}

/// JSON form of a track, tagged by `type`.
#[derive(Clone, Debug, serde::Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub(crate) enum TrackDef {
    Infill {
        r_start: f64,
        r_end: f64,
        color: String,
        #[serde(default)]
        months: Vec<String>,
        #[serde(default = "defaults::one")]
        alpha: f64,
    },
    Arrow {
        r_start: f64,
        r_end: f64,
        color: String,
        #[serde(default)]
        months: Vec<String>,
        #[serde(default = "defaults::arrow_alpha")]
        alpha: f64,
        #[serde(default)]
        linestyle: LineStyle,
        #[serde(default = "defaults::one")]
        linewidth: f64,
        #[serde(default = "defaults::shaft_ratio")]
        shaft_ratio: f64,
        #[serde(default)]
        head_length: f64,
    },
    Line {
        r_start: f64,
        r_end: f64,
        color: String,
        #[serde(default)]
        months: Vec<String>,
        #[serde(default)]
        linestyle: LineStyle,
        #[serde(default = "defaults::one")]
        linewidth: f64,
    },
    Marker {
        color: String,
        #[serde(default)]
        months: Vec<String>,
        r_points: BTreeMap<String, f64>,
        position: f64,
        #[serde(default)]
        marker: MarkerShape,
        #[serde(default = "defaults::marker_area")]
        s: f64,
        #[serde(default = "defaults::one")]
        linewidth: f64,
    },
    DataPlot {
        r_start: f64,
        r_end: f64,
        source: String,
        color: String,
        #[serde(default)]
        line_color: Option<String>,
        #[serde(default)]
        months: Vec<String>,
        #[serde(default = "defaults::envelope_alpha")]
        alpha: f64,
        #[serde(default = "defaults::mean_linewidth")]
        linewidth: f64,
    },
}

mod defaults {
    pub(super) fn one() -> f64 {
        1.0
    }
    pub(super) fn arrow_alpha() -> f64 {
        0.7
    }
    pub(super) fn shaft_ratio() -> f64 {
        0.3
    }
    pub(super) fn marker_area() -> f64 {
        200.0
    }
    pub(super) fn envelope_alpha() -> f64 {
        0.4
    }
    pub(super) fn mean_linewidth() -> f64 {
        1.5
    }
}

impl TrackDef {
    /// Resolve color references and validate numeric parameters.
    pub(crate) fn resolve(self, name: String, colors: &ColorRegistry) -> CalendarResult<TrackConfig> {
        let color = |key: &str| {
            colors
                .resolve(key)
                .map_err(|e| CalendarError::config(format!("track '{name}': {e}")))
        };
        let band = |r_start: f64, r_end: f64| {
            RadialBand::new(r_start, r_end)
                .map_err(|e| CalendarError::config(format!("track '{name}': {e}")))
        };
        let unit = |what: &str, v: f64| {
            if (0.0..=1.0).contains(&v) {
                Ok(v)
            } else {
                Err(CalendarError::config(format!(
                    "track '{name}': {what} must be within [0, 1], got {v}"
                )))
            }
        };

        let (months, kind) = match self {
            TrackDef::Infill {
                r_start,
                r_end,
                color: c,
                months,
                alpha,
            } => (
                months,
                TrackKind::Infill {
                    band: band(r_start, r_end)?,
                    color: color(&c)?,
                    alpha: unit("alpha", alpha)?,
                },
            ),
            TrackDef::Arrow {
                r_start,
                r_end,
                color: c,
                months,
                alpha,
                linestyle,
                linewidth,
                shaft_ratio,
                head_length,
            } => (
                months,
                TrackKind::Arrow {
                    band: band(r_start, r_end)?,
                    color: color(&c)?,
                    alpha: unit("alpha", alpha)?,
                    stroke: StrokeStyle {
                        width: linewidth,
                        style: linestyle,
                    },
                    shaft_ratio: unit("shaft_ratio", shaft_ratio)?,
                    head_length: head_length.max(0.0),
                },
            ),
            TrackDef::Line {
                r_start,
                r_end,
                color: c,
                months,
                linestyle,
                linewidth,
            } => (
                months,
                TrackKind::Line {
                    band: band(r_start, r_end)?,
                    color: color(&c)?,
                    stroke: StrokeStyle {
                        width: linewidth,
                        style: linestyle,
                    },
                },
            ),
            TrackDef::Marker {
                color: c,
                months,
                r_points,
                position,
                marker,
                s,
                linewidth,
            } => {
                if let Some(missing) = months.iter().find(|m| !r_points.contains_key(*m)) {
                    return Err(CalendarError::config(format!(
                        "track '{name}': r_points has no entry for month '{missing}'"
                    )));
                }
                (
                    months,
                    TrackKind::Marker {
                        color: color(&c)?,
                        r_points,
                        position,
                        shape: marker,
                        size: s.max(0.0),
                        linewidth,
                    },
                )
            }
            TrackDef::DataPlot {
                r_start,
                r_end,
                source,
                color: c,
                line_color,
                months,
                alpha,
                linewidth,
            } => {
                let fill = color(&c)?;
                let line = match line_color {
                    Some(lc) => color(&lc)?,
                    None => fill,
                };
                (
                    months,
                    TrackKind::DataPlot {
                        band: band(r_start, r_end)?,
                        source,
                        fill,
                        line,
                        alpha: unit("alpha", alpha)?,
                        linewidth,
                    },
                )
            }
        };

        Ok(TrackConfig { name, months, kind })
    }
}

/// Parse one `track_configs` entry (a single object or a list of them).
pub(crate) fn resolve_track_entry(
    name: &str,
    value: serde_json::Value,
    colors: &ColorRegistry,
) -> CalendarResult<Vec<TrackConfig>> {
    let parse = |label: String, v: serde_json::Value| -> CalendarResult<TrackConfig> {
        let def: TrackDef = serde_json::from_value(v)
            .map_err(|e| CalendarError::config(format!("track '{label}': {e}")))?;
        def.resolve(label, colors)
    };

    match value {
        serde_json::Value::Array(items) => items
            .into_iter()
            .enumerate()
            .map(|(i, v)| parse(format!("{name}[{i}]"), v))
            .collect(),
        other => Ok(vec![parse(name.to_owned(), other)?]),
    }
}

#[cfg(test)]
#[path = "../../tests/unit/config/track.rs"]
mod tests;
