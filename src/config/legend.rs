use crate::config::color::ColorDef;
use crate::config::registry::ColorRegistry;
use crate::config::style::{LineStyle, MarkerShape};
use crate::config::track::StrokeStyle;
use crate::foundation::error::{CalendarError, CalendarResult};

/// A named set of legend entries with resolved colors.
#[derive(Clone, Debug, PartialEq)]
pub struct LegendGroup {
    /// Configuration key.
    pub name: String,
    /// Entries in display order.
    pub entries: Vec<LegendEntry>,
}

impl LegendGroup {
    /// Column header: underscores become spaces, followed by a colon.
    pub fn header(&self) -> String {
        format!("{}:", self.name.replace('_', " "))
    }
}

/// One legend row.
#[derive(Clone, Debug, PartialEq)]
pub enum LegendEntry {
    /// Filled swatch.
    Patch {
        /// Row label.
        label: String,
        /// Swatch color.
        color: ColorDef,
    },
    /// Short stroked line.
    Line {
        /// Row label.
        label: String,
        /// Line color.
        color: ColorDef,
        /// Stroke parameters.
        stroke: StrokeStyle,
    },
    /// Arrow track sample, drawn as a line.
    Arrow {
        /// Row label.
        label: String,
        /// Line color.
        color: ColorDef,
        /// Stroke parameters.
        stroke: StrokeStyle,
    },
    /// Marker glyph.
    Marker {
        /// Row label.
        label: String,
        /// Glyph color.
        color: ColorDef,
        /// Glyph.
        shape: MarkerShape,
        /// Glyph diameter in points.
        size: f64,
        /// Edge width in points.
        linewidth: f64,
    },
    /// Blank row.
    Space,
}

impl LegendEntry {
    /// Row label; blank rows have none.
    pub fn label(&self) -> Option<&str> {
        match self {
            LegendEntry::Patch { label, .. }
            | LegendEntry::Line { label, .. }
            | LegendEntry::Arrow { label, .. }
            | LegendEntry::Marker { label, .. } => Some(label),
            LegendEntry::Space => None,
        }
    }
}

#[derive(Clone, Debug, serde::Deserialize)]
pub(crate) struct LegendGroupDef {
    #[serde(default)]
    color: Option<String>,
    #[serde(default)]
    elements: Vec<serde_json::Value>,
}

#[derive(Clone, Debug, serde::Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum LegendElementDef {
    Patch {
        label: String,
        #[serde(default)]
        color: Option<String>,
    },
    Line {
        label: String,
        #[serde(default)]
        color: Option<String>,
        #[serde(default)]
        linestyle: LineStyle,
        #[serde(default = "one")]
        linewidth: f64,
    },
    Arrow {
        label: String,
        #[serde(default)]
        color: Option<String>,
        #[serde(default)]
        linestyle: LineStyle,
        #[serde(default = "one")]
        linewidth: f64,
    },
    Marker {
        label: String,
        #[serde(default)]
        color: Option<String>,
        #[serde(default)]
        marker: MarkerShape,
        #[serde(default = "markersize")]
        markersize: f64,
        #[serde(default = "one")]
        linewidth: f64,
    },
    Space,
}

fn one() -> f64 {
    1.0
}

fn markersize() -> f64 {
    10.0
}

impl LegendGroupDef {
    pub(crate) fn resolve(self, name: String, colors: &ColorRegistry) -> CalendarResult<LegendGroup> {
        let group_color = self.color;
        let color = |label: &str, key: Option<String>| -> CalendarResult<ColorDef> {
            let key = key.or_else(|| group_color.clone()).ok_or_else(|| {
                CalendarError::config(format!(
                    "legend group '{name}': element '{label}' has no color and the group sets none"
                ))
            })?;
            colors
                .resolve(&key)
                .map_err(|e| CalendarError::config(format!("legend group '{name}': {e}")))
        };

        let mut entries = Vec::with_capacity(self.elements.len());
        for (i, raw) in self.elements.into_iter().enumerate() {
            let def: LegendElementDef = serde_json::from_value(raw).map_err(|e| {
                CalendarError::config(format!("legend group '{name}' element {i}: {e}"))
            })?;
            entries.push(match def {
                LegendElementDef::Patch { label, color: c } => LegendEntry::Patch {
                    color: color(&label, c)?,
                    label,
                },
                LegendElementDef::Line {
                    label,
                    color: c,
                    linestyle,
                    linewidth,
                } => LegendEntry::Line {
                    color: color(&label, c)?,
                    label,
                    stroke: StrokeStyle {
                        width: linewidth,
                        style: linestyle,
                    },
                },
                LegendElementDef::Arrow {
                    label,
                    color: c,
                    linestyle,
                    linewidth,
                } => LegendEntry::Arrow {
                    color: color(&label, c)?,
                    label,
                    stroke: StrokeStyle {
                        width: linewidth,
                        style: linestyle,
                    },
                },
                LegendElementDef::Marker {
                    label,
                    color: c,
                    marker,
                    markersize,
                    linewidth,
                } => LegendEntry::Marker {
                    color: color(&label, c)?,
                    label,
                    shape: marker,
                    size: markersize,
                    linewidth,
                },
                LegendElementDef::Space => LegendEntry::Space,
            });
        }

        Ok(LegendGroup { name, entries })
    }
}

#[cfg(test)]
#[path = "../../tests/unit/config/legend.rs"]
mod tests;
