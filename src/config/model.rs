use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use crate::config::color::ColorDef;
use crate::config::legend::{LegendGroup, LegendGroupDef};
use crate::config::ordered;
use crate::config::registry::ColorRegistry;
use crate::config::track::{TrackConfig, TrackKind, resolve_track_entry};
use crate::foundation::core::FigureSize;
use crate::foundation::error::{CalendarError, CalendarResult};
use crate::layout::sector::MonthRange;

/// Configuration document as written, before color resolution.
#[derive(Clone, Debug, serde::Deserialize)]
pub(crate) struct CalendarConfigDef {
    colors: serde_json::Value,
    #[serde(deserialize_with = "ordered::entries")]
    month_ranges: Vec<(String, [u16; 2])>,
    #[serde(deserialize_with = "ordered::entries")]
    track_configs: Vec<(String, serde_json::Value)>,
    #[serde(deserialize_with = "ordered::entries")]
    legend_groups: Vec<(String, LegendGroupDef)>,
    plot_settings: PlotSettings,
    #[serde(default, deserialize_with = "ordered::entries")]
    data_sources: Vec<(String, DataSource)>,
}

/// Figure-level presentation settings.
#[derive(Clone, Debug, PartialEq, serde::Deserialize)]
pub struct PlotSettings {
    /// Figure sizes; `plot` is the calendar figure.
    pub figsize: FigSizes,
    /// Legend placement and styling.
    pub legend: LegendSettings,
    /// Sector name labels.
    #[serde(default)]
    pub sector_label: SectorLabelSettings,
    /// Figure background, also used for export padding.
    #[serde(default = "white")]
    pub facecolor: ColorDef,
    /// Center image size as a fraction of the figure's shorter side.
    #[serde(default = "center_image_size")]
    pub center_image_size: f64,
}

/// Named figure sizes in inches.
#[derive(Clone, Debug, PartialEq, serde::Deserialize)]
pub struct FigSizes {
    /// Calendar figure size.
    pub plot: FigureSize,
}

/// Legend placement (figure fraction, origin bottom-left) and styling.
#[derive(Clone, Debug, PartialEq, serde::Deserialize)]
pub struct LegendSettings {
    /// Lower-left corner `[x, y]` of the first legend column's anchor box.
    pub bbox: [f64; 2],
    /// Frame fill.
    #[serde(default = "white")]
    pub facecolor: ColorDef,
    /// Frame edge.
    #[serde(default = "black")]
    pub edgecolor: ColorDef,
    /// Entry font size in points.
    #[serde(default = "legend_fontsize")]
    pub fontsize: f64,
    /// Group header font size in points.
    #[serde(default = "legend_title_fontsize")]
    pub title_fontsize: f64,
}

/// Placement of the month name inside each sector.
#[derive(Clone, Debug, PartialEq, serde::Deserialize)]
pub struct SectorLabelSettings {
    /// Radius in radial units.
    #[serde(default = "label_r")]
    pub r: f64,
    /// Font size in points.
    #[serde(default = "label_size")]
    pub size: f64,
}

impl Default for SectorLabelSettings {
    fn default() -> Self {
        Self {
            r: label_r(),
            size: label_size(),
        }
    }
}

fn white() -> ColorDef {
    ColorDef::WHITE
}

fn black() -> ColorDef {
    ColorDef::rgba(0.0, 0.0, 0.0, 1.0)
}

fn center_image_size() -> f64 {
    0.15
}

fn legend_fontsize() -> f64 {
    10.0
}

fn legend_title_fontsize() -> f64 {
    12.0
}

fn label_r() -> f64 {
    26.0
}

fn label_size() -> f64 {
    15.0
}

/// A CSV time series feeding a `data_plot` track.
#[derive(Clone, Debug, PartialEq, serde::Deserialize)]
pub struct DataSource {
    /// CSV file path; relative paths resolve against the configuration file.
    pub path: PathBuf,
    /// Timestamp column header.
    #[serde(default = "date_column")]
    pub date_column: String,
    /// Numeric value column header.
    pub value_column: String,
}

fn date_column() -> String {
    "datetime".to_owned()
}

impl DataSource {
    /// Build a source description.
    pub fn new(
        path: impl Into<PathBuf>,
        date_column: impl Into<String>,
        value_column: impl Into<String>,
    ) -> Self {
        Self {
            path: path.into(),
            date_column: date_column.into(),
            value_column: value_column.into(),
        }
    }
}

/// Fully resolved calendar configuration.
///
/// All color references are checked and every track type is known once this exists; sector
/// ranges are validated when the layout is built.
#[derive(Clone, Debug)]
pub struct CalendarConfig {
    /// Flattened color table.
    pub colors: ColorRegistry,
    /// Sectors in drawing order.
    pub month_ranges: Vec<MonthRange>,
    /// Tracks in drawing order.
    pub tracks: Vec<TrackConfig>,
    /// Legend columns in display order.
    pub legend_groups: Vec<LegendGroup>,
    /// Presentation settings.
    pub plot_settings: PlotSettings,
    /// Declared CSV data sources by table name.
    pub data_sources: Vec<(String, DataSource)>,
}

/// Text format of a configuration document.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ConfigFormat {
    /// JSON.
    Json,
    /// YAML, the format hand-written calendar configurations usually come in.
    Yaml,
}

impl ConfigFormat {
    /// Pick the format from a file extension: `.yaml`/`.yml` are YAML, anything else JSON.
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("yaml") || ext.eq_ignore_ascii_case("yml") => {
                Self::Yaml
            }
            _ => Self::Json,
        }
    }
}

impl CalendarConfig {
    /// Parse and resolve a configuration from a JSON reader.
    pub fn from_reader<R: std::io::Read>(r: R) -> CalendarResult<Self> {
        Self::from_reader_as(r, ConfigFormat::Json)
    }

    /// Parse and resolve a configuration from a reader in the given format.
    pub fn from_reader_as<R: std::io::Read>(r: R, format: ConfigFormat) -> CalendarResult<Self> {
        let def: CalendarConfigDef = match format {
            ConfigFormat::Json => serde_json::from_reader(r).map_err(parse_error)?,
            ConfigFormat::Yaml => serde_yaml::from_reader(r).map_err(parse_error)?,
        };
        Self::from_def(def)
    }

    /// Parse and resolve a configuration from a JSON string.
    pub fn from_json_str(s: &str) -> CalendarResult<Self> {
        Self::from_reader_as(s.as_bytes(), ConfigFormat::Json)
    }

    /// Parse and resolve a configuration from a YAML string.
    pub fn from_yaml_str(s: &str) -> CalendarResult<Self> {
        Self::from_reader_as(s.as_bytes(), ConfigFormat::Yaml)
    }

    /// Parse and resolve a configuration file, JSON or YAML by extension. Relative data
    /// source paths are anchored at the file's directory.
    #[tracing::instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_path(path: impl AsRef<Path>) -> CalendarResult<Self> {
        let path = path.as_ref();
        let f = File::open(path).map_err(|e| {
            CalendarError::config(format!("open configuration '{}': {e}", path.display()))
        })?;
        let format = ConfigFormat::from_path(path);
        tracing::debug!(?format, "reading configuration");
        let mut cfg = Self::from_reader_as(BufReader::new(f), format)?;
        if let Some(dir) = path.parent() {
            for (_, src) in &mut cfg.data_sources {
                if src.path.is_relative() {
                    src.path = dir.join(&src.path);
                }
            }
        }
        Ok(cfg)
    }

    pub(crate) fn from_def(def: CalendarConfigDef) -> CalendarResult<Self> {
        let colors = ColorRegistry::from_value(&def.colors)?;

        let month_ranges = def
            .month_ranges
            .into_iter()
            .map(|(name, [start, end])| MonthRange::new(name, start, end))
            .collect::<Vec<_>>();

        let mut tracks = Vec::new();
        for (name, value) in def.track_configs {
            tracks.extend(resolve_track_entry(&name, value, &colors)?);
        }

        let legend_groups = def
            .legend_groups
            .into_iter()
            .map(|(name, g)| g.resolve(name, &colors))
            .collect::<CalendarResult<Vec<_>>>()?;

        if !(0.0..=1.0).contains(&def.plot_settings.center_image_size) {
            return Err(CalendarError::config(format!(
                "plot_settings.center_image_size must be within [0, 1], got {}",
                def.plot_settings.center_image_size
            )));
        }

        let cfg = Self {
            colors,
            month_ranges,
            tracks,
            legend_groups,
            plot_settings: def.plot_settings,
            data_sources: def.data_sources,
        };
        cfg.warn_unmatched_months();
        Ok(cfg)
    }

    /// Names of statistics tables referenced by `data_plot` tracks, deduplicated.
    pub fn referenced_sources(&self) -> Vec<&str> {
        let mut out = Vec::<&str>::new();
        for t in &self.tracks {
            if let TrackKind::DataPlot { source, .. } = &t.kind {
                if !out.contains(&source.as_str()) {
                    out.push(source);
                }
            }
        }
        out
    }

    fn warn_unmatched_months(&self) {
        for t in &self.tracks {
            for m in &t.months {
                if !self.month_ranges.iter().any(|r| r.name == *m) {
                    tracing::warn!(track = %t.name, month = %m, "track names a month with no sector");
                }
            }
        }
    }
}

fn parse_error(e: impl std::fmt::Display) -> CalendarError {
    CalendarError::config(format!("parse calendar configuration: {e}"))
}

#[cfg(test)]
#[path = "../../tests/unit/config/model.rs"]
mod tests;
