//! Circular decision-calendar charts.
//!
//! A calendar is a full circle cut into month sectors sized by day count. Each sector carries
//! decoration tracks (fills, arrows, lines, markers) and data tracks drawing the 10th to 90th
//! percentile envelope and mean of a multi-year daily series:
//!
//! - Load a [`CalendarConfig`] (JSON or YAML) and attach [`DailyStatsTable`]s built with
//!   [`aggregate_daily`]
//! - Assemble a [`Figure`] with [`DecisionCalendar::create_plot`]
//! - Export it with [`DecisionCalendar::save_plot`] (PNG, JPEG, SVG, ...)
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod calendar;
mod config;
mod foundation;
mod layout;
mod render;
mod stats;

pub use crate::calendar::DecisionCalendar;
pub use crate::config::color::ColorDef;
pub use crate::config::legend::{LegendEntry, LegendGroup};
pub use crate::config::model::{
    CalendarConfig, ConfigFormat, DataSource, FigSizes, LegendSettings, PlotSettings,
    SectorLabelSettings,
};
pub use crate::config::registry::{ColorKey, ColorRegistry};
pub use crate::config::style::{LineStyle, MarkerShape};
pub use crate::config::track::{RadialBand, StrokeStyle, TrackConfig, TrackKind};
pub use crate::foundation::core::{BezPath, DayOfYear, FigureSize, Point, Rect, Vec2};
pub use crate::foundation::error::{CalendarError, CalendarResult};
pub use crate::layout::sector::{MonthRange, Sector, SectorLayout, sector_weights};
pub use crate::render::export::{SaveOpts, crop_to_content, rasterize, save_plot};
pub use crate::render::figure::{CenterImage, Figure};
pub use crate::render::legend::{LegendColumn, LegendLayout, LegendRow, LegendStyle};
pub use crate::render::polar::PolarFrame;
pub use crate::render::primitive::{DrawCall, Layer, Paint, PolarPoint, Primitive, Stroke};
pub use crate::render::svg::{SvgTarget, figure_to_svg};
pub use crate::render::track::{render_track, sector_furniture};
pub use crate::stats::daily::{DailyStatistic, DailyStatsTable, aggregate_daily};
pub use crate::stats::observation::{
    RawObservation, load_observations, load_observations_from_path, parse_timestamp,
    read_observations,
};
pub use crate::stats::percentile::{mean, percentile_sorted};
