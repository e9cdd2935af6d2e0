use std::collections::BTreeMap;
use std::path::Path;

use crate::config::model::{CalendarConfig, DataSource};
use crate::config::track::TrackKind;
use crate::foundation::error::{CalendarError, CalendarResult};
use crate::layout::sector::SectorLayout;
use crate::render::export::{self, SaveOpts};
use crate::render::figure::{CenterImage, Figure};
use crate::render::legend::LegendLayout;
use crate::render::track::{render_track, sector_furniture};
use crate::stats::daily::{DailyStatsTable, aggregate_daily};
use crate::stats::observation::load_observations;

/// A configured calendar plus the statistics tables its data tracks draw from.
///
/// Tables are read-only once attached, so one calendar can produce any number of figures.
#[derive(Clone, Debug)]
pub struct DecisionCalendar {
    config: CalendarConfig,
    stats: BTreeMap<String, DailyStatsTable>,
}

impl DecisionCalendar {
    /// Wrap a resolved configuration without loading any data.
    pub fn new(config: CalendarConfig) -> Self {
        Self {
            config,
            stats: BTreeMap::new(),
        }
    }

    /// Load a configuration file and every data source it declares.
    #[tracing::instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_path(path: impl AsRef<Path>) -> CalendarResult<Self> {
        let config = CalendarConfig::from_path(path.as_ref())?;
        let sources = config.data_sources.clone();
        let mut calendar = Self::new(config);
        for (name, source) in &sources {
            calendar.load_data_source(name, source)?;
        }
        Ok(calendar)
    }

    /// Read and aggregate a CSV source, storing the table under `name`.
    pub fn load_data_source(
        &mut self,
        name: &str,
        source: &DataSource,
    ) -> CalendarResult<&DailyStatsTable> {
        let observations = load_observations(source)?;
        let table = aggregate_daily(&observations);
        tracing::info!(
            table = name,
            observations = observations.len(),
            observed_days = table.observed_days(),
            "statistics table loaded"
        );
        self.stats.insert(name.to_owned(), table);
        Ok(&self.stats[name])
    }

    /// Attach a precomputed statistics table under `name`, replacing any previous one.
    pub fn with_stats(mut self, name: impl Into<String>, table: DailyStatsTable) -> Self {
        self.stats.insert(name.into(), table);
        self
    }

    /// Resolved configuration.
    pub fn config(&self) -> &CalendarConfig {
        &self.config
    }

    /// Statistics table attached under `name`.
    pub fn stats(&self, name: &str) -> Option<&DailyStatsTable> {
        self.stats.get(name)
    }

    /// Assemble the figure: sector furniture, every track in every sector, the legend and
    /// an optional image at the pole.
    ///
    /// The first failing sector×track pair aborts assembly, so no partial figure is returned.
    #[tracing::instrument(skip(self))]
    pub fn create_plot(&self, center_image: Option<&Path>) -> CalendarResult<Figure> {
        let settings = &self.config.plot_settings;
        let layout = SectorLayout::from_month_ranges(&self.config.month_ranges)?;

        let mut calls = Vec::new();
        for sector in layout.sectors() {
            calls.extend(sector_furniture(sector, &settings.sector_label));
            for track in &self.config.tracks {
                let table = match &track.kind {
                    TrackKind::DataPlot { source, .. } => self.stats.get(source),
                    _ => None,
                };
                calls.extend(render_track(sector, track, table)?);
            }
        }

        let center_image = match center_image {
            Some(path) if !path.is_file() => {
                return Err(CalendarError::config(format!(
                    "center image '{}' does not exist",
                    path.display()
                )));
            }
            Some(path) => Some(CenterImage {
                path: path.to_path_buf(),
                size_frac: settings.center_image_size,
            }),
            None => None,
        };

        let legend = LegendLayout::build(
            &self.config.legend_groups,
            &settings.legend,
            settings.figsize.plot,
        );

        tracing::info!(
            sectors = layout.sectors().len(),
            tracks = self.config.tracks.len(),
            calls = calls.len(),
            "figure assembled"
        );
        Ok(Figure::new(
            settings.figsize.plot,
            settings.facecolor,
            calls,
            legend,
            center_image,
        ))
    }

    /// Export `figure` to `path`.
    pub fn save_plot(
        &self,
        figure: &Figure,
        path: impl AsRef<Path>,
        opts: &SaveOpts,
    ) -> CalendarResult<()> {
        export::save_plot(figure, path.as_ref(), opts)
    }
}

#[cfg(test)]
#[path = "../tests/unit/calendar.rs"]
mod tests;
