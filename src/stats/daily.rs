use std::collections::BTreeMap;

use crate::foundation::core::DayOfYear;
use crate::stats::observation::RawObservation;
use crate::stats::percentile::{mean, percentile_sorted, sort_finite};

/// Lower envelope percentile.
pub const LOW_PERCENTILE: f64 = 10.0;
/// Upper envelope percentile; its yearly maximum is the scale denominator.
pub const HIGH_PERCENTILE: f64 = 90.0;

/// Per-day aggregate of a merged multi-year series.
///
/// Raw fields are in data units; `*_scaled` fields are divided by the table's scale.
#[derive(Clone, Copy, Debug, Default, PartialEq, serde::Serialize)]
pub struct DailyStatistic {
    /// Mean of non-missing values.
    pub mean: f64,
    /// 10th percentile.
    pub p10: f64,
    /// 90th percentile.
    pub p90: f64,
    /// `mean / scale`.
    pub mean_scaled: f64,
    /// `p10 / scale`.
    pub p10_scaled: f64,
    /// `p90 / scale`.
    pub p90_scaled: f64,
}

/// Day-of-year statistics covering every day `1..=366`.
///
/// Days with no usable observation hold zeros; callers cannot tell them from recorded zeros.
#[derive(Clone, Debug, PartialEq)]
pub struct DailyStatsTable {
    days: BTreeMap<DayOfYear, DailyStatistic>,
    scale: f64,
    observed_days: usize,
}

impl DailyStatsTable {
    /// Statistic for `day`; zeros if the day is outside the table.
    pub fn get(&self, day: DayOfYear) -> DailyStatistic {
        self.days.get(&day).copied().unwrap_or_default()
    }

    /// Statistic for a raw day number; zeros for anything outside `1..=366`.
    pub fn get_raw(&self, day: u16) -> DailyStatistic {
        DayOfYear::new(day).map(|d| self.get(d)).unwrap_or_default()
    }

    /// Normalization denominator: the largest raw p90, or `1.0` when that is zero.
    pub fn scale(&self) -> f64 {
        self.scale
    }

    /// Number of days that had at least one non-missing observation.
    pub fn observed_days(&self) -> usize {
        self.observed_days
    }

    /// Iterate `(day, statistic)` ascending.
    pub fn iter(&self) -> impl Iterator<Item = (DayOfYear, &DailyStatistic)> {
        self.days.iter().map(|(d, s)| (*d, s))
    }

    /// Number of rows (always 366).
    pub fn len(&self) -> usize {
        self.days.len()
    }

    /// Return `true` when the table has no rows.
    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }
}

/// Group observations by day of year across all years and compute mean, p10 and p90 per
/// day, each scaled by the global maximum p90.
#[tracing::instrument(skip(observations), fields(n = observations.len()))]
pub fn aggregate_daily(observations: &[RawObservation]) -> DailyStatsTable {
    let mut groups = BTreeMap::<DayOfYear, Vec<f64>>::new();
    for obs in observations {
        let Some(v) = obs.value.filter(|v| v.is_finite()) else {
            continue;
        };
        groups
            .entry(DayOfYear::from_date(obs.timestamp.date()))
            .or_default()
            .push(v);
    }

    let mut days = BTreeMap::<DayOfYear, DailyStatistic>::new();
    for day in DayOfYear::all() {
        let stat = match groups.get_mut(&day) {
            Some(values) if !values.is_empty() => {
                sort_finite(values);
                DailyStatistic {
                    mean: mean(values).unwrap_or(0.0),
                    p10: percentile_sorted(values, LOW_PERCENTILE).unwrap_or(0.0),
                    p90: percentile_sorted(values, HIGH_PERCENTILE).unwrap_or(0.0),
                    ..DailyStatistic::default()
                }
            }
            _ => DailyStatistic::default(),
        };
        days.insert(day, stat);
    }

    let max_p90 = days.values().map(|s| s.p90).fold(f64::NEG_INFINITY, f64::max);
    let scale = if max_p90 == 0.0 || !max_p90.is_finite() {
        1.0
    } else {
        max_p90
    };
    for s in days.values_mut() {
        s.mean_scaled = s.mean / scale;
        s.p10_scaled = s.p10 / scale;
        s.p90_scaled = s.p90 / scale;
    }

    let observed_days = groups.len();
    let gap_filled = days.len() - observed_days;
    if gap_filled > 0 {
        tracing::debug!(gap_filled, "days without observations filled with zeros");
    }

    DailyStatsTable {
        days,
        scale,
        observed_days,
    }
}

#[cfg(test)]
#[path = "../../tests/unit/stats/daily.rs"]
mod tests;
