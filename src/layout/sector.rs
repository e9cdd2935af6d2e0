use crate::foundation::core::DayOfYear;
use crate::foundation::error::{CalendarError, CalendarResult};

/// Degrees in the full circle the sectors tile.
pub const FULL_CIRCLE_DEG: f64 = 360.0;

/// A named, inclusive day-of-year span: one sector's share of the year.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MonthRange {
    /// Sector name, usually a month abbreviation.
    pub name: String,
    /// First day, inclusive.
    pub start: u16,
    /// Last day, inclusive.
    pub end: u16,
}

impl MonthRange {
    /// Build an unvalidated range; [`MonthRange::validate`] runs at layout time.
    pub fn new(name: impl Into<String>, start: u16, end: u16) -> Self {
        Self {
            name: name.into(),
            start,
            end,
        }
    }

    /// Check `start <= end` and that both ends are valid days of the year.
    pub fn validate(&self) -> CalendarResult<()> {
        if self.end < self.start {
            return Err(CalendarError::range(format!(
                "month '{}' ends (day {}) before it starts (day {})",
                self.name, self.end, self.start
            )));
        }
        DayOfYear::new(self.start)
            .and(DayOfYear::new(self.end))
            .map_err(|e| CalendarError::range(format!("month '{}': {e}", self.name)))?;
        Ok(())
    }

    /// Number of days covered, `end - start + 1`.
    pub fn day_count(&self) -> u32 {
        u32::from(self.end.saturating_sub(self.start)) + 1
    }

    /// Days covered, ascending.
    pub fn days(&self) -> impl Iterator<Item = DayOfYear> + use<> {
        (self.start..=self.end).filter_map(|d| DayOfYear::new(d).ok())
    }
}

/// One angular wedge of the calendar.
#[derive(Clone, Debug, PartialEq)]
pub struct Sector {
    /// Day span this wedge draws.
    pub range: MonthRange,
    /// Clockwise start angle from 12 o'clock, degrees.
    pub start_deg: f64,
    /// Clockwise end angle from 12 o'clock, degrees.
    pub end_deg: f64,
}

impl Sector {
    /// Sector name.
    pub fn name(&self) -> &str {
        &self.range.name
    }

    /// Angular weight: the sector's day count.
    pub fn size(&self) -> f64 {
        f64::from(self.range.day_count())
    }

    /// Angular extent in degrees.
    pub fn extent_deg(&self) -> f64 {
        self.end_deg - self.start_deg
    }

    /// Map a day offset inside the sector (`0..=size`) to an absolute angle.
    pub fn theta(&self, x: f64) -> f64 {
        self.start_deg + x / self.size() * self.extent_deg()
    }

    /// Angle of the sector's midpoint.
    pub fn mid_deg(&self) -> f64 {
        0.5 * (self.start_deg + self.end_deg)
    }
}

/// Ordered month name → day-count weights.
pub fn sector_weights(ranges: &[MonthRange]) -> CalendarResult<Vec<(String, u32)>> {
    ranges
        .iter()
        .map(|r| {
            r.validate()?;
            Ok((r.name.clone(), r.day_count()))
        })
        .collect()
}

/// Full-circle partition of the year into consecutive, gap-free sectors.
#[derive(Clone, Debug, PartialEq)]
pub struct SectorLayout {
    sectors: Vec<Sector>,
    total_days: u32,
}

impl SectorLayout {
    /// Lay out `ranges` clockwise from 12 o'clock, each sector's extent proportional to its
    /// day count.
    pub fn from_month_ranges(ranges: &[MonthRange]) -> CalendarResult<Self> {
        let weights = sector_weights(ranges)?;
        if weights.is_empty() {
            return Err(CalendarError::range("month_ranges must name at least one sector"));
        }
        if let Some(dup) = ranges
            .iter()
            .enumerate()
            .find(|(i, r)| ranges[..*i].iter().any(|p| p.name == r.name))
        {
            return Err(CalendarError::range(format!(
                "duplicate sector name '{}'",
                dup.1.name
            )));
        }

        let total_days: u32 = weights.iter().map(|(_, w)| *w).sum();
        let total = f64::from(total_days);

        let mut sectors = Vec::with_capacity(ranges.len());
        let mut cumulative = 0u32;
        for range in ranges {
            let start_deg = f64::from(cumulative) / total * FULL_CIRCLE_DEG;
            cumulative += range.day_count();
            let end_deg = f64::from(cumulative) / total * FULL_CIRCLE_DEG;
            sectors.push(Sector {
                range: range.clone(),
                start_deg,
                end_deg,
            });
        }

        tracing::debug!(sectors = sectors.len(), total_days, "sector layout built");
        Ok(Self {
            sectors,
            total_days,
        })
    }

    /// Sectors in clockwise order.
    pub fn sectors(&self) -> &[Sector] {
        &self.sectors
    }

    /// Sum of all sector day counts.
    pub fn total_days(&self) -> u32 {
        self.total_days
    }

    /// Look up a sector by name.
    pub fn get(&self, name: &str) -> Option<&Sector> {
        self.sectors.iter().find(|s| s.name() == name)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/layout/sector.rs"]
mod tests;
