use crate::foundation::error::{CalendarError, CalendarResult};

pub use kurbo::{BezPath, Point, Rect, Vec2};

/// Typographic points per inch; figure geometry is laid out in points.
pub const POINTS_PER_INCH: f64 = 72.0;

/// 1-based ordinal day within a calendar year (`1..=366`).
///
/// Calendar years are merged: 1 March is day 60 in common years and day 61 in leap years.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(try_from = "u16", into = "u16")]
pub struct DayOfYear(u16);

impl DayOfYear {
    /// First day of the year.
    pub const FIRST: DayOfYear = DayOfYear(1);
    /// Last possible day (leap years).
    pub const LAST: DayOfYear = DayOfYear(366);

    /// Create a validated day index.
    pub fn new(day: u16) -> CalendarResult<Self> {
        if !(Self::FIRST.0..=Self::LAST.0).contains(&day) {
            return Err(CalendarError::range(format!(
                "day of year {day} outside 1..=366"
            )));
        }
        Ok(Self(day))
    }

    /// Ordinal day of `date` within its own year.
    pub fn from_date(date: chrono::NaiveDate) -> Self {
        use chrono::Datelike as _;
        // chrono guarantees 1..=366.
        Self(date.ordinal() as u16)
    }

    /// Raw 1-based value.
    pub fn get(self) -> u16 {
        self.0
    }

    /// Every day index in `1..=366`, ascending.
    pub fn all() -> impl Iterator<Item = DayOfYear> {
        (Self::FIRST.0..=Self::LAST.0).map(DayOfYear)
    }
}

impl TryFrom<u16> for DayOfYear {
    type Error = CalendarError;

    fn try_from(v: u16) -> Result<Self, Self::Error> {
        Self::new(v)
    }
}

impl From<DayOfYear> for u16 {
    fn from(d: DayOfYear) -> u16 {
        d.0
    }
}

impl std::fmt::Display for DayOfYear {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Figure dimensions in inches.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(try_from = "[f64; 2]", into = "[f64; 2]")]
pub struct FigureSize {
    /// Width in inches.
    pub width_in: f64,
    /// Height in inches.
    pub height_in: f64,
}

impl FigureSize {
    /// Create a validated figure size; both sides must be finite and positive.
    pub fn new(width_in: f64, height_in: f64) -> CalendarResult<Self> {
        let ok = |v: f64| v.is_finite() && v > 0.0;
        if !ok(width_in) || !ok(height_in) {
            return Err(CalendarError::config(format!(
                "figsize must be positive, got [{width_in}, {height_in}]"
            )));
        }
        Ok(Self {
            width_in,
            height_in,
        })
    }

    /// Width in points.
    pub fn width_pt(self) -> f64 {
        self.width_in * POINTS_PER_INCH
    }

    /// Height in points.
    pub fn height_pt(self) -> f64 {
        self.height_in * POINTS_PER_INCH
    }
}

impl TryFrom<[f64; 2]> for FigureSize {
    type Error = CalendarError;

    fn try_from(v: [f64; 2]) -> Result<Self, Self::Error> {
        Self::new(v[0], v[1])
    }
}

impl From<FigureSize> for [f64; 2] {
    fn from(s: FigureSize) -> [f64; 2] {
        [s.width_in, s.height_in]
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
