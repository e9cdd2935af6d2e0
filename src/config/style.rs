use crate::foundation::error::CalendarError;

/// Stroke dash pattern, spelled the matplotlib way in configuration.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Deserialize)]
#[serde(try_from = "String")]
pub enum LineStyle {
    /// `-` / `solid`
    #[default]
    Solid,
    /// `--` / `dashed`
    Dashed,
    /// `:` / `dotted`
    Dotted,
    /// `-.` / `dashdot`
    DashDot,
}

impl LineStyle {
    /// Dash lengths in points for a stroke of `linewidth`, `None` for solid lines.
    pub fn dash_array(self, linewidth: f64) -> Option<Vec<f64>> {
        let lw = linewidth.max(0.1);
        let pattern: &[f64] = match self {
            LineStyle::Solid => return None,
            LineStyle::Dashed => &[3.7, 1.6],
            LineStyle::Dotted => &[1.0, 1.65],
            LineStyle::DashDot => &[6.4, 1.6, 1.0, 1.6],
        };
        Some(pattern.iter().map(|d| d * lw).collect())
    }
}

impl TryFrom<String> for LineStyle {
    type Error = CalendarError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        match s.trim() {
            "-" | "solid" => Ok(LineStyle::Solid),
            "--" | "dashed" => Ok(LineStyle::Dashed),
            ":" | "dotted" => Ok(LineStyle::Dotted),
            "-." | "dashdot" => Ok(LineStyle::DashDot),
            other => Err(CalendarError::config(format!("unknown linestyle '{other}'"))),
        }
    }
}

/// Point-marker glyph, using matplotlib's one-character codes.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Deserialize)]
#[serde(try_from = "String")]
pub enum MarkerShape {
    /// `o`
    #[default]
    Circle,
    /// `s`
    Square,
    /// `^`
    TriangleUp,
    /// `v`
    TriangleDown,
    /// `<`
    TriangleLeft,
    /// `>`
    TriangleRight,
    /// `D`
    Diamond,
    /// `d`
    ThinDiamond,
    /// `*`
    Star,
    /// `p`
    Pentagon,
    /// `h`
    Hexagon,
    /// `x`
    Cross,
    /// `+`
    Plus,
}

impl MarkerShape {
    /// Stroke-only glyphs have no interior to fill.
    pub fn is_filled(self) -> bool {
        !matches!(self, MarkerShape::Cross | MarkerShape::Plus)
    }
}

impl TryFrom<String> for MarkerShape {
    type Error = CalendarError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Ok(match s.trim() {
            "o" => MarkerShape::Circle,
            "s" => MarkerShape::Square,
            "^" => MarkerShape::TriangleUp,
            "v" => MarkerShape::TriangleDown,
            "<" => MarkerShape::TriangleLeft,
            ">" => MarkerShape::TriangleRight,
            "D" => MarkerShape::Diamond,
            "d" => MarkerShape::ThinDiamond,
            "*" => MarkerShape::Star,
            "p" => MarkerShape::Pentagon,
            "h" | "H" => MarkerShape::Hexagon,
            "x" | "X" => MarkerShape::Cross,
            "+" | "P" => MarkerShape::Plus,
            other => {
                return Err(CalendarError::config(format!(
                    "unknown marker '{other}'"
                )));
            }
        })
    }
}

#[cfg(test)]
#[path = "../../tests/unit/config/style.rs"]
mod tests;
