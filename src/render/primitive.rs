use crate::config::color::ColorDef;
use crate::config::style::{LineStyle, MarkerShape};

/// Stacking layer; later layers paint over earlier ones.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Layer {
    /// Sector outlines and the center image.
    Background,
    /// Infill, arrow and line tracks.
    Decoration,
    /// Percentile envelopes.
    EnvelopeFill,
    /// Mean lines.
    MeanLine,
    /// Point markers.
    Marker,
    /// Sector labels.
    Text,
}

/// A position in polar figure space.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PolarPoint {
    /// Degrees clockwise from 12 o'clock.
    pub theta: f64,
    /// Radius in radial units (100 is the plot edge).
    pub r: f64,
}

impl PolarPoint {
    /// Build a polar point.
    pub fn new(theta: f64, r: f64) -> Self {
        Self { theta, r }
    }
}

/// Fill color with an opacity multiplier.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Paint {
    /// Color.
    pub color: ColorDef,
    /// Opacity multiplier applied on top of the color's own alpha.
    pub alpha: f64,
}

/// Stroke color, width and dash pattern.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Stroke {
    /// Color.
    pub color: ColorDef,
    /// Opacity multiplier.
    pub alpha: f64,
    /// Width in points.
    pub width: f64,
    /// Dash pattern.
    pub style: LineStyle,
}

/// Shape to draw, in polar coordinates.
#[derive(Clone, Debug, PartialEq)]
pub enum Primitive {
    /// Annular wedge between two angles and two radii.
    Wedge {
        /// `(start, end)` angles in degrees.
        theta: (f64, f64),
        /// `(inner, outer)` radii.
        r: (f64, f64),
        /// Interior paint, `None` for outline only.
        fill: Option<Paint>,
        /// Border, `None` for no border.
        stroke: Option<Stroke>,
    },
    /// Arrow: a shaft centered in `r`, optionally ending in a head spanning all of `r`.
    Arrow {
        /// `(tail, tip)` angles in degrees.
        theta: (f64, f64),
        /// `(inner, outer)` radii of the head.
        r: (f64, f64),
        /// Shaft thickness as a fraction of `r`'s span.
        shaft_ratio: f64,
        /// Head length in degrees; `0` draws the shaft only.
        head_deg: f64,
        /// Interior paint.
        fill: Paint,
        /// Edge stroke.
        stroke: Stroke,
    },
    /// Open polyline; consecutive vertices are joined by interpolating in polar space, so
    /// two vertices at the same radius trace an arc.
    Polyline {
        /// Vertices in drawing order.
        points: Vec<PolarPoint>,
        /// Stroke.
        stroke: Stroke,
    },
    /// Filled region between two polylines sampled at the same angles.
    Band {
        /// Lower edge.
        lower: Vec<PolarPoint>,
        /// Upper edge.
        upper: Vec<PolarPoint>,
        /// Interior paint.
        fill: Paint,
    },
    /// Point glyph.
    Marker {
        /// Glyph center.
        at: PolarPoint,
        /// Radial band framing the glyph.
        r_lim: (f64, f64),
        /// Glyph.
        shape: MarkerShape,
        /// Glyph area in square points.
        size: f64,
        /// Glyph color.
        color: ColorDef,
        /// Edge width in points.
        linewidth: f64,
    },
    /// Tangentially rotated text.
    Label {
        /// Anchor (text center).
        at: PolarPoint,
        /// Text.
        text: String,
        /// Font size in points.
        size: f64,
        /// Text color.
        color: ColorDef,
    },
}

/// One draw instruction: what to draw, where it stacks, and where it came from.
#[derive(Clone, Debug, PartialEq)]
pub struct DrawCall {
    /// Stacking layer.
    pub layer: Layer,
    /// Owning sector.
    pub sector: String,
    /// Owning track, `None` for sector furniture (outline, label).
    pub track: Option<String>,
    /// Geometry and paint.
    pub primitive: Primitive,
}
