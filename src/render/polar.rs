use kurbo::{CircleSegment, Shape};

use crate::foundation::core::{BezPath, FigureSize, Point, Rect};
use crate::render::primitive::PolarPoint;

/// Outer radial limit: the 0..100 plot range plus a 10-unit margin.
pub const RADIAL_LIMIT: f64 = 110.0;

/// Largest angular step between interpolated vertices of a polar path.
pub const MAX_STEP_DEG: f64 = 1.0;

const TOLERANCE: f64 = 0.05;

// Default subplot box (left, right, bottom, top) as figure fractions.
const AXES_BOX: (f64, f64, f64, f64) = (0.125, 0.9, 0.11, 0.88);

/// Mapping from polar plot units to figure points (SVG space, y down).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PolarFrame {
    /// Pole position in points.
    pub center: Point,
    /// Points per radial unit.
    pub unit: f64,
}

impl PolarFrame {
    /// Frame whose `RADIAL_LIMIT` circle has radius `outer_pt` around `center`.
    pub fn new(center: Point, outer_pt: f64) -> Self {
        Self {
            center,
            unit: outer_pt / RADIAL_LIMIT,
        }
    }

    /// Square polar axes inscribed in the default subplot box of a figure.
    pub fn for_figure(size: FigureSize) -> Self {
        let (w, h) = (size.width_pt(), size.height_pt());
        let (left, right, bottom, top) = AXES_BOX;
        let center = Point::new(0.5 * (left + right) * w, (1.0 - 0.5 * (bottom + top)) * h);
        let outer = 0.5 * ((right - left) * w).min((top - bottom) * h);
        Self::new(center, outer)
    }

    /// Radius in points of a radial value.
    pub fn radius_pt(&self, r: f64) -> f64 {
        r * self.unit
    }

    /// Bounding square of the full polar axes.
    pub fn bounds(&self) -> Rect {
        let r = self.radius_pt(RADIAL_LIMIT);
        Rect::new(
            self.center.x - r,
            self.center.y - r,
            self.center.x + r,
            self.center.y + r,
        )
    }

    /// Figure point of a polar position; `theta` runs clockwise from 12 o'clock.
    pub fn point(&self, p: PolarPoint) -> Point {
        let (sin, cos) = p.theta.to_radians().sin_cos();
        let r = self.radius_pt(p.r);
        Point::new(self.center.x + r * sin, self.center.y - r * cos)
    }

    /// Annular wedge between two angles and two radii.
    pub fn wedge(&self, theta: (f64, f64), r: (f64, f64)) -> BezPath {
        let (inner, outer) = (r.0.min(r.1), r.0.max(r.1));
        CircleSegment::new(
            self.center,
            self.radius_pt(outer),
            self.radius_pt(inner),
            (theta.0 - 90.0).to_radians(),
            (theta.1 - theta.0).to_radians(),
        )
        .to_path(TOLERANCE)
    }

    /// Open path through `points`, interpolated in polar space.
    pub fn polyline(&self, points: &[PolarPoint]) -> BezPath {
        let mut path = BezPath::new();
        self.trace(&mut path, points, true);
        path
    }

    /// Closed region between a lower and an upper edge.
    pub fn band(&self, lower: &[PolarPoint], upper: &[PolarPoint]) -> BezPath {
        let mut path = BezPath::new();
        if lower.is_empty() || upper.is_empty() {
            return path;
        }
        self.trace(&mut path, lower, true);
        let reversed: Vec<PolarPoint> = upper.iter().rev().copied().collect();
        self.trace(&mut path, &reversed, false);
        path.close_path();
        path
    }

    /// Arrow outline running clockwise from `theta.0` to `theta.1`.
    ///
    /// The shaft is centred in `r` with thickness `shaft_ratio` of its span; a head of
    /// `head_deg` degrees spans the whole of `r`.
    pub fn arrow(&self, theta: (f64, f64), r: (f64, f64), shaft_ratio: f64, head_deg: f64) -> BezPath {
        let (t0, t1) = theta;
        let mid = 0.5 * (r.0 + r.1);
        let half = 0.5 * (r.1 - r.0).abs() * shaft_ratio;
        let neck = t1 - head_deg.clamp(0.0, (t1 - t0).abs());

        let mut outline = vec![PolarPoint::new(t0, mid - half), PolarPoint::new(neck, mid - half)];
        if head_deg > 0.0 {
            outline.push(PolarPoint::new(neck, r.0.min(r.1)));
            outline.push(PolarPoint::new(t1, mid));
            outline.push(PolarPoint::new(neck, r.0.max(r.1)));
        }
        outline.push(PolarPoint::new(neck, mid + half));
        outline.push(PolarPoint::new(t0, mid + half));

        let mut path = BezPath::new();
        self.trace(&mut path, &outline, true);
        path.close_path();
        path
    }

    fn trace(&self, path: &mut BezPath, points: &[PolarPoint], start: bool) {
        let Some(first) = points.first() else {
            return;
        };
        if start {
            path.move_to(self.point(*first));
        } else {
            path.line_to(self.point(*first));
        }
        for pair in points.windows(2) {
            let (a, b) = (pair[0], pair[1]);
            let steps = ((b.theta - a.theta).abs() / MAX_STEP_DEG).ceil().max(1.0) as usize;
            for i in 1..=steps {
                let t = i as f64 / steps as f64;
                let p = PolarPoint::new(
                    crate::foundation::math::lerp(a.theta, b.theta, t),
                    crate::foundation::math::lerp(a.r, b.r, t),
                );
                path.line_to(self.point(p));
            }
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/polar.rs"]
mod tests;
