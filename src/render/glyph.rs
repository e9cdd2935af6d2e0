use kurbo::{Circle, Shape};

use crate::config::style::MarkerShape;
use crate::foundation::core::{BezPath, Point};

const STAR_INNER: f64 = 0.381_966;

/// Outline of a marker glyph of `diameter` points centred on `center` (y down).
///
/// Stroke-only glyphs (`x`, `+`) come back as open sub-paths.
pub fn marker_path(shape: MarkerShape, center: Point, diameter: f64) -> BezPath {
    let r = 0.5 * diameter.max(0.0);
    match shape {
        MarkerShape::Circle => Circle::new(center, r).to_path(0.01),
        MarkerShape::Square => polygon(center, &[r * std::f64::consts::SQRT_2; 4], 45.0),
        MarkerShape::TriangleUp => polygon(center, &[r; 3], 0.0),
        MarkerShape::TriangleRight => polygon(center, &[r; 3], 90.0),
        MarkerShape::TriangleDown => polygon(center, &[r; 3], 180.0),
        MarkerShape::TriangleLeft => polygon(center, &[r; 3], 270.0),
        MarkerShape::Diamond => polygon(center, &[r; 4], 0.0),
        MarkerShape::ThinDiamond => {
            let mut path = polygon(center, &[r; 4], 0.0);
            path.apply_affine(
                kurbo::Affine::translate(center.to_vec2())
                    * kurbo::Affine::scale_non_uniform(0.6, 1.0)
                    * kurbo::Affine::translate(-center.to_vec2()),
            );
            path
        }
        MarkerShape::Star => {
            let radii: Vec<f64> = (0..10)
                .map(|i| if i % 2 == 0 { r } else { r * STAR_INNER })
                .collect();
            polygon(center, &radii, 0.0)
        }
        MarkerShape::Pentagon => polygon(center, &[r; 5], 0.0),
        MarkerShape::Hexagon => polygon(center, &[r; 6], 0.0),
        MarkerShape::Cross => spokes(center, r, 45.0),
        MarkerShape::Plus => spokes(center, r, 0.0),
    }
}

/// Scatter sizes are areas in square points; glyphs are drawn at the matching diameter.
pub fn area_to_diameter(area: f64) -> f64 {
    area.max(0.0).sqrt()
}

// Vertex `i` sits at `radii[i]`, clockwise from 12 o'clock, first vertex at `rotation_deg`.
fn polygon(center: Point, radii: &[f64], rotation_deg: f64) -> BezPath {
    let n = radii.len() as f64;
    let mut path = BezPath::new();
    for (i, r) in radii.iter().enumerate() {
        let p = on_circle(center, *r, rotation_deg + 360.0 * i as f64 / n);
        if i == 0 {
            path.move_to(p);
        } else {
            path.line_to(p);
        }
    }
    path.close_path();
    path
}

fn spokes(center: Point, r: f64, rotation_deg: f64) -> BezPath {
    let mut path = BezPath::new();
    for k in 0..2 {
        let a = rotation_deg + 90.0 * f64::from(k);
        path.move_to(on_circle(center, r, a));
        path.line_to(on_circle(center, r, a + 180.0));
    }
    path
}

fn on_circle(center: Point, r: f64, deg: f64) -> Point {
    let (sin, cos) = deg.to_radians().sin_cos();
    Point::new(center.x + r * sin, center.y - r * cos)
}

#[cfg(test)]
#[path = "../../tests/unit/render/glyph.rs"]
mod tests;
