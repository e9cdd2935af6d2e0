use std::io::Cursor;
use std::path::Path;
use std::sync::Arc;

use anyhow::Context;
use image::{DynamicImage, ImageFormat, Rgba, RgbaImage, imageops};

use crate::foundation::core::POINTS_PER_INCH;
use crate::foundation::error::{CalendarError, CalendarResult};
use crate::foundation::math::{premultiply_rgba8_in_place, unpremultiply_rgba8_in_place};
use crate::render::figure::{CenterImage, Figure};
use crate::render::svg::{SvgTarget, figure_to_svg};

// Refuse pathological allocations; callers wanting larger output should lower the dpi.
const MAX_DIM: u32 = 16_384;

/// Export resolution and padding.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SaveOpts {
    /// Pixels per inch.
    pub dpi: f64,
    /// Padding around the tight bounding box, in inches.
    pub pad_inches: f64,
}

impl Default for SaveOpts {
    fn default() -> Self {
        Self {
            dpi: 300.0,
            pad_inches: 0.1,
        }
    }
}

impl SaveOpts {
    fn validate(&self) -> CalendarResult<()> {
        if !self.dpi.is_finite() || self.dpi <= 0.0 {
            return Err(CalendarError::render(format!("dpi must be positive, got {}", self.dpi)));
        }
        if !self.pad_inches.is_finite() || self.pad_inches < 0.0 {
            return Err(CalendarError::render(format!(
                "pad_inches must be non-negative, got {}",
                self.pad_inches
            )));
        }
        Ok(())
    }

    fn scale(&self) -> f64 {
        self.dpi / POINTS_PER_INCH
    }
}

/// Write `figure` to `path`; the format follows the file extension.
///
/// `.svg` writes the vector document. Every other extension is rasterized at `opts.dpi`,
/// cropped to the drawn content, padded with the figure facecolor and encoded. Nothing is
/// written unless encoding succeeded.
#[tracing::instrument(skip(figure, path), fields(path = %path.display()))]
pub fn save_plot(figure: &Figure, path: &Path, opts: &SaveOpts) -> CalendarResult<()> {
    opts.validate()?;

    let is_svg = path
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("svg"));

    let bytes = if is_svg {
        figure.to_svg().into_bytes()
    } else {
        let format = ImageFormat::from_path(path).map_err(|e| {
            CalendarError::render(format!(
                "cannot pick an image format for '{}': {e}",
                path.display()
            ))
        })?;
        let img = rasterize(figure, opts)?;
        encode(img, format)?
    };

    std::fs::write(path, &bytes).with_context(|| format!("write '{}'", path.display()))?;
    tracing::info!(bytes = bytes.len(), "figure saved");
    Ok(())
}

/// Render `figure` to straight-alpha RGBA: tight-cropped, padded and on the facecolor.
pub fn rasterize(figure: &Figure, opts: &SaveOpts) -> CalendarResult<RgbaImage> {
    opts.validate()?;
    let scale = opts.scale();
    let bounds = figure.content_bounds();

    let svg = figure_to_svg(figure, SvgTarget::Raster);
    let tree = usvg::Tree::from_data(svg.as_bytes(), &svg_options())
        .map_err(|e| CalendarError::render(format!("figure svg did not parse: {e}")))?;

    let width = to_px(f64::from(tree.size().width()) * scale)?;
    let height = to_px(f64::from(tree.size().height()) * scale)?;

    // Center image sits on the background layer, beneath every draw call.
    let mut underlay = RgbaImage::new(width, height);
    if let Some(center) = figure.center_image() {
        let frame = figure.frame();
        let cx = (frame.center.x - bounds.x0) * scale;
        let cy = (frame.center.y - bounds.y0) * scale;
        let side = center.size_frac
            * figure.size().width_pt().min(figure.size().height_pt())
            * scale;
        composite_center_image(&mut underlay, center, (cx, cy), side)?;
    }
    let mut premul = underlay.into_raw();
    premultiply_rgba8_in_place(&mut premul);

    let int_size = resvg::tiny_skia::IntSize::from_wh(width, height)
        .ok_or_else(|| CalendarError::render("figure pixmap has zero size"))?;
    let mut pixmap = resvg::tiny_skia::Pixmap::from_vec(premul, int_size)
        .ok_or_else(|| CalendarError::render("failed to allocate figure pixmap"))?;
    resvg::render(
        &tree,
        resvg::tiny_skia::Transform::from_scale(scale as f32, scale as f32),
        &mut pixmap.as_mut(),
    );

    let mut rgba = pixmap.take();
    unpremultiply_rgba8_in_place(&mut rgba);
    let canvas = RgbaImage::from_raw(width, height, rgba)
        .ok_or_else(|| CalendarError::render("pixmap size mismatch"))?;

    let cropped = crop_to_content(&canvas);
    let pad = (opts.pad_inches * opts.dpi).round() as u32;
    let face = Rgba(figure.facecolor().to_rgba8());
    let mut out = RgbaImage::from_pixel(
        cropped.width() + 2 * pad,
        cropped.height() + 2 * pad,
        face,
    );
    imageops::overlay(&mut out, &cropped, i64::from(pad), i64::from(pad));

    tracing::debug!(
        width = out.width(),
        height = out.height(),
        dpi = opts.dpi,
        "figure rasterized"
    );
    Ok(out)
}

/// Smallest sub-image holding every pixel with non-zero alpha; the whole image when empty.
pub fn crop_to_content(img: &RgbaImage) -> RgbaImage {
    let mut min = (u32::MAX, u32::MAX);
    let mut max = (0u32, 0u32);
    let mut any = false;
    for (x, y, px) in img.enumerate_pixels() {
        if px[3] == 0 {
            continue;
        }
        any = true;
        min = (min.0.min(x), min.1.min(y));
        max = (max.0.max(x), max.1.max(y));
    }
    if !any {
        return img.clone();
    }
    imageops::crop_imm(img, min.0, min.1, max.0 - min.0 + 1, max.1 - min.1 + 1).to_image()
}

fn composite_center_image(
    canvas: &mut RgbaImage,
    center: &CenterImage,
    at: (f64, f64),
    side_px: f64,
) -> CalendarResult<()> {
    let img = image::open(&center.path)
        .with_context(|| format!("open center image '{}'", center.path.display()))?
        .to_rgba8();
    let (w, h) = img.dimensions();
    if w == 0 || h == 0 {
        return Err(CalendarError::render(format!(
            "center image '{}' is empty",
            center.path.display()
        )));
    }

    let fit = side_px / f64::from(w.max(h));
    let tw = ((f64::from(w) * fit).round() as u32).max(1);
    let th = ((f64::from(h) * fit).round() as u32).max(1);
    let resized = imageops::resize(&img, tw, th, imageops::FilterType::Lanczos3);

    let x = (at.0 - 0.5 * f64::from(tw)).round() as i64;
    let y = (at.1 - 0.5 * f64::from(th)).round() as i64;
    imageops::overlay(canvas, &resized, x, y);
    Ok(())
}

fn encode(img: RgbaImage, format: ImageFormat) -> CalendarResult<Vec<u8>> {
    let dynamic = match format {
        // No alpha channel in JPEG.
        ImageFormat::Jpeg => DynamicImage::ImageRgb8(DynamicImage::ImageRgba8(img).to_rgb8()),
        _ => DynamicImage::ImageRgba8(img),
    };
    let mut buf = Vec::new();
    dynamic
        .write_to(&mut Cursor::new(&mut buf), format)
        .map_err(|e| CalendarError::render(format!("encode {format:?}: {e}")))?;
    Ok(buf)
}

fn to_px(v: f64) -> CalendarResult<u32> {
    if !v.is_finite() || v <= 0.0 {
        return Err(CalendarError::render("figure has invalid width/height"));
    }
    let px = v.ceil() as u32;
    if px > MAX_DIM {
        return Err(CalendarError::render(format!(
            "raster size too large: {px} px (max {MAX_DIM})"
        )));
    }
    Ok(px.max(1))
}

fn svg_options() -> usvg::Options<'static> {
    let mut db = usvg::fontdb::Database::new();
    db.load_system_fonts();
    usvg::Options {
        fontdb: Arc::new(db),
        ..Default::default()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/export.rs"]
mod tests;
