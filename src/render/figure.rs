use std::path::PathBuf;

use crate::config::color::ColorDef;
use crate::foundation::core::{FigureSize, Rect};
use crate::render::legend::LegendLayout;
use crate::render::polar::PolarFrame;
use crate::render::primitive::{DrawCall, Layer};

/// Raster image composited at the pole.
#[derive(Clone, Debug, PartialEq)]
pub struct CenterImage {
    /// Image file; decoded at export time.
    pub path: PathBuf,
    /// Longest side as a fraction of the figure's shorter side.
    pub size_frac: f64,
}

/// A fully assembled calendar figure, ready for export.
#[derive(Clone, Debug, PartialEq)]
pub struct Figure {
    size: FigureSize,
    facecolor: ColorDef,
    calls: Vec<DrawCall>,
    legend: LegendLayout,
    center_image: Option<CenterImage>,
}

impl Figure {
    /// Assemble a figure; draw calls are stably sorted by layer so emission order is kept
    /// within a layer.
    pub fn new(
        size: FigureSize,
        facecolor: ColorDef,
        mut calls: Vec<DrawCall>,
        legend: LegendLayout,
        center_image: Option<CenterImage>,
    ) -> Self {
        calls.sort_by_key(|c| c.layer);
        Self {
            size,
            facecolor,
            calls,
            legend,
            center_image,
        }
    }

    /// Figure size in inches.
    pub fn size(&self) -> FigureSize {
        self.size
    }

    /// Background and padding color.
    pub fn facecolor(&self) -> ColorDef {
        self.facecolor
    }

    /// Draw calls in paint order.
    pub fn calls(&self) -> &[DrawCall] {
        &self.calls
    }

    /// Draw calls on one layer.
    pub fn calls_on(&self, layer: Layer) -> impl Iterator<Item = &DrawCall> {
        self.calls.iter().filter(move |c| c.layer == layer)
    }

    /// Placed legend.
    pub fn legend(&self) -> &LegendLayout {
        &self.legend
    }

    /// Image composited at the pole, if any.
    pub fn center_image(&self) -> Option<&CenterImage> {
        self.center_image.as_ref()
    }

    /// Polar-to-figure mapping.
    pub fn frame(&self) -> PolarFrame {
        PolarFrame::for_figure(self.size)
    }

    /// Region holding everything drawable: the figure rectangle plus any legend spill-over.
    pub fn content_bounds(&self) -> Rect {
        let page = Rect::new(0.0, 0.0, self.size.width_pt(), self.size.height_pt());
        match self.legend.bounds() {
            Some(legend) => page.union(legend),
            None => page,
        }
    }

    /// Vector rendition of the figure.
    pub fn to_svg(&self) -> String {
        crate::render::svg::figure_to_svg(self, crate::render::svg::SvgTarget::Document)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/figure.rs"]
mod tests;
