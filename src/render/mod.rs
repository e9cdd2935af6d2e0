pub(crate) mod export;
pub(crate) mod figure;
pub(crate) mod glyph;
pub(crate) mod legend;
pub(crate) mod polar;
pub(crate) mod primitive;
pub(crate) mod svg;
pub(crate) mod track;
