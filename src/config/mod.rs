pub(crate) mod color;
pub(crate) mod legend;
pub(crate) mod model;
mod ordered;
pub(crate) mod registry;
pub(crate) mod style;
pub(crate) mod track;
