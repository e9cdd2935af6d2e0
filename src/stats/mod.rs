pub(crate) mod daily;
pub(crate) mod observation;
pub(crate) mod percentile;
