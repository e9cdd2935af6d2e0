/// Convenience result type used across the crate.
pub type CalendarResult<T> = Result<T, CalendarError>;

/// Top-level error taxonomy used by calendar APIs.
#[derive(thiserror::Error, Debug)]
pub enum CalendarError {
    /// Missing or malformed configuration, unresolvable color key, unknown track type.
    #[error("configuration error: {0}")]
    Config(String),

    /// Unparseable timestamp or missing column in a tabular data source.
    #[error("data format error: {0}")]
    DataFormat(String),

    /// Invalid month range (end before start, or outside the day-of-year domain).
    #[error("range error: {0}")]
    Range(String),

    /// Errors while rasterizing or encoding the output image.
    #[error("render error: {0}")]
    Render(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl CalendarError {
    /// Build a [`CalendarError::Config`] value.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Build a [`CalendarError::DataFormat`] value.
    pub fn data_format(msg: impl Into<String>) -> Self {
        Self::DataFormat(msg.into())
    }

    /// Build a [`CalendarError::Range`] value.
    pub fn range(msg: impl Into<String>) -> Self {
        Self::Range(msg.into())
    }

    /// Build a [`CalendarError::Render`] value.
    pub fn render(msg: impl Into<String>) -> Self {
        Self::Render(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
