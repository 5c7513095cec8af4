/// Convenience result type used across the crate.
pub type StampResult<T> = Result<T, StampError>;

/// Top-level error taxonomy used by the effect APIs.
///
/// Parameter ranges are not checked by the rebuild/render steps; these variants only cover host
/// contract violations the effect cannot repair on its own.
#[derive(thiserror::Error, Debug)]
pub enum StampError {
    /// Invalid user-provided parameters or buffers.
    #[error("validation error: {0}")]
    Validation(String),

    /// The raster engine or the cached surfaces cannot serve the request.
    #[error("render error: {0}")]
    Render(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl StampError {
    /// Build a [`StampError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`StampError::Render`] value.
    pub fn render(msg: impl Into<String>) -> Self {
        Self::Render(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
