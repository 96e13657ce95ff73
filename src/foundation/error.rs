/// Convenience result type used across the crate.
pub type RoundelResult<T> = Result<T, RoundelError>;

/// Top-level error taxonomy used by the compositor APIs.
///
/// Deferred work (unsized widget, absent source image) is never an error;
/// these variants cover genuine contract violations only.
#[derive(thiserror::Error, Debug)]
pub enum RoundelError {
    /// Invalid caller-provided data (dimensions, byte lengths, config values).
    #[error("validation error: {0}")]
    Validation(String),

    /// Errors while rasterizing or manipulating pixel buffers.
    #[error("raster error: {0}")]
    Raster(String),

    /// Errors while registering fonts or shaping the initials glyph.
    #[error("text error: {0}")]
    Text(String),

    /// Errors when deserializing style attribute bundles.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl RoundelError {
    /// Build a [`RoundelError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`RoundelError::Raster`] value.
    pub fn raster(msg: impl Into<String>) -> Self {
        Self::Raster(msg.into())
    }

    /// Build a [`RoundelError::Text`] value.
    pub fn text(msg: impl Into<String>) -> Self {
        Self::Text(msg.into())
    }

    /// Build a [`RoundelError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
