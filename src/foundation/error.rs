/// Crate-wide result alias.
pub type OverlayResult<T> = Result<T, OverlayError>;

/// Errors raised while extracting samples, validating configuration or producing frames.
#[derive(thiserror::Error, Debug)]
pub enum OverlayError {
    /// The activity document could not be read or does not match the expected schema.
    #[error("malformed document: {0}")]
    MalformedDocument(String),

    /// A rate, font size or unit selection is not valid.
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// Text could not be rasterized into a frame.
    #[error("render error: {0}")]
    Render(String),

    /// Filesystem and other contextual failures.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl OverlayError {
    /// Build a [`OverlayError::MalformedDocument`].
    pub fn malformed(msg: impl Into<String>) -> Self {
        Self::MalformedDocument(msg.into())
    }

    /// Build a [`OverlayError::InvalidConfiguration`].
    pub fn invalid_config(msg: impl Into<String>) -> Self {
        Self::InvalidConfiguration(msg.into())
    }

    /// Build a [`OverlayError::Render`].
    pub fn render(msg: impl Into<String>) -> Self {
        Self::Render(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
