//! Error types for obstruction map rendering.

use thiserror::Error;

/// Result type alias using RenderError.
pub type RenderResult<T> = Result<T, RenderError>;

/// Primary error type for render operations.
#[derive(Debug, Error)]
pub enum RenderError {
    // === Input Errors ===
    #[error("Invalid obstruction map data: {0}")]
    InvalidGrid(String),

    #[error("Invalid color '{0}': expected 8 hex digits in AARRGGBB order")]
    InvalidColorFormat(String),

    #[error("Invalid configuration value for '{field}': {message}")]
    InvalidConfig { field: &'static str, message: String },

    // === Output Errors ===
    #[error("PNG encoding failed: {0}")]
    Encoding(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl RenderError {
    /// True when the error was caused by caller input rather than the output sink.
    pub fn is_input_error(&self) -> bool {
        matches!(
            self,
            RenderError::InvalidGrid(_)
                | RenderError::InvalidColorFormat(_)
                | RenderError::InvalidConfig { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_input_error_classification() {
        assert!(RenderError::InvalidGrid("empty".into()).is_input_error());
        assert!(RenderError::InvalidColorFormat("xyz".into()).is_input_error());
        assert!(!RenderError::Encoding("short".into()).is_input_error());

        let io = std::io::Error::new(std::io::ErrorKind::Other, "disk full");
        assert!(!RenderError::from(io).is_input_error());
    }

    #[test]
    fn test_error_messages() {
        let err = RenderError::InvalidConfig {
            field: "upscale_factor",
            message: "must be at least 1".into(),
        };
        assert_eq!(
            err.to_string(),
            "Invalid configuration value for 'upscale_factor': must be at least 1"
        );
    }
}
