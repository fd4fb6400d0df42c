//! Error types for the portfolio page

use thiserror::Error;

/// Result type alias for page operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while configuring, rendering or laying out the page.
///
/// Scroll tracking and spring integration never fail; degenerate input there
/// is skipped or clamped instead.
#[derive(Error, Debug)]
pub enum Error {
    /// Invalid configuration (section list, spring parameters, viewport)
    #[error("Invalid configuration: {0}")]
    ConfigError(String),

    /// Portfolio content failed validation
    #[error("Invalid content: {0}")]
    ContentError(String),

    /// Failed to lay out a document
    #[error("Layout failed: {0}")]
    LayoutError(String),

    /// Failed to render the page
    #[error("Rendering failed: {0}")]
    RenderError(String),

    /// Reading or writing a file failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON config or content could not be parsed
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn io_and_json_errors_convert() {
        let io: Error = std::io::Error::new(std::io::ErrorKind::NotFound, "content.json").into();
        assert!(io.to_string().starts_with("I/O error"));
        let json: Error = serde_json::from_str::<u32>("nope").unwrap_err().into();
        assert!(json.to_string().starts_with("JSON error"));
        assert_eq!(
            Error::ConfigError("bad".into()).to_string(),
            "Invalid configuration: bad"
        );
    }
}
