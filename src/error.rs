use thiserror::Error;

/// Errors surfaced by a render call. Nothing is written to the output path
/// when one of these is returned.
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("no samples supplied")]
    EmptySequence,
    #[error("{what} at index {index}: expected length {expected}, found {found}")]
    ShapeMismatch {
        what: &'static str,
        index: usize,
        expected: usize,
        found: usize,
    },
    #[error("limit `{field}` is missing or malformed: expected {expected} values, found {found:?}")]
    MissingLimits {
        field: &'static str,
        expected: usize,
        found: Option<usize>,
    },
    #[error("invalid control cycle duration: {0}")]
    InvalidCycleTime(f64),
    #[error("unsupported output format: {0}")]
    UnsupportedFormat(String),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("plot backend error: {0}")]
    Plot(String),
}

/// Errors raised while loading configuration or recordings from disk.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),
}
