/// Error types shared by the layout engine and the rendering surfaces.
use std::path::PathBuf;

/// A malformed part profile or layout configuration.
///
/// Raised before any geometry is computed; a drawing is never partially built.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ValidationError {
    #[error("profile has no sections")]
    Empty,

    #[error("section {index}: {field} must be positive and finite, got {value}")]
    NonPositive {
        index: usize,
        field: &'static str,
        value: f64,
    },

    #[error("section {index}: minor diameter {minor} exceeds major diameter {major}")]
    MinorExceedsMajor { index: usize, minor: f64, major: f64 },

    #[error("section {index}: start offset {found} does not meet previous section end {expected}")]
    OffsetMismatch {
        index: usize,
        expected: f64,
        found: f64,
    },

    #[error("layout: {field} out of range, got {value}")]
    InvalidLayout { field: &'static str, value: f64 },
}

/// Failure to interpret a thread designation such as `M10x1.25`.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ThreadError {
    #[error("unrecognized thread designation: {0:?}")]
    Unrecognized(String),

    #[error("thread designation {0:?} has no pitch")]
    MissingPitch(String),
}

/// Failure of a drawing surface.
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("drawing backend failed: {0}")]
    Backend(String),

    #[error("no font available for text: {0}")]
    Font(String),

    #[error("image encoding failed: {0}")]
    Encode(String),

    #[error("surface cannot write {0:?} output")]
    UnsupportedFormat(crate::surface::OutputFormat),

    #[error("drawing bounds were not set before drawing")]
    BoundsNotSet,

    #[error("canvas has zero area")]
    EmptyCanvas,
}

/// Failure to load a drawing job.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("section {index}: {source}")]
    Thread { index: usize, source: ThreadError },

    #[error("section {index}: threaded section needs a minor diameter or a thread label")]
    MissingMinorDiameter { index: usize },

    #[error(transparent)]
    Validation(#[from] ValidationError),
}
