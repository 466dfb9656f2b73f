use thiserror::Error;

/// Errors raised by polygon editing operations.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum PolygonError {
    #[error("a polygon needs at least {min} vertices, got {got}")]
    TooFewVertices { min: usize, got: usize },

    #[error("A polygon must have at least 3 vertices.")]
    MinimumVertices,

    #[error("vertex index {index} is out of range for a polygon with {len} vertices")]
    NoSuchVertex { index: usize, len: usize },

    #[error("position ({lat}, {lng}) is not finite or lies outside the map")]
    InvalidPosition { lat: f64, lng: f64 },

    #[error("polygon is not attached to a map")]
    NotAttached,

    #[error("polygon is already attached to a map")]
    AlreadyAttached,
}

/// Errors related to game coordinate handling.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("plane {0} is out of range [0, 3]")]
    PlaneOutOfRange(i64),
}

/// Errors raised while replaying a session script.
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("failed to parse session script: {0}")]
    Parse(#[from] toml::de::Error),

    #[error(transparent)]
    Game(#[from] GameError),

    #[error("action {step} ({action}) requires an expanded polygon control")]
    ControlCollapsed { step: usize, action: &'static str },

    #[error("action {step} failed: {source}")]
    Polygon {
        step: usize,
        #[source]
        source: PolygonError,
    },
}

/// Clipboard write failure. Logged, never surfaced as an alert.
#[derive(Debug, Error)]
#[error("cannot copy text to clipboard: {reason}")]
pub struct ClipboardError {
    pub reason: String,
}

impl From<std::io::Error> for ClipboardError {
    fn from(err: std::io::Error) -> Self {
        Self {
            reason: err.to_string(),
        }
    }
}
