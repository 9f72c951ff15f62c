use thiserror::Error;

/// Failure reported by a platform backend.
///
/// The message text is part of the contract: the option engine propagates it
/// verbatim into user-visible diagnostics.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PlatformError {
    #[error("unknown color name \"{0}\"")]
    UnknownColor(String),

    #[error("font \"{0}\" doesn't exist")]
    UnknownFont(String),

    #[error("style \"{0}\" doesn't exist")]
    UnknownStyle(String),

    #[error("bitmap \"{0}\" isn't defined")]
    UnknownBitmap(String),

    #[error("bad cursor spec \"{0}\"")]
    BadCursor(String),

    #[error("bad window path name \"{0}\"")]
    BadWindowPath(String),

    #[error("{0}")]
    Backend(String),
}
