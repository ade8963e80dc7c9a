use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("config file not found: {0}")]
    FileNotFound(PathBuf),

    #[error("config parse error: {0}")]
    ParseError(String),

    #[error("config validation error: {0}")]
    ValidationError(String),
}

/// Reasons a capture attempt could not produce a stream.
#[derive(Debug, thiserror::Error)]
pub enum CaptureError {
    #[error("screen capture is not available on this platform")]
    Unsupported,

    #[error("screen capture requires a secure context")]
    InsecureContext,
}

#[derive(Debug, thiserror::Error)]
pub enum ScreenCheckError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Capture(#[from] CaptureError),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Other(String),
}
