use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to decode image '{name}': {reason}")]
    DecodeFailed { name: String, reason: String },
    #[error("an asset named '{0}' is already loaded")]
    DuplicateName(String),
    #[error("invalid scale {width}x{height} for '{name}'")]
    InvalidScale {
        name: String,
        width: u32,
        height: u32,
    },
    #[error("file '{}' not found", .0.display())]
    NotFound(PathBuf),
    #[error("failed to read '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DrawError {
    #[error("image '{0}' is not in the resource cache")]
    UnknownAsset(String),
    #[error("draw issued outside of a frame; call clear first")]
    FrameNotStarted,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid argument `{name}`: {reason}")]
pub struct InvalidArgument {
    pub name: &'static str,
    pub reason: String,
}

impl InvalidArgument {
    pub fn new(name: &'static str, reason: impl Into<String>) -> Self {
        Self {
            name,
            reason: reason.into(),
        }
    }
}

/// Failure reported by a platform collaborator (display surface, event source).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("platform error: {0}")]
pub struct PlatformError(pub String);

impl PlatformError {
    pub fn new(msg: impl ToString) -> Self {
        Self(msg.to_string())
    }
}

#[derive(Debug, Error)]
pub enum EngineError {
    #[error(transparent)]
    Load(#[from] LoadError),
    #[error(transparent)]
    Draw(#[from] DrawError),
    #[error(transparent)]
    InvalidArgument(#[from] InvalidArgument),
    #[error(transparent)]
    Platform(#[from] PlatformError),
}
