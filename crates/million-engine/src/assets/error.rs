use std::fmt;

/// Failure while loading an asset. Never fatal; the frame renders without it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AssetError {
    NotFound(String),
    Io { name: String, message: String },
    Decode(String),
}

impl fmt::Display for AssetError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotFound(name) => write!(f, "asset not found: {name}"),
            Self::Io { name, message } => write!(f, "failed to read asset {name}: {message}"),
            Self::Decode(msg) => write!(f, "failed to decode image: {msg}"),
        }
    }
}

impl std::error::Error for AssetError {}
