use std::path::{Path, PathBuf};
use thiserror::Error;

pub type Result<T> = std::result::Result<T, ConvertError>;

#[derive(Error, Debug)]
pub enum ConvertError {
    #[error("failed to access {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid JSON in {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to serialize {}: {source}", path.display())]
    Serialize {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// Valid JSON that does not have the shape of a chart or manifest
    #[error("unexpected structure in {}: {reason}", path.display())]
    Schema { path: PathBuf, reason: String },

    #[error("invalid configuration: {reason}")]
    InvalidConfig { reason: String },
}

impl ConvertError {
    pub fn io(path: &Path, source: std::io::Error) -> Self {
        ConvertError::Io {
            path: path.to_path_buf(),
            source,
        }
    }

    pub fn parse(path: &Path, source: serde_json::Error) -> Self {
        ConvertError::Parse {
            path: path.to_path_buf(),
            source,
        }
    }

    pub fn serialize(path: &Path, source: serde_json::Error) -> Self {
        ConvertError::Serialize {
            path: path.to_path_buf(),
            source,
        }
    }

    pub fn schema(path: &Path, reason: impl Into<String>) -> Self {
        ConvertError::Schema {
            path: path.to_path_buf(),
            reason: reason.into(),
        }
    }
}
