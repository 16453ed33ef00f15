use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::parse::intermediate;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("failed to list {}: {source}", .path.display())]
    ReadDir {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to read spec {}: {source}", .path.display())]
    ReadSpec {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to parse spec {}: {source}", .path.display())]
    ParseSpec {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("unsupported spec {}: {source}", .path.display())]
    Unsupported {
        path: PathBuf,
        #[source]
        source: intermediate::Error,
    },

    #[error("failed to write {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to render page {name}: {message}")]
    Render { name: String, message: String },

    #[error("configuration error: {0}")]
    Config(String),

    #[error("could not resolve working directory: {0}")]
    WorkingDir(#[source] io::Error),
}

impl Error {
    pub(crate) fn read_dir(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Error::ReadDir {
            path: path.into(),
            source,
        }
    }
}
