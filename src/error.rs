use std::path::PathBuf;

use thiserror::Error;

/// Failure to turn an input path into a parsed document.
#[derive(Error, Debug)]
pub enum LoadError {
    #[error("{} not found", .path.display())]
    NotFound { path: PathBuf },

    #[error("invalid JSON in {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Errors that stop a whole split run.
#[derive(Error, Debug)]
pub enum SplitError {
    #[error(transparent)]
    Load(#[from] LoadError),

    #[error("cannot create output directory {}: {source}", .path.display())]
    OutputDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

pub type Result<T> = std::result::Result<T, SplitError>;
