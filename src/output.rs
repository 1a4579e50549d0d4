use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use serde::{Serialize, Serializer};
use serde_json::Value;

use crate::error::{Result, SplitError};

/// What happened to one output file.
#[derive(Debug, Clone, PartialEq)]
pub enum WriteOutcome {
    Written { path: PathBuf, bytes: u64 },
    Failed { path: PathBuf, reason: String },
}

impl WriteOutcome {
    pub fn path(&self) -> &Path {
        match self {
            WriteOutcome::Written { path, .. } | WriteOutcome::Failed { path, .. } => path,
        }
    }

    pub fn is_written(&self) -> bool {
        matches!(self, WriteOutcome::Written { .. })
    }

    /// Size on disk, if the write went through.
    pub fn bytes(&self) -> Option<u64> {
        match self {
            WriteOutcome::Written { bytes, .. } => Some(*bytes),
            WriteOutcome::Failed { .. } => None,
        }
    }
}

/// Borrowed key/value pairs serialized as a JSON object in slice order.
pub struct Entries<'a>(pub &'a [(&'a String, &'a Value)]);

impl Serialize for Entries<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_map(self.0.iter().map(|(k, v)| (*k, *v)))
    }
}

/// Pretty-print `value` (2-space indent, UTF-8 kept) to `path` and measure it.
pub fn write_json<T: Serialize + ?Sized>(path: &Path, value: &T) -> WriteOutcome {
    match try_write(path, value) {
        Ok(bytes) => WriteOutcome::Written {
            path: path.to_path_buf(),
            bytes,
        },
        Err(e) => WriteOutcome::Failed {
            path: path.to_path_buf(),
            reason: e.to_string(),
        },
    }
}

fn try_write<T: Serialize + ?Sized>(path: &Path, value: &T) -> anyhow::Result<u64> {
    let file = File::create(path)?;
    let mut w = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut w, value)?;
    w.flush()?;
    Ok(fs::metadata(path)?.len())
}

pub fn ensure_dir(path: &Path) -> Result<()> {
    fs::create_dir_all(path).map_err(|source| SplitError::OutputDir {
        path: path.to_path_buf(),
        source,
    })
}
