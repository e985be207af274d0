use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::{BEST_FILE_ENV, BEST_FILE_NAME};

#[derive(thiserror::Error, Debug)]
pub enum StoreError {
    #[error("io error: {0}")]
    Io(#[from] io::Error),
    #[error("malformed best-score file: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
struct BestRecord {
    best: u64,
}

/// The single value kept between sessions.
pub struct BestScoreStore {
    path: PathBuf,
}

impl BestScoreStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// `explicit`, else `$SUM_RISE_BEST_FILE`, else a dotfile in `$HOME`.
    pub fn resolve(explicit: Option<PathBuf>) -> Self {
        let path = explicit
            .or_else(|| std::env::var_os(BEST_FILE_ENV).map(PathBuf::from))
            .unwrap_or_else(|| {
                std::env::var_os("HOME")
                    .map(PathBuf::from)
                    .unwrap_or_default()
                    .join(BEST_FILE_NAME)
            });
        Self::new(path)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// A missing file is a fresh install, not an error.
    pub fn load(&self) -> Result<u64, StoreError> {
        match fs::read_to_string(&self.path) {
            Ok(text) => {
                let record: BestRecord = serde_json::from_str(&text)?;
                Ok(record.best)
            }
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(0),
            Err(err) => Err(err.into()),
        }
    }

    pub fn save(&self, best: u64) -> Result<(), StoreError> {
        if let Some(dir) = self.path.parent().filter(|d| !d.as_os_str().is_empty()) {
            fs::create_dir_all(dir)?;
        }
        let text = serde_json::to_string(&BestRecord { best })?;
        fs::write(&self.path, text)?;
        Ok(())
    }

    /// Loads the stored best, treating an unreadable file as zero.
    pub fn load_or_default(&self) -> u64 {
        match self.load() {
            Ok(best) => {
                tracing::debug!(target: "sumrise.store", path = %self.path.display(), best, "best score loaded");
                best
            }
            Err(err) => {
                tracing::warn!(target: "sumrise.store", path = %self.path.display(), error = %err, "ignoring best-score file");
                0
            }
        }
    }
}
