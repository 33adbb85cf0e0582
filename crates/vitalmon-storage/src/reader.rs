use crate::ingest::ingest_line;
use crate::store::RecordStore;
use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

/// Counts of lines accepted into and rejected from the store.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct IngestStats {
    pub accepted: usize,
    pub rejected: usize,
}

impl std::ops::AddAssign for IngestStats {
    fn add_assign(&mut self, rhs: Self) {
        self.accepted += rhs.accepted;
        self.rejected += rhs.rejected;
    }
}

/// Loads measurement files (one `*.txt` per signal label) from a directory.
pub struct FileDataReader {
    dir: PathBuf,
}

impl FileDataReader {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Reads every `*.txt` file in the directory, in file name order.
    pub fn read_all(&self, store: &RecordStore) -> Result<IngestStats> {
        let mut files: Vec<PathBuf> = std::fs::read_dir(&self.dir)
            .with_context(|| format!("Failed to read data directory '{}'", self.dir.display()))?
            .filter_map(|entry| entry.ok().map(|e| e.path()))
            .filter(|p| p.is_file() && p.extension().is_some_and(|ext| ext == "txt"))
            .collect();
        files.sort();

        let mut stats = IngestStats::default();
        for path in &files {
            stats += self.read_file(path, store)?;
        }
        tracing::info!(
            dir = %self.dir.display(),
            files = files.len(),
            accepted = stats.accepted,
            rejected = stats.rejected,
            "Loaded measurement files"
        );
        Ok(stats)
    }

    /// Ingests every line of `path`. Malformed lines are logged and skipped.
    pub fn read_file(&self, path: &Path, store: &RecordStore) -> Result<IngestStats> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read data file '{}'", path.display()))?;

        let mut stats = IngestStats::default();
        for (lineno, line) in content.lines().enumerate() {
            if line.trim().is_empty() {
                continue;
            }
            match ingest_line(store, line) {
                Ok(_) => stats.accepted += 1,
                Err(e) => {
                    stats.rejected += 1;
                    tracing::warn!(
                        file = %path.display(),
                        line = lineno + 1,
                        error = %e,
                        "Rejected malformed measurement"
                    );
                }
            }
        }
        Ok(stats)
    }
}
