//! Loading the index from disk and memoizing it for the process lifetime.

use std::path::{Path, PathBuf};
use std::sync::{Arc, OnceLock};

use crate::index::{build_index, ProcessedIndex};
use crate::source::load_rows;

/// Loads and indexes the table at `path`.
///
/// An unavailable or unreadable source yields an empty index so callers can
/// render "no stores" pages instead of failing.
#[must_use]
pub fn load_index(path: &Path) -> ProcessedIndex {
    match load_rows(path) {
        Ok(rows) => {
            tracing::info!(path = %path.display(), rows = rows.len(), "loaded store table");
            build_index(&rows)
        }
        Err(e) => {
            tracing::warn!(error = %e, "store table unavailable; serving empty index");
            ProcessedIndex::empty()
        }
    }
}

/// Lazily built, never invalidated index for one source path.
///
/// Concurrent first calls block on a single build; every later call returns
/// the same `Arc`.
#[derive(Debug)]
pub struct IndexCache {
    path: PathBuf,
    cell: OnceLock<Arc<ProcessedIndex>>,
}

impl IndexCache {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            cell: OnceLock::new(),
        }
    }

    /// Returns the index, building it on first access.
    #[must_use]
    pub fn get(&self) -> Arc<ProcessedIndex> {
        Arc::clone(self.cell.get_or_init(|| Arc::new(load_index(&self.path))))
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    #[must_use]
    pub fn is_built(&self) -> bool {
        self.cell.get().is_some()
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn load_index_missing_source_is_empty() {
        let index = load_index(Path::new("/nonexistent/stores-data.json"));
        assert!(index.is_empty());
        assert!(index.states().is_empty());
    }

    #[test]
    fn load_index_malformed_source_is_empty() {
        let mut file = tempfile::Builder::new()
            .suffix(".json")
            .tempfile()
            .expect("temp file");
        file.write_all(b"not json").expect("write");
        assert!(load_index(file.path()).is_empty());
    }

    #[test]
    fn cache_builds_once_and_shares_result() {
        let mut file = tempfile::Builder::new()
            .suffix(".json")
            .tempfile()
            .expect("temp file");
        file.write_all(br#"[{"Business Name": "A", "City": "Austin", "State": "Texas"}]"#)
            .expect("write");

        let cache = IndexCache::new(file.path());
        assert!(!cache.is_built());
        let first = cache.get();
        assert!(cache.is_built());

        // Changes on disk are not observed after the first build.
        std::fs::write(file.path(), "[]").expect("overwrite");
        let second = cache.get();
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(second.store_count(), 1);
    }
}
