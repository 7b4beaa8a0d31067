//! Text fragments read from the source root: the page template, the
//! index header and footer, and family description supplements.

use std::collections::HashMap;
use std::collections::hash_map::Entry;
use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::TemplateDocError;

/// Reads fragments relative to a root directory, each at most once per run.
#[derive(Debug)]
pub struct FragmentCache {
    root: PathBuf,
    cache: HashMap<PathBuf, String>,
}

impl FragmentCache {
    /// Creates an empty cache resolving names against `root`.
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            cache: HashMap::new(),
        }
    }

    /// Returns the fragment's text, reading it on first use.
    ///
    /// # Errors
    ///
    /// Returns `TemplateDocError::Io` if the fragment cannot be read.
    pub fn get(&mut self, name: impl AsRef<Path>) -> Result<&str, TemplateDocError> {
        match self.cache.entry(self.root.join(name)) {
            Entry::Occupied(entry) => Ok(entry.into_mut().as_str()),
            Entry::Vacant(entry) => {
                let path = entry.key();
                debug!(fragment = %path.display(), "loading fragment");
                let text = fs::read_to_string(path).map_err(|e| TemplateDocError::io(path, e))?;
                Ok(entry.insert(text).as_str())
            }
        }
    }

    /// Number of fragments loaded so far.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cache.len()
    }

    /// Returns `true` if nothing has been loaded yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cache.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn reads_once_and_caches() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("amq-ssl.adoc.in"), "SSL notes").unwrap();

        let mut cache = FragmentCache::new(dir.path());
        assert_eq!(cache.get("amq-ssl.adoc.in").unwrap(), "SSL notes");

        // Later edits on disk are not picked up within the run.
        fs::write(dir.path().join("amq-ssl.adoc.in"), "changed").unwrap();
        assert_eq!(cache.get("amq-ssl.adoc.in").unwrap(), "SSL notes");
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn missing_fragment_is_io_error() {
        let dir = TempDir::new().unwrap();
        let mut cache = FragmentCache::new(dir.path());
        let err = cache.get("template.adoc.in").unwrap_err();
        assert!(matches!(err, TemplateDocError::Io { .. }));
        assert!(err.to_string().contains("template.adoc.in"));
        assert!(cache.is_empty());
    }
}
