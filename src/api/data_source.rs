use std::cell::RefCell;
use std::collections::HashMap;
use std::io::ErrorKind;
use std::path::{Component, Path, PathBuf};

use futures::future::{self, FutureExt, LocalBoxFuture};
use tracing::trace;

use crate::error::FetchError;

/// Text resource provider for manifest, CSV and geometry files.
///
/// Futures are `!Send` on purpose: fetches are driven from a single-threaded
/// host loop and suspend only at I/O boundaries.
pub trait DataSource {
    fn fetch_text<'a>(&'a self, path: &'a str) -> LocalBoxFuture<'a, Result<String, FetchError>>;
}

/// Serves resources from files below a root directory.
#[derive(Debug, Clone)]
pub struct DirectorySource {
    root: PathBuf,
}

impl DirectorySource {
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn read(&self, path: &str) -> Result<String, FetchError> {
        let relative = Path::new(path);
        if relative
            .components()
            .any(|component| !matches!(component, Component::Normal(_) | Component::CurDir))
        {
            return Err(FetchError::NotFound {
                path: path.to_owned(),
            });
        }

        let full_path = self.root.join(relative);
        trace!(path = %full_path.display(), "read resource");
        std::fs::read_to_string(&full_path).map_err(|source| match source.kind() {
            ErrorKind::NotFound => FetchError::NotFound {
                path: path.to_owned(),
            },
            _ => FetchError::Io {
                path: path.to_owned(),
                source,
            },
        })
    }
}

impl DataSource for DirectorySource {
    fn fetch_text<'a>(&'a self, path: &'a str) -> LocalBoxFuture<'a, Result<String, FetchError>> {
        future::ready(self.read(path)).boxed_local()
    }
}

/// In-memory resources, with optional simulated network failures.
#[derive(Debug, Default)]
pub struct MemorySource {
    entries: HashMap<String, String>,
    failures: HashMap<String, String>,
    fetch_counts: RefCell<HashMap<String, usize>>,
}

impl MemorySource {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_entry(mut self, path: impl Into<String>, content: impl Into<String>) -> Self {
        self.insert(path, content);
        self
    }

    /// Makes every fetch of `path` fail with a network error.
    #[must_use]
    pub fn with_failure(mut self, path: impl Into<String>, reason: impl Into<String>) -> Self {
        self.failures.insert(path.into(), reason.into());
        self
    }

    pub fn insert(&mut self, path: impl Into<String>, content: impl Into<String>) {
        self.entries.insert(path.into(), content.into());
    }

    /// Number of fetches issued for `path` so far.
    #[must_use]
    pub fn fetch_count(&self, path: &str) -> usize {
        self.fetch_counts.borrow().get(path).copied().unwrap_or(0)
    }

    fn lookup(&self, path: &str) -> Result<String, FetchError> {
        *self
            .fetch_counts
            .borrow_mut()
            .entry(path.to_owned())
            .or_insert(0) += 1;

        if let Some(reason) = self.failures.get(path) {
            return Err(FetchError::Network {
                path: path.to_owned(),
                reason: reason.clone(),
            });
        }
        self.entries
            .get(path)
            .cloned()
            .ok_or_else(|| FetchError::NotFound {
                path: path.to_owned(),
            })
    }
}

impl DataSource for MemorySource {
    fn fetch_text<'a>(&'a self, path: &'a str) -> LocalBoxFuture<'a, Result<String, FetchError>> {
        future::ready(self.lookup(path)).boxed_local()
    }
}
