//! Named application resources.
//!
//! A [`ResourceLoader`] resolves a resource name (for example `"firebase-admin-key.json"`) to a
//! byte stream. [`DirectoryResources`] serves files below a root directory and
//! [`EmbeddedResources`] serves bytes compiled into the binary with `include_bytes!`.
//!
//! # Examples
//!
//! ```rust
//! use firetor::resources::{EmbeddedResources, ResourceLoader};
//!
//! let resources = EmbeddedResources::new().with("key.json", br#"{}"#.to_vec());
//! assert!(resources.open("key.json").is_ok());
//! assert!(resources.open("missing.json").is_err());
//! ```

use crate::core::{FiretorError, Result};
use std::collections::HashMap;
use std::io::{Cursor, ErrorKind, Read};
use std::path::{Component, Path, PathBuf};
use std::sync::Arc;

/// Environment variable naming the root directory of [`DirectoryResources::from_env`].
pub const RESOURCE_DIR_ENV: &str = "FIRETOR_RESOURCE_DIR";

/// Resolves resource names to readable streams.
pub trait ResourceLoader: Send + Sync {
    /// Opens the resource called `name`.
    ///
    /// Fails with [`FiretorError::ResourceNotFound`] when no such resource exists.
    fn open(&self, name: &str) -> Result<Box<dyn Read + Send>>;
}

impl<T: ResourceLoader + ?Sized> ResourceLoader for Arc<T> {
    fn open(&self, name: &str) -> Result<Box<dyn Read + Send>> {
        (**self).open(name)
    }
}

// Leading slashes are ignored and parent components never escape the root.
fn normalize(name: &str) -> Option<PathBuf> {
    let trimmed = name.trim_start_matches('/');
    let mut path = PathBuf::new();
    for component in Path::new(trimmed).components() {
        match component {
            Component::Normal(part) => path.push(part),
            Component::CurDir => {}
            _ => return None,
        }
    }
    if path.as_os_str().is_empty() {
        return None;
    }
    Some(path)
}

/// Serves resources from files below a root directory.
#[derive(Debug, Clone)]
pub struct DirectoryResources {
    root: PathBuf,
}

impl DirectoryResources {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Uses `$FIRETOR_RESOURCE_DIR` as root, or the current directory when unset.
    pub fn from_env() -> Self {
        let root = std::env::var_os(RESOURCE_DIR_ENV)
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("."));
        Self::new(root)
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl Default for DirectoryResources {
    fn default() -> Self {
        Self::from_env()
    }
}

impl ResourceLoader for DirectoryResources {
    fn open(&self, name: &str) -> Result<Box<dyn Read + Send>> {
        let relative =
            normalize(name).ok_or_else(|| FiretorError::ResourceNotFound(name.to_string()))?;
        let path = self.root.join(relative);

        tracing::debug!(resource = name, path = %path.display(), "Opening resource");

        match std::fs::File::open(&path) {
            Ok(file) if path.is_file() => Ok(Box::new(file)),
            Ok(_) => Err(FiretorError::ResourceNotFound(name.to_string())),
            Err(e) if e.kind() == ErrorKind::NotFound => {
                Err(FiretorError::ResourceNotFound(name.to_string()))
            }
            Err(e) => Err(FiretorError::Io(e)),
        }
    }
}

/// Serves resources held in memory.
#[derive(Debug, Clone, Default)]
pub struct EmbeddedResources {
    entries: HashMap<PathBuf, Arc<[u8]>>,
}

impl EmbeddedResources {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds (or replaces) the resource called `name`.
    pub fn with(mut self, name: &str, bytes: impl Into<Vec<u8>>) -> Self {
        self.insert(name, bytes);
        self
    }

    pub fn insert(&mut self, name: &str, bytes: impl Into<Vec<u8>>) {
        if let Some(path) = normalize(name) {
            self.entries.insert(path, Arc::from(bytes.into()));
        }
    }

    pub fn contains(&self, name: &str) -> bool {
        normalize(name).is_some_and(|path| self.entries.contains_key(&path))
    }
}

impl ResourceLoader for EmbeddedResources {
    fn open(&self, name: &str) -> Result<Box<dyn Read + Send>> {
        let bytes = normalize(name)
            .and_then(|path| self.entries.get(&path).cloned())
            .ok_or_else(|| FiretorError::ResourceNotFound(name.to_string()))?;

        tracing::debug!(resource = name, len = bytes.len(), "Opening embedded resource");

        Ok(Box::new(Cursor::new(bytes)))
    }
}

#[cfg(test)]
mod tests;
