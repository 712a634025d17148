//! Registry of initialized Firebase apps.
//!
//! Apps are registered under a name; the default app uses [`DEFAULT_APP_NAME`]. A process-wide
//! instance is available through [`AppRegistry::global`], but every API takes the registry as an
//! explicit value so tests (and multi-tenant hosts) can keep isolated registries.

use crate::core::{FiretorError, Result};
use crate::options::FirebaseOptions;
use crate::FirebaseApp;
use std::collections::HashMap;
use std::sync::{Arc, OnceLock, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

/// Name of the default app.
pub const DEFAULT_APP_NAME: &str = "[DEFAULT]";

static GLOBAL_REGISTRY: OnceLock<Arc<AppRegistry>> = OnceLock::new();

#[derive(Debug, Default)]
pub struct AppRegistry {
    apps: RwLock<HashMap<String, FirebaseApp>>,
}

impl AppRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// The process-wide registry.
    pub fn global() -> Arc<AppRegistry> {
        GLOBAL_REGISTRY
            .get_or_init(|| Arc::new(AppRegistry::new()))
            .clone()
    }

    // A panic while holding the lock cannot leave the map half-updated.
    fn read(&self) -> RwLockReadGuard<'_, HashMap<String, FirebaseApp>> {
        self.apps.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, HashMap<String, FirebaseApp>> {
        self.apps.write().unwrap_or_else(PoisonError::into_inner)
    }

    /// All registered apps, ordered by name.
    pub fn apps(&self) -> Vec<FirebaseApp> {
        let mut apps: Vec<FirebaseApp> = self.read().values().cloned().collect();
        apps.sort_by(|a, b| a.name().cmp(b.name()));
        apps
    }

    pub fn len(&self) -> usize {
        self.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.read().is_empty()
    }

    /// Registers the default app.
    pub fn initialize_app(&self, options: FirebaseOptions) -> Result<FirebaseApp> {
        self.initialize_app_with_name(options, DEFAULT_APP_NAME)
    }

    /// Registers an app under `name`. Fails if the name is taken.
    pub fn initialize_app_with_name(
        &self,
        options: FirebaseOptions,
        name: &str,
    ) -> Result<FirebaseApp> {
        let name = name.trim();
        if name.is_empty() {
            return Err(FiretorError::InvalidAppName);
        }

        let mut apps = self.write();
        if apps.contains_key(name) {
            return Err(FiretorError::DuplicateApp(name.to_string()));
        }

        let app = FirebaseApp::new(name.to_string(), options);
        apps.insert(name.to_string(), app.clone());
        tracing::info!(app = name, project_id = ?app.project_id(), "FirebaseApp initialized");
        Ok(app)
    }

    /// Registers the default app only if no app at all is registered yet.
    ///
    /// The emptiness check and the insertion happen under one write lock, so concurrent callers
    /// never initialize twice. Returns `None` when the registry was already populated.
    pub fn initialize_if_empty(&self, options: FirebaseOptions) -> Option<FirebaseApp> {
        let mut apps = self.write();
        if !apps.is_empty() {
            tracing::debug!(apps = apps.len(), "FirebaseApp already initialized, skipping");
            return None;
        }

        let app = FirebaseApp::new(DEFAULT_APP_NAME.to_string(), options);
        apps.insert(DEFAULT_APP_NAME.to_string(), app.clone());
        tracing::info!(app = DEFAULT_APP_NAME, project_id = ?app.project_id(), "FirebaseApp initialized");
        Some(app)
    }

    pub fn get_app(&self, name: &str) -> Result<FirebaseApp> {
        let name = name.trim();
        self.read()
            .get(name)
            .cloned()
            .ok_or_else(|| FiretorError::AppNotFound(name.to_string()))
    }

    pub fn default_app(&self) -> Result<FirebaseApp> {
        self.get_app(DEFAULT_APP_NAME)
    }

    /// Removes the app called `name` and returns it.
    pub fn delete_app(&self, name: &str) -> Result<FirebaseApp> {
        let name = name.trim();
        let removed = self
            .write()
            .remove(name)
            .ok_or_else(|| FiretorError::AppNotFound(name.to_string()))?;
        tracing::debug!(app = name, "FirebaseApp deleted");
        Ok(removed)
    }

    /// Removes every registered app.
    pub fn reset(&self) {
        self.write().clear();
    }
}

#[cfg(test)]
mod tests;
