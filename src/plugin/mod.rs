//! The Firetor pipeline plugin.
//!
//! [`Firetor::install`] turns a configuration closure into a plugin instance and attaches it to a
//! [`Pipeline`]. Construction has no side effects. The first call that passes through the
//! pipeline runs [`Firetor::intercept`], which:
//!
//! 1. resolves `admin_key_file_name` (fails with [`FiretorError::MissingCredential`]),
//! 2. opens it through the [`ResourceLoader`] (fails with [`FiretorError::ResourceNotFound`]),
//! 3. parses the service account credentials,
//! 4. validates and attaches the storage bucket (fails with [`FiretorError::InvalidBucketUrl`]),
//! 5. applies the user's options transform,
//! 6. initializes the default app if and only if the registry is empty.
//!
//! The instance remembers the app it obtained, but only trusts it while the registry still holds
//! that app as its default; otherwise the next call runs the sequence again. Failures are never
//! remembered.

mod client;
mod config;
mod layer;

pub use config::{BasicConfiguration, Configuration, ADMIN_KEY_ENV, STORAGE_BUCKET_ENV};
pub use layer::{FiretorLayer, FiretorService};

use crate::core::{FiretorError, Result};
use crate::credentials::GoogleCredentials;
use crate::options::FirebaseOptions;
use crate::registry::AppRegistry;
use crate::resources::{DirectoryResources, ResourceLoader};
use crate::storage::StorageBucket;
use crate::FirebaseApp;
use std::fmt;
use std::sync::{Arc, PoisonError, RwLock};
use tokio::sync::Mutex;

/// A request pipeline that can run a plugin ahead of every call.
pub trait Pipeline: Sized {
    /// Registers `firetor` in the pipeline's plugin phase.
    fn intercept_plugins(self, firetor: Firetor) -> Self;
}

#[cfg(feature = "axum")]
impl<S> Pipeline for axum::Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    fn intercept_plugins(self, firetor: Firetor) -> Self {
        self.layer(FiretorLayer::new(firetor))
    }
}

impl Pipeline for reqwest_middleware::ClientBuilder {
    fn intercept_plugins(self, firetor: Firetor) -> Self {
        self.with(firetor)
    }
}

/// Plugin instance: a configuration snapshot plus a single-flight initialization guard.
#[derive(Clone)]
pub struct Firetor {
    config: Arc<Configuration>,
    registry: Arc<AppRegistry>,
    resources: Arc<dyn ResourceLoader>,
    app: Arc<RwLock<Option<FirebaseApp>>>,
    init_lock: Arc<Mutex<()>>,
}

impl Firetor {
    /// Identity key of the plugin.
    pub const KEY: &'static str = "FiretorPluginKey";

    /// Creates an instance using the global registry and [`DirectoryResources::from_env`].
    pub fn new(config: Configuration) -> Self {
        Self {
            config: Arc::new(config),
            registry: AppRegistry::global(),
            resources: Arc::new(DirectoryResources::from_env()),
            app: Arc::new(RwLock::new(None)),
            init_lock: Arc::new(Mutex::new(())),
        }
    }

    /// Applies `configure` to a default [`Configuration`], builds the plugin and attaches it to
    /// `pipeline`. Returns the pipeline and the instance.
    pub fn install<P, F>(pipeline: P, configure: F) -> (P, Firetor)
    where
        P: Pipeline,
        F: FnOnce(Configuration) -> Configuration,
    {
        let firetor = Firetor::new(configure(Configuration::default()));
        (firetor.attach(pipeline), firetor)
    }

    /// Attaches this instance to `pipeline`.
    pub fn attach<P: Pipeline>(&self, pipeline: P) -> P {
        pipeline.intercept_plugins(self.clone())
    }

    pub fn with_registry(mut self, registry: Arc<AppRegistry>) -> Self {
        self.registry = registry;
        self
    }

    pub fn with_resources<R>(mut self, resources: R) -> Self
    where
        R: ResourceLoader + 'static,
    {
        self.resources = Arc::new(resources);
        self
    }

    pub fn layer(&self) -> FiretorLayer {
        FiretorLayer::new(self.clone())
    }

    pub fn configuration(&self) -> &Configuration {
        &self.config
    }

    pub fn registry(&self) -> &Arc<AppRegistry> {
        &self.registry
    }

    pub fn is_initialized(&self) -> bool {
        self.current().is_some()
    }

    /// The default app obtained by the last successful interception, if the registry still
    /// holds it.
    pub fn app(&self) -> Option<FirebaseApp> {
        self.current()
    }

    fn current(&self) -> Option<FirebaseApp> {
        let cached = self
            .app
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()?;
        let default = self.registry.default_app().ok()?;
        default.ptr_eq(&cached).then_some(cached)
    }

    /// Runs the initialization side effect unless the registry already holds the app this
    /// instance obtained.
    ///
    /// Concurrent callers wait for a single attempt. Returns the default app, or `None` when the
    /// registry held apps but no default one.
    pub async fn intercept(&self) -> Result<Option<FirebaseApp>> {
        if let Some(app) = self.current() {
            return Ok(Some(app));
        }

        let _guard = self.init_lock.lock().await;
        if let Some(app) = self.current() {
            return Ok(Some(app));
        }

        // Resource reads and JSON parsing block.
        let this = self.clone();
        let app = tokio::task::spawn_blocking(move || this.initialize()).await??;

        *self.app.write().unwrap_or_else(PoisonError::into_inner) = app.clone();
        Ok(app)
    }

    fn initialize(&self) -> Result<Option<FirebaseApp>> {
        tracing::debug!(plugin = Self::KEY, "Initializing Firebase");

        let key_name = self
            .config
            .admin_key_file_name
            .as_deref()
            .ok_or(FiretorError::MissingCredential)?;
        let service_account = self.resources.open(key_name)?;

        let mut builder =
            FirebaseOptions::builder().set_credentials(GoogleCredentials::from_stream(service_account)?);

        if let Some(bucket) = self.config.storage_bucket.as_deref() {
            builder = builder.set_storage_bucket(StorageBucket::parse(bucket)?.into_name());
        }

        let builder = self.config.basic_configuration.apply(builder);

        if !self.registry.is_empty() {
            tracing::debug!(plugin = Self::KEY, "FirebaseApp already initialized, skipping");
            return Ok(self.registry.default_app().ok());
        }

        let options = builder.build()?;
        Ok(match self.registry.initialize_if_empty(options) {
            Some(app) => Some(app),
            None => self.registry.default_app().ok(),
        })
    }
}

impl fmt::Debug for Firetor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Firetor")
            .field("config", &self.config)
            .field("initialized", &self.is_initialized())
            .finish_non_exhaustive()
    }
}
