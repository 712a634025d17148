//! # firetor
//!
//! Lazy, idempotent Firebase Admin initialization for request pipelines.
//!
//! [`Firetor`] is installed into a pipeline (an `axum::Router` or a `reqwest_middleware`
//! client) with a [`Configuration`]. Nothing happens at install time: the first request that
//! passes through the pipeline loads the service account resource, assembles
//! [`FirebaseOptions`](options::FirebaseOptions) and initializes the default [`FirebaseApp`]
//! exactly once, even when many requests arrive at the same time.
//!
//! ```rust,no_run
//! use axum::{routing::get, Extension, Router};
//! use firetor::{Firetor, FirebaseApp};
//!
//! async fn whoami(Extension(app): Extension<FirebaseApp>) -> String {
//!     app.project_id().unwrap_or_default().to_string()
//! }
//!
//! let router = Router::new().route("/", get(whoami));
//! let (router, _firetor) = Firetor::install(router, |config| {
//!     config
//!         .admin_key("firebase-admin-key.json")
//!         .storage_bucket("my-project.appspot.com")
//!         .basic_configuration(|options| options.set_database_url("https://my-project.firebaseio.com"))
//! });
//! # let _: Router = router;
//! ```

pub mod core;
pub mod credentials;
pub mod options;
pub mod plugin;
pub mod registry;
pub mod resources;
pub mod storage;

#[cfg(test)]
pub(crate) mod testing;

pub use crate::core::{FiretorError, Result};
pub use plugin::{Configuration, Firetor, FiretorLayer, Pipeline};

use crate::core::middleware::AuthMiddleware;
use credentials::GoogleCredentials;
use options::FirebaseOptions;
use reqwest::Client;
use reqwest_middleware::{ClientBuilder, ClientWithMiddleware};
use reqwest_retry::{policies::ExponentialBackoff, RetryTransientMiddleware};
use std::fmt;
use std::sync::Arc;

/// An initialized Firebase app.
///
/// Cheap to clone; clones refer to the same app.
#[derive(Clone)]
pub struct FirebaseApp {
    inner: Arc<AppInner>,
}

struct AppInner {
    name: String,
    options: FirebaseOptions,
}

impl FirebaseApp {
    pub(crate) fn new(name: String, options: FirebaseOptions) -> Self {
        Self {
            inner: Arc::new(AppInner { name, options }),
        }
    }

    pub fn name(&self) -> &str {
        &self.inner.name
    }

    pub fn is_default_app(&self) -> bool {
        self.inner.name == registry::DEFAULT_APP_NAME
    }

    pub fn options(&self) -> &FirebaseOptions {
        &self.inner.options
    }

    pub fn credentials(&self) -> &GoogleCredentials {
        self.inner.options.credentials()
    }

    pub fn project_id(&self) -> Option<&str> {
        self.inner.options.project_id()
    }

    pub fn storage_bucket(&self) -> Option<&str> {
        self.inner.options.storage_bucket()
    }

    /// Returns `true` if both handles refer to the same app.
    pub fn ptr_eq(&self, other: &FirebaseApp) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }

    pub fn auth_middleware(&self) -> AuthMiddleware {
        AuthMiddleware::new(self.credentials().clone())
    }

    /// An HTTP client that retries transient failures and authenticates as the app's
    /// service account.
    pub fn client(&self) -> Result<ClientWithMiddleware> {
        let retry_policy = ExponentialBackoff::builder().build_with_max_retries(3);

        let mut builder = Client::builder();
        if let Some(timeout) = self.inner.options.connect_timeout() {
            builder = builder.connect_timeout(timeout);
        }
        if let Some(timeout) = self.inner.options.read_timeout() {
            builder = builder.read_timeout(timeout);
        }

        Ok(ClientBuilder::new(builder.build()?)
            .with(RetryTransientMiddleware::new_with_policy(retry_policy))
            .with(self.auth_middleware())
            .build())
    }
}

impl fmt::Debug for FirebaseApp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FirebaseApp")
            .field("name", &self.inner.name)
            .field("project_id", &self.project_id())
            .field("storage_bucket", &self.storage_bucket())
            .finish()
    }
}
