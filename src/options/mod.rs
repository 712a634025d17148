//! Options used to initialize a [`FirebaseApp`](crate::FirebaseApp).
//!
//! # Examples
//!
//! ```rust,no_run
//! # use firetor::credentials::GoogleCredentials;
//! # use firetor::options::FirebaseOptions;
//! # fn run(credentials: GoogleCredentials) -> firetor::Result<()> {
//! let options = FirebaseOptions::builder()
//!     .set_credentials(credentials)
//!     .set_storage_bucket("my-project.appspot.com")
//!     .set_database_url("https://my-project.firebaseio.com")
//!     .build()?;
//! # Ok(())
//! # }
//! ```

use crate::core::{FiretorError, Result};
use crate::credentials::GoogleCredentials;
use std::time::Duration;

/// Immutable, validated Firebase app options.
#[derive(Debug, Clone)]
pub struct FirebaseOptions {
    credentials: GoogleCredentials,
    storage_bucket: Option<String>,
    project_id: Option<String>,
    database_url: Option<String>,
    service_account_id: Option<String>,
    connect_timeout: Option<Duration>,
    read_timeout: Option<Duration>,
}

impl FirebaseOptions {
    pub fn builder() -> FirebaseOptionsBuilder {
        FirebaseOptionsBuilder::default()
    }

    pub fn credentials(&self) -> &GoogleCredentials {
        &self.credentials
    }

    pub fn storage_bucket(&self) -> Option<&str> {
        self.storage_bucket.as_deref()
    }

    /// The explicitly configured project id, or the one carried by the credentials.
    pub fn project_id(&self) -> Option<&str> {
        self.project_id
            .as_deref()
            .or_else(|| self.credentials.project_id())
    }

    pub fn database_url(&self) -> Option<&str> {
        self.database_url.as_deref()
    }

    /// The service account used for signing, defaulting to the credential's client email.
    pub fn service_account_id(&self) -> &str {
        self.service_account_id
            .as_deref()
            .unwrap_or_else(|| self.credentials.client_email())
    }

    pub fn connect_timeout(&self) -> Option<Duration> {
        self.connect_timeout
    }

    pub fn read_timeout(&self) -> Option<Duration> {
        self.read_timeout
    }
}

/// Builder for [`FirebaseOptions`].
///
/// Setters consume and return the builder so that they chain and so that a user supplied
/// `Fn(FirebaseOptionsBuilder) -> FirebaseOptionsBuilder` can extend a partially built value.
#[derive(Debug, Clone, Default)]
pub struct FirebaseOptionsBuilder {
    credentials: Option<GoogleCredentials>,
    storage_bucket: Option<String>,
    project_id: Option<String>,
    database_url: Option<String>,
    service_account_id: Option<String>,
    connect_timeout: Option<Duration>,
    read_timeout: Option<Duration>,
}

impl FirebaseOptionsBuilder {
    pub fn set_credentials(mut self, credentials: GoogleCredentials) -> Self {
        self.credentials = Some(credentials);
        self
    }

    /// Sets the bare bucket name (without the `gs://` prefix).
    pub fn set_storage_bucket(mut self, bucket: impl Into<String>) -> Self {
        self.storage_bucket = Some(bucket.into());
        self
    }

    pub fn set_project_id(mut self, project_id: impl Into<String>) -> Self {
        self.project_id = Some(project_id.into());
        self
    }

    pub fn set_database_url(mut self, database_url: impl Into<String>) -> Self {
        self.database_url = Some(database_url.into());
        self
    }

    pub fn set_service_account_id(mut self, service_account_id: impl Into<String>) -> Self {
        self.service_account_id = Some(service_account_id.into());
        self
    }

    pub fn set_connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = Some(timeout);
        self
    }

    pub fn set_read_timeout(mut self, timeout: Duration) -> Self {
        self.read_timeout = Some(timeout);
        self
    }

    pub fn storage_bucket(&self) -> Option<&str> {
        self.storage_bucket.as_deref()
    }

    pub fn has_credentials(&self) -> bool {
        self.credentials.is_some()
    }

    pub fn build(self) -> Result<FirebaseOptions> {
        let credentials = self
            .credentials
            .ok_or(FiretorError::MissingOptionsCredentials)?;

        if let Some(bucket) = &self.storage_bucket {
            if bucket.trim().is_empty() {
                return Err(FiretorError::InvalidBucketUrl(
                    "storage bucket must not be empty".to_string(),
                ));
            }
            if bucket.starts_with("gs://") {
                return Err(FiretorError::InvalidBucketUrl(format!(
                    "'{}': storage bucket must not include the 'gs://' prefix",
                    bucket
                )));
            }
        }

        Ok(FirebaseOptions {
            credentials,
            storage_bucket: self.storage_bucket,
            project_id: self.project_id,
            database_url: self.database_url,
            service_account_id: self.service_account_id,
            connect_timeout: self.connect_timeout,
            read_timeout: self.read_timeout,
        })
    }
}
