//! Service account credentials.
//!
//! Credentials are parsed from a JSON service-account document. The OAuth2 authenticator that
//! exchanges them for access tokens is built lazily, on the first token request, and then shared
//! by every clone of the credentials.

use crate::core::{FiretorError, Result};
use hyper_rustls::HttpsConnector;
use hyper_util::client::legacy::connect::HttpConnector;
use std::fmt;
use std::io::Read;
use std::sync::Arc;
use tokio::sync::OnceCell;
use yup_oauth2::authenticator::Authenticator;
use yup_oauth2::{ServiceAccountAuthenticator, ServiceAccountKey};

type AuthType = Authenticator<HttpsConnector<HttpConnector>>;

const SERVICE_ACCOUNT_TYPE: &str = "service_account";

/// OAuth2 scopes requested for Firebase Admin access.
pub const FIREBASE_SCOPES: &[&str] = &[
    "https://www.googleapis.com/auth/cloud-platform",
    "https://www.googleapis.com/auth/firebase",
];

/// Google service account credentials.
#[derive(Clone)]
pub struct GoogleCredentials {
    inner: Arc<CredentialsInner>,
}

struct CredentialsInner {
    key: ServiceAccountKey,
    authenticator: OnceCell<AuthType>,
}

impl GoogleCredentials {
    /// Wraps an already parsed service account key.
    pub fn new(key: ServiceAccountKey) -> Self {
        Self {
            inner: Arc::new(CredentialsInner {
                key,
                authenticator: OnceCell::new(),
            }),
        }
    }

    /// Reads a service account document from `reader`.
    pub fn from_stream<R: Read>(reader: R) -> Result<Self> {
        let key: ServiceAccountKey = serde_json::from_reader(reader)?;
        Self::validated(key)
    }

    /// Parses a service account document held in memory.
    pub fn from_json(json: &str) -> Result<Self> {
        let key: ServiceAccountKey = serde_json::from_str(json)?;
        Self::validated(key)
    }

    fn validated(key: ServiceAccountKey) -> Result<Self> {
        if let Some(key_type) = key.key_type.as_deref() {
            if key_type != SERVICE_ACCOUNT_TYPE {
                return Err(FiretorError::InvalidCredentials(format!(
                    "unsupported credential type '{}', expected '{}'",
                    key_type, SERVICE_ACCOUNT_TYPE
                )));
            }
        }
        if key.private_key.trim().is_empty() {
            return Err(FiretorError::InvalidCredentials("private_key is empty".to_string()));
        }
        if key.client_email.trim().is_empty() {
            return Err(FiretorError::InvalidCredentials("client_email is empty".to_string()));
        }
        Ok(Self::new(key))
    }

    pub fn service_account_key(&self) -> &ServiceAccountKey {
        &self.inner.key
    }

    pub fn project_id(&self) -> Option<&str> {
        self.inner.key.project_id.as_deref()
    }

    pub fn client_email(&self) -> &str {
        &self.inner.key.client_email
    }

    /// Returns a bearer token for [`FIREBASE_SCOPES`].
    ///
    /// The authenticator caches tokens and refreshes them once they expire.
    pub async fn access_token(&self) -> Result<String> {
        let auth = self
            .inner
            .authenticator
            .get_or_try_init(|| async {
                ServiceAccountAuthenticator::builder(self.inner.key.clone())
                    .build()
                    .await
            })
            .await
            .map_err(FiretorError::Authenticator)?;

        let token = auth.token(FIREBASE_SCOPES).await?;

        token
            .token()
            .map(str::to_string)
            .ok_or(FiretorError::EmptyToken)
    }
}

impl fmt::Debug for GoogleCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GoogleCredentials")
            .field("client_email", &self.inner.key.client_email)
            .field("project_id", &self.inner.key.project_id)
            .finish_non_exhaustive()
    }
}
