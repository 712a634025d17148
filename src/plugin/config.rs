use crate::options::FirebaseOptionsBuilder;
use serde::Deserialize;
use std::fmt;
use std::sync::Arc;

/// Environment variable holding the admin key resource name.
pub const ADMIN_KEY_ENV: &str = "FIRETOR_ADMIN_KEY";
/// Environment variable holding the storage bucket.
pub const STORAGE_BUCKET_ENV: &str = "FIRETOR_STORAGE_BUCKET";

type OptionsTransform = dyn Fn(FirebaseOptionsBuilder) -> FirebaseOptionsBuilder + Send + Sync;

/// User supplied transformation applied to the options builder before it is finalized.
#[derive(Clone)]
pub struct BasicConfiguration(Arc<OptionsTransform>);

impl BasicConfiguration {
    pub fn new<F>(f: F) -> Self
    where
        F: Fn(FirebaseOptionsBuilder) -> FirebaseOptionsBuilder + Send + Sync + 'static,
    {
        Self(Arc::new(f))
    }

    pub fn apply(&self, builder: FirebaseOptionsBuilder) -> FirebaseOptionsBuilder {
        (self.0)(builder)
    }
}

impl Default for BasicConfiguration {
    fn default() -> Self {
        Self::new(|builder| builder)
    }
}

impl fmt::Debug for BasicConfiguration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("BasicConfiguration(..)")
    }
}

/// Plugin configuration.
///
/// Built by value:
///
/// ```rust
/// use firetor::Configuration;
///
/// let config = Configuration::new()
///     .admin_key("firebase-admin-key.json")
///     .storage_bucket("my-bucket")
///     .basic_configuration(|options| options.set_project_id("my-project"));
/// assert_eq!(config.admin_key_file_name.as_deref(), Some("firebase-admin-key.json"));
/// ```
///
/// The two string fields can also be deserialized (for example from a settings file); the options
/// transform cannot and defaults to the identity.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Configuration {
    /// Resource name of the service account document. Required at initialization time.
    #[serde(alias = "adminKeyFileName")]
    pub admin_key_file_name: Option<String>,
    /// Bucket name or `gs://` url. Validated before use.
    #[serde(alias = "storageBucket")]
    pub storage_bucket: Option<String>,
    #[serde(skip)]
    pub basic_configuration: BasicConfiguration,
}

impl Configuration {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reads `FIRETOR_ADMIN_KEY` and `FIRETOR_STORAGE_BUCKET`. Blank values count as unset.
    pub fn from_env() -> Self {
        let var = |name: &str| std::env::var(name).ok().filter(|v| !v.trim().is_empty());
        Self {
            admin_key_file_name: var(ADMIN_KEY_ENV),
            storage_bucket: var(STORAGE_BUCKET_ENV),
            basic_configuration: BasicConfiguration::default(),
        }
    }

    pub fn admin_key(mut self, file_name: impl Into<String>) -> Self {
        self.admin_key_file_name = Some(file_name.into());
        self
    }

    pub fn storage_bucket(mut self, bucket: impl Into<String>) -> Self {
        self.storage_bucket = Some(bucket.into());
        self
    }

    pub fn basic_configuration<F>(mut self, f: F) -> Self
    where
        F: Fn(FirebaseOptionsBuilder) -> FirebaseOptionsBuilder + Send + Sync + 'static,
    {
        self.basic_configuration = BasicConfiguration::new(f);
        self
    }
}
