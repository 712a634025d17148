pub mod middleware;

use thiserror::Error;

/// Errors raised while loading credentials, assembling options or initializing apps.
#[derive(Error, Debug)]
pub enum FiretorError {
    /// No admin key resource name was configured.
    #[error("Admin key file name must not be null, set the admin key file with `Configuration::admin_key()`")]
    MissingCredential,
    /// The named resource does not exist in the resource loader.
    #[error("Resource not found: {0}")]
    ResourceNotFound(String),
    /// The storage bucket identifier is malformed.
    #[error("Invalid storage bucket url: {0}")]
    InvalidBucketUrl(String),
    /// The credential document could not be parsed.
    #[error("Invalid service account credentials: {0}")]
    InvalidCredentials(String),
    /// `FirebaseOptionsBuilder::build` was called without credentials.
    #[error("FirebaseOptions must be initialized with set_credentials()")]
    MissingOptionsCredentials,
    /// An app with the same name is already registered.
    #[error("FirebaseApp name {0} already exists")]
    DuplicateApp(String),
    /// App names must not be blank.
    #[error("FirebaseApp name must not be empty")]
    InvalidAppName,
    /// No app with the given name is registered.
    #[error("FirebaseApp with name {0} doesn't exist")]
    AppNotFound(String),
    /// The OAuth2 authenticator could not be built.
    #[error("Failed to build authenticator: {0}")]
    Authenticator(#[source] std::io::Error),
    /// The token endpoint rejected the request.
    #[error("Failed to fetch access token: {0}")]
    Token(#[from] yup_oauth2::Error),
    /// The token response carried no access token.
    #[error("No access token in token response")]
    EmptyToken,
    /// Wrapper for `reqwest::Error`.
    #[error("HTTP client error: {0}")]
    Http(#[from] reqwest::Error),
    /// The blocking initialization task panicked or was cancelled.
    #[error("Initialization task failed: {0}")]
    Join(#[from] tokio::task::JoinError),
    /// Wrapper for `std::io::Error`.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<serde_json::Error> for FiretorError {
    fn from(err: serde_json::Error) -> Self {
        FiretorError::InvalidCredentials(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, FiretorError>;
