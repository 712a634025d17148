use crate::core::{FiretorError, Result};
use std::fmt;
use std::net::Ipv4Addr;
use std::str::FromStr;
use url::Url;

const GS_SCHEME: &str = "gs";
const MAX_NAME_LEN: usize = 222;
const MAX_COMPONENT_LEN: usize = 63;
const MIN_NAME_LEN: usize = 3;

/// A validated Google Cloud Storage bucket name.
///
/// Accepts either a bare bucket name (`my-project.appspot.com`) or a `gs://` url pointing at a
/// bucket (`gs://my-project.appspot.com`). The scheme is stripped; [`StorageBucket::name`] always
/// returns the bare name.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct StorageBucket {
    name: String,
}

fn invalid(value: &str, reason: impl fmt::Display) -> FiretorError {
    FiretorError::InvalidBucketUrl(format!("'{}': {}", value, reason))
}

impl StorageBucket {
    /// Validates `value` and returns the bucket it names.
    pub fn parse(value: &str) -> Result<Self> {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(invalid(value, "bucket must not be empty"));
        }

        let name = if trimmed.contains("://") {
            Self::name_from_url(value, trimmed)?
        } else {
            trimmed.to_string()
        };

        validate_name(value, &name)?;
        Ok(Self { name })
    }

    fn name_from_url(value: &str, trimmed: &str) -> Result<String> {
        let url = Url::parse(trimmed).map_err(|e| invalid(value, e))?;

        if url.scheme() != GS_SCHEME {
            return Err(invalid(
                value,
                format!("unsupported scheme '{}', expected '{}'", url.scheme(), GS_SCHEME),
            ));
        }
        if !url.username().is_empty() || url.password().is_some() || url.port().is_some() {
            return Err(invalid(value, "bucket url must not carry credentials or a port"));
        }
        if !matches!(url.path(), "" | "/") || url.query().is_some() || url.fragment().is_some() {
            return Err(invalid(value, "bucket url must not contain an object path"));
        }

        match url.host_str() {
            Some(host) if !host.is_empty() => Ok(host.to_string()),
            _ => Err(invalid(value, "bucket url is missing the bucket name")),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// The bucket as a `gs://` url.
    pub fn url(&self) -> String {
        format!("{}://{}", GS_SCHEME, self.name)
    }

    pub fn into_name(self) -> String {
        self.name
    }
}

fn validate_name(value: &str, name: &str) -> Result<()> {
    if name.len() < MIN_NAME_LEN || name.len() > MAX_NAME_LEN {
        return Err(invalid(
            value,
            format!("bucket name must be {} to {} characters", MIN_NAME_LEN, MAX_NAME_LEN),
        ));
    }

    if let Some(c) = name
        .chars()
        .find(|c| !(c.is_ascii_lowercase() || c.is_ascii_digit() || matches!(c, '-' | '_' | '.')))
    {
        return Err(invalid(value, format!("invalid character '{}' in bucket name", c)));
    }

    let starts_ok = name.chars().next().is_some_and(|c| c.is_ascii_alphanumeric());
    let ends_ok = name.chars().last().is_some_and(|c| c.is_ascii_alphanumeric());
    if !starts_ok || !ends_ok {
        return Err(invalid(value, "bucket name must start and end with a letter or digit"));
    }

    if name
        .split('.')
        .any(|part| part.is_empty() || part.len() > MAX_COMPONENT_LEN)
    {
        return Err(invalid(
            value,
            format!("each dot-separated part must be 1 to {} characters", MAX_COMPONENT_LEN),
        ));
    }

    if name.parse::<Ipv4Addr>().is_ok() {
        return Err(invalid(value, "bucket name must not be an IP address"));
    }

    if name.starts_with("goog") || name.contains("google") {
        return Err(invalid(value, "bucket name must not contain 'google' or start with 'goog'"));
    }

    Ok(())
}

impl FromStr for StorageBucket {
    type Err = FiretorError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl fmt::Display for StorageBucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

impl AsRef<str> for StorageBucket {
    fn as_ref(&self) -> &str {
        &self.name
    }
}
