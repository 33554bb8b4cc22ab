//! Extraction service configuration.
//!
//! Credentials come from one of three sources, tried in order:
//!
//! 1. credentials passed explicitly to the builder,
//! 2. a JSON credentials file under the base path,
//! 3. environment variables.
//!
//! Resolution happens once, in [`ServiceConfigBuilder::build`].

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::cache::ArchiveCache;
use crate::error::{Error, Result};

/// Default credentials file name, looked up under the base path.
pub const DEFAULT_CREDENTIALS_FILE: &str = "pdfservices-api-credentials.json";

/// Default environment variable holding the client id.
pub const ENV_CLIENT_ID: &str = "PDF_SERVICES_CLIENT_ID";

/// Default environment variable holding the client secret.
pub const ENV_CLIENT_SECRET: &str = "PDF_SERVICES_CLIENT_SECRET";

/// Service principal credentials.
#[derive(Clone, PartialEq, Eq, Deserialize)]
pub struct Credentials {
    /// Client id
    pub client_id: String,
    /// Client secret
    pub client_secret: String,
}

impl Credentials {
    /// Create credentials.
    pub fn new(client_id: impl Into<String>, client_secret: impl Into<String>) -> Self {
        Self {
            client_id: client_id.into(),
            client_secret: client_secret.into(),
        }
    }

    /// The secret with all but the last four characters hidden.
    pub fn masked_secret(&self) -> String {
        let count = self.client_secret.chars().count();
        let visible: String = self
            .client_secret
            .chars()
            .skip(count.saturating_sub(4))
            .collect();
        format!("{}{}", "*".repeat(count.saturating_sub(4)), visible)
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("client_id", &self.client_id)
            .field("client_secret", &"<redacted>")
            .finish()
    }
}

#[derive(Deserialize)]
struct CredentialsFile {
    client_credentials: Credentials,
}

/// Where resolved credentials came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CredentialSource {
    /// Passed to the builder
    Explicit,
    /// Read from a credentials file
    File(PathBuf),
    /// Read from environment variables
    Environment,
}

impl fmt::Display for CredentialSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CredentialSource::Explicit => f.write_str("explicit"),
            CredentialSource::File(path) => write!(f, "file {}", path.display()),
            CredentialSource::Environment => f.write_str("environment"),
        }
    }
}

/// Resolved service configuration.
#[derive(Debug, Clone)]
pub struct ServiceConfig {
    /// Base directory; archives are cached below it
    pub base_path: PathBuf,
    /// Credentials for the extraction service
    pub credentials: Credentials,
    /// Source the credentials were taken from
    pub source: CredentialSource,
}

impl ServiceConfig {
    /// Start building a configuration.
    pub fn builder() -> ServiceConfigBuilder {
        ServiceConfigBuilder::default()
    }

    /// Archive cache under the base path.
    pub fn cache(&self) -> ArchiveCache {
        ArchiveCache::new(&self.base_path)
    }
}

/// Builder for [`ServiceConfig`].
#[derive(Debug, Clone)]
pub struct ServiceConfigBuilder {
    base_path: Option<PathBuf>,
    credentials: Option<Credentials>,
    credentials_file: PathBuf,
    env_client_id: String,
    env_client_secret: String,
}

impl Default for ServiceConfigBuilder {
    fn default() -> Self {
        Self {
            base_path: None,
            credentials: None,
            credentials_file: PathBuf::from(DEFAULT_CREDENTIALS_FILE),
            env_client_id: ENV_CLIENT_ID.to_string(),
            env_client_secret: ENV_CLIENT_SECRET.to_string(),
        }
    }
}

impl ServiceConfigBuilder {
    /// Set the base directory (default: current directory).
    pub fn with_base_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.base_path = Some(path.into());
        self
    }

    /// Use these credentials, skipping the file and environment.
    pub fn with_credentials(mut self, credentials: Credentials) -> Self {
        self.credentials = Some(credentials);
        self
    }

    /// Set the credentials file name, relative to the base path unless absolute.
    pub fn with_credentials_file(mut self, file: impl Into<PathBuf>) -> Self {
        self.credentials_file = file.into();
        self
    }

    /// Set the environment variable names for client id and secret.
    pub fn with_env_vars(mut self, client_id: impl Into<String>, client_secret: impl Into<String>) -> Self {
        self.env_client_id = client_id.into();
        self.env_client_secret = client_secret.into();
        self
    }

    /// Resolve using the process environment.
    pub fn build(self) -> Result<ServiceConfig> {
        self.build_with_env(|key| std::env::var(key).ok())
    }

    /// Resolve using a custom environment lookup.
    pub fn build_with_env<F>(self, env: F) -> Result<ServiceConfig>
    where
        F: Fn(&str) -> Option<String>,
    {
        let base_path = match self.base_path {
            Some(path) => path,
            None => std::env::current_dir()?,
        };

        if let Some(credentials) = self.credentials {
            return Ok(ServiceConfig {
                base_path,
                credentials,
                source: CredentialSource::Explicit,
            });
        }

        let file = base_path.join(&self.credentials_file);
        if file.is_file() {
            let credentials = read_credentials_file(&file)?;
            log::debug!("Using credentials from {}", file.display());
            return Ok(ServiceConfig {
                base_path,
                credentials,
                source: CredentialSource::File(file),
            });
        }

        match (env(&self.env_client_id), env(&self.env_client_secret)) {
            (Some(client_id), Some(client_secret)) => Ok(ServiceConfig {
                base_path,
                credentials: Credentials::new(client_id, client_secret),
                source: CredentialSource::Environment,
            }),
            _ => Err(Error::Config(format!(
                "no credentials: pass them explicitly, create {}, or set {} and {}",
                file.display(),
                self.env_client_id,
                self.env_client_secret
            ))),
        }
    }
}

fn read_credentials_file(path: &Path) -> Result<Credentials> {
    let data = fs::read(path)
        .map_err(|e| Error::Config(format!("cannot read {}: {}", path.display(), e)))?;
    let parsed: CredentialsFile = serde_json::from_slice(&data)
        .map_err(|e| Error::Config(format!("invalid {}: {}", path.display(), e)))?;
    Ok(parsed.client_credentials)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env_with(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    fn write_credentials(dir: &Path, id: &str, secret: &str) {
        let json = format!(
            r#"{{"client_credentials": {{"client_id": "{}", "client_secret": "{}"}}, "service_principal_credentials": {{}}}}"#,
            id, secret
        );
        fs::write(dir.join(DEFAULT_CREDENTIALS_FILE), json).unwrap();
    }

    #[test]
    fn test_explicit_wins() {
        let base = tempfile::tempdir().unwrap();
        write_credentials(base.path(), "file-id", "file-secret");

        let config = ServiceConfig::builder()
            .with_base_path(base.path())
            .with_credentials(Credentials::new("id", "secret"))
            .build_with_env(env_with(&[(ENV_CLIENT_ID, "e"), (ENV_CLIENT_SECRET, "s")]))
            .unwrap();

        assert_eq!(config.source, CredentialSource::Explicit);
        assert_eq!(config.credentials.client_id, "id");
    }

    #[test]
    fn test_file_before_environment() {
        let base = tempfile::tempdir().unwrap();
        write_credentials(base.path(), "file-id", "file-secret");

        let config = ServiceConfig::builder()
            .with_base_path(base.path())
            .build_with_env(env_with(&[(ENV_CLIENT_ID, "e"), (ENV_CLIENT_SECRET, "s")]))
            .unwrap();

        assert!(matches!(config.source, CredentialSource::File(_)));
        assert_eq!(config.credentials.client_id, "file-id");
        assert_eq!(config.credentials.client_secret, "file-secret");
    }

    #[test]
    fn test_environment_fallback() {
        let base = tempfile::tempdir().unwrap();

        let config = ServiceConfig::builder()
            .with_base_path(base.path())
            .build_with_env(env_with(&[(ENV_CLIENT_ID, "e"), (ENV_CLIENT_SECRET, "s")]))
            .unwrap();

        assert_eq!(config.source, CredentialSource::Environment);
        assert_eq!(config.credentials, Credentials::new("e", "s"));
        assert_eq!(config.cache().dir(), base.path().join("output"));
    }

    #[test]
    fn test_custom_env_names() {
        let base = tempfile::tempdir().unwrap();

        let config = ServiceConfig::builder()
            .with_base_path(base.path())
            .with_env_vars("MY_ID", "MY_SECRET")
            .build_with_env(env_with(&[("MY_ID", "a"), ("MY_SECRET", "b")]))
            .unwrap();

        assert_eq!(config.credentials, Credentials::new("a", "b"));
    }

    #[test]
    fn test_nothing_resolves() {
        let base = tempfile::tempdir().unwrap();

        let err = ServiceConfig::builder()
            .with_base_path(base.path())
            .build_with_env(env_with(&[(ENV_CLIENT_ID, "only-id")]))
            .unwrap_err();

        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn test_malformed_file() {
        let base = tempfile::tempdir().unwrap();
        fs::write(base.path().join(DEFAULT_CREDENTIALS_FILE), "{}").unwrap();

        let err = ServiceConfig::builder()
            .with_base_path(base.path())
            .build_with_env(env_with(&[]))
            .unwrap_err();

        assert!(matches!(err, Error::Config(ref m) if m.contains("invalid")));
    }

    #[test]
    fn test_secret_is_masked() {
        let credentials = Credentials::new("id", "p8e-abcd1234");
        assert_eq!(credentials.masked_secret(), "********1234");
        assert!(!format!("{:?}", credentials).contains("abcd"));
        assert_eq!(Credentials::new("id", "abc").masked_secret(), "abc");
    }
}
