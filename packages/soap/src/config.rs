//! Service connection settings.

use std::fmt;
use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::{Result, SoapError};

pub const DEFAULT_ENDPOINT: &str = "https://api.livedocx.com/2.1/mailmerge.asmx";
pub const DEFAULT_NAMESPACE: &str = "http://api.livedocx.com/2.1/mailmerge/";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

pub const ENDPOINT_VAR: &str = "LIVEDOCX_ENDPOINT";
pub const USERNAME_VAR: &str = "LIVEDOCX_USERNAME";
pub const PASSWORD_VAR: &str = "LIVEDOCX_PASSWORD";
pub const TIMEOUT_VAR: &str = "LIVEDOCX_TIMEOUT_SECS";

/// Where the service lives and how to authenticate against it.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServiceConfig {
    pub endpoint: String,
    pub namespace: String,
    pub timeout_secs: u64,
    pub username: Option<String>,
    pub password: Option<String>,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            namespace: DEFAULT_NAMESPACE.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            username: None,
            password: None,
        }
    }
}

impl fmt::Debug for ServiceConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ServiceConfig")
            .field("endpoint", &self.endpoint)
            .field("namespace", &self.namespace)
            .field("timeout_secs", &self.timeout_secs)
            .field("username", &self.username)
            .field("password", &self.password.as_ref().map(|_| "***"))
            .finish()
    }
}

impl ServiceConfig {
    /// Defaults overlaid with the `LIVEDOCX_*` environment variables.
    pub fn from_env() -> Result<Self> {
        Self::default().overlay(|name| std::env::var(name).ok())
    }

    /// Load settings from a JSON file. Missing keys take their defaults.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|e| SoapError::InvalidConfig {
            message: format!("cannot read {}: {}", path.display(), e),
        })?;
        serde_json::from_str(&contents).map_err(|e| SoapError::InvalidConfig {
            message: format!("cannot parse {}: {}", path.display(), e),
        })
    }

    /// Apply every variable `lookup` knows about on top of `self`.
    pub fn overlay(mut self, lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        if let Some(endpoint) = lookup(ENDPOINT_VAR) {
            self.endpoint = endpoint;
        }
        if let Some(username) = lookup(USERNAME_VAR) {
            self.username = Some(username);
        }
        if let Some(password) = lookup(PASSWORD_VAR) {
            self.password = Some(password);
        }
        if let Some(timeout) = lookup(TIMEOUT_VAR) {
            self.timeout_secs = timeout.trim().parse().map_err(|_| SoapError::InvalidConfig {
                message: format!("{} must be a number of seconds, got '{}'", TIMEOUT_VAR, timeout),
            })?;
        }
        Ok(self)
    }

    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    pub fn with_credentials(
        mut self,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        self.username = Some(username.into());
        self.password = Some(password.into());
        self
    }

    pub fn endpoint_url(&self) -> Result<Url> {
        Ok(Url::parse(&self.endpoint)?)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Username and password, when both are configured.
    pub fn credentials(&self) -> Option<(&str, &str)> {
        match (&self.username, &self.password) {
            (Some(u), Some(p)) => Some((u.as_str(), p.as_str())),
            _ => None,
        }
    }
}
