// src/config/models.rs
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::time::Duration;

pub const DEFAULT_HOSTNAME: &str = "kupiy-proday-jwpo.vercel.app";
pub const DEFAULT_PATH: &str = "/goodbye";
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0";
pub const DEFAULT_BODY_PREFIX_CHARS: usize = 500;
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Target hostname must not be empty")]
    EmptyHostname,

    #[error("Target path must start with '/': {0}")]
    RelativePath(String),

    #[error("At least one marker string is required")]
    NoMarkers,

    #[error("Marker strings must not be empty")]
    EmptyMarker,

    #[error("body_prefix_chars must be greater than zero")]
    ZeroPrefix,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VerifierConfig {
    #[serde(default)]
    pub target: CheckTarget,

    #[serde(default = "default_markers")]
    pub markers: Vec<String>,

    #[serde(default = "default_body_prefix_chars")]
    pub body_prefix_chars: usize,

    /// 0 disables the timeout and waits on the remote for as long as it takes.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for VerifierConfig {
    fn default() -> Self {
        Self {
            target: CheckTarget::default(),
            markers: default_markers(),
            body_prefix_chars: DEFAULT_BODY_PREFIX_CHARS,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

impl VerifierConfig {
    pub fn timeout(&self) -> Option<Duration> {
        match self.timeout_secs {
            0 => None,
            secs => Some(Duration::from_secs(secs)),
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.target.validate()?;

        if self.markers.is_empty() {
            return Err(ConfigError::NoMarkers);
        }
        if self.markers.iter().any(|m| m.is_empty()) {
            return Err(ConfigError::EmptyMarker);
        }
        if self.body_prefix_chars == 0 {
            return Err(ConfigError::ZeroPrefix);
        }

        Ok(())
    }
}

/// The page being probed. Fixed at startup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckTarget {
    #[serde(default = "default_scheme")]
    pub scheme: String,

    /// May carry an explicit port, e.g. `127.0.0.1:8080`.
    pub hostname: String,

    #[serde(default = "default_path")]
    pub path: String,

    #[serde(default = "default_headers")]
    pub headers: BTreeMap<String, String>,
}

impl Default for CheckTarget {
    fn default() -> Self {
        Self {
            scheme: default_scheme(),
            hostname: DEFAULT_HOSTNAME.to_string(),
            path: default_path(),
            headers: default_headers(),
        }
    }
}

impl CheckTarget {
    pub fn new(hostname: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            hostname: hostname.into(),
            path: path.into(),
            ..Self::default()
        }
    }

    pub fn with_scheme(mut self, scheme: impl Into<String>) -> Self {
        self.scheme = scheme.into();
        self
    }

    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }

    pub fn url_string(&self) -> String {
        format!("{}://{}{}", self.scheme, self.hostname, self.path)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.hostname.trim().is_empty() {
            return Err(ConfigError::EmptyHostname);
        }
        if !self.path.starts_with('/') {
            return Err(ConfigError::RelativePath(self.path.clone()));
        }
        Ok(())
    }
}

fn default_scheme() -> String {
    "https".to_string()
}

fn default_path() -> String {
    DEFAULT_PATH.to_string()
}

fn default_headers() -> BTreeMap<String, String> {
    let mut headers = BTreeMap::new();
    headers.insert("User-Agent".to_string(), DEFAULT_USER_AGENT.to_string());
    headers
}

fn default_markers() -> Vec<String> {
    vec!["GoodbyePage".to_string(), "Нам очень жаль".to_string()]
}

fn default_body_prefix_chars() -> usize {
    DEFAULT_BODY_PREFIX_CHARS
}

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}
