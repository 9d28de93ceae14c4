//! # Client Configuration
//!
//! Where the Jira instance lives and how long a request may take. A
//! [`ClientConfig`] is built once, either explicitly or from environment
//! variables, and is never mutated after it is handed to a client.

use std::time::Duration;

use anyhow::{Context, Result};
use url::Url;

use crate::consts::{
  DEFAULT_ACTIVITY_PATH, DEFAULT_API_PATH, ENV_JIRA_ACTIVITY_PATH, ENV_JIRA_API_PATH, ENV_JIRA_HOST,
  ENV_JIRA_TIMEOUT_SECS,
};

/// Location of a Jira instance and request limits
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
  /// Scheme and host, without a trailing slash
  pub base_url: String,
  /// REST API prefix, e.g. `/rest/api/2`
  pub api_path: String,
  /// Activity stream prefix, e.g. `/activity`
  pub activity_path: String,
  /// Upper bound for a single request, body included
  pub timeout: Option<Duration>,
}

impl ClientConfig {
  /// Configuration for `base_url` with the default path prefixes
  pub fn new(base_url: &str) -> Self {
    Self {
      base_url: base_url.trim_end_matches('/').to_string(),
      api_path: DEFAULT_API_PATH.to_string(),
      activity_path: DEFAULT_ACTIVITY_PATH.to_string(),
      timeout: None,
    }
  }

  pub fn with_api_path(mut self, api_path: &str) -> Self {
    self.api_path = normalize_path(api_path);
    self
  }

  pub fn with_activity_path(mut self, activity_path: &str) -> Self {
    self.activity_path = normalize_path(activity_path);
    self
  }

  pub fn with_timeout(mut self, timeout: Duration) -> Self {
    self.timeout = Some(timeout);
    self
  }

  /// Build a configuration from the process environment.
  ///
  /// See [`ClientConfig::from_lookup`] for the variables consulted.
  pub fn from_env() -> Result<Self> {
    Self::from_lookup(|key| std::env::var(key).ok())
  }

  /// Build a configuration from a variable lookup.
  ///
  /// `JIRA_HOST` is required and defaults to `https://` when it has no scheme.
  /// `JIRA_API_PATH`, `JIRA_ACTIVITY_PATH` and `JIRA_TIMEOUT_SECS` are
  /// optional.
  pub fn from_lookup<F>(lookup: F) -> Result<Self>
  where
    F: Fn(&str) -> Option<String>,
  {
    let host = lookup(ENV_JIRA_HOST)
      .filter(|h| !h.trim().is_empty())
      .with_context(|| format!("Jira host environment variable '{ENV_JIRA_HOST}' not set"))?;
    let mut config = Self::new(&ensure_url_scheme(&host)?);

    if let Some(api_path) = lookup(ENV_JIRA_API_PATH) {
      config = config.with_api_path(&api_path);
    }
    if let Some(activity_path) = lookup(ENV_JIRA_ACTIVITY_PATH) {
      config = config.with_activity_path(&activity_path);
    }
    if let Some(raw) = lookup(ENV_JIRA_TIMEOUT_SECS) {
      let secs = raw
        .trim()
        .parse::<u64>()
        .ok()
        .filter(|secs| *secs > 0)
        .with_context(|| format!("{ENV_JIRA_TIMEOUT_SECS} must be a positive number of seconds, got '{raw}'"))?;
      config = config.with_timeout(Duration::from_secs(secs));
    }

    Ok(config)
  }

  /// `{base}{api_path}{path}`
  pub fn api_url(&self, path: &str) -> String {
    format!("{}{}{}", self.base_url, self.api_path, path)
  }

  /// `{base}{activity_path}`
  pub fn activity_url(&self) -> String {
    format!("{}{}", self.base_url, self.activity_path)
  }

  /// Host name (and port) of the instance, used for credential lookup
  pub fn host(&self) -> Option<String> {
    let url = Url::parse(&self.base_url).ok()?;
    let host = url.host_str()?;
    Some(match url.port() {
      Some(port) => format!("{host}:{port}"),
      None => host.to_string(),
    })
  }
}

/// Leading slash, no trailing slash; an empty prefix stays empty.
fn normalize_path(path: &str) -> String {
  let trimmed = path.trim().trim_matches('/');
  if trimmed.is_empty() {
    String::new()
  } else {
    format!("/{trimmed}")
  }
}

/// Ensure a host has a scheme, assuming `https://` when it has none, and strip
/// any trailing slash.
pub fn ensure_url_scheme(input: &str) -> Result<String> {
  let trimmed = input.trim();
  if trimmed.is_empty() {
    return Err(anyhow::anyhow!("Host cannot be empty"));
  }

  let lowered = trimmed.to_ascii_lowercase();
  let candidate = if lowered.starts_with("http://") || lowered.starts_with("https://") {
    trimmed.to_string()
  } else {
    format!("https://{trimmed}")
  };

  let url = Url::parse(&candidate).with_context(|| format!("Failed to parse URL: '{input}'"))?;
  if url.host_str().is_none() {
    return Err(anyhow::anyhow!("URL '{input}' has no host"));
  }

  Ok(url.as_str().trim_end_matches('/').to_string())
}
