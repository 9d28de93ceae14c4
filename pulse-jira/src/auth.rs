//! Authentication helpers for the Jira client.
//!
//! These helpers centralize credential lookup so that the CLI and any other
//! embedder build clients from the same `.netrc` conventions.

use std::path::Path;

use anyhow::{Context, Result};

use crate::JiraClient;
use crate::config::ClientConfig;
use crate::models::JiraAuth;
use crate::netrc::{get_netrc_path, normalize_host, parse_netrc_file};

/// Machine name tried when the instance host has no `.netrc` entry
pub const FALLBACK_MACHINE: &str = "atlassian.net";

/// Check if Jira credentials are available for the provided host.
pub fn check_jira_credentials(home: &Path, jira_host: &str) -> bool {
  get_jira_credentials(home, jira_host).is_ok()
}

/// Retrieve Jira credentials for `jira_host` from `~/.netrc`, falling back to
/// the `atlassian.net` entry.
pub fn get_jira_credentials(home: &Path, jira_host: &str) -> Result<JiraAuth> {
  let netrc_path = get_netrc_path(home);
  let normalized_host = normalize_host(jira_host);

  if netrc_path.exists() {
    if let Some(creds) = parse_netrc_file(&netrc_path, &normalized_host)? {
      return Ok(creds);
    }
    if let Some(creds) = parse_netrc_file(&netrc_path, FALLBACK_MACHINE)? {
      return Ok(creds);
    }
  }

  Err(anyhow::anyhow!(
    "Jira credentials not found in .netrc file. Please add credentials for machine '{normalized_host}' or '{FALLBACK_MACHINE}'."
  ))
}

/// Creates an authenticated Jira client using credentials from .netrc.
pub fn create_jira_client_from_netrc(home: &Path, config: ClientConfig) -> Result<JiraClient> {
  let host = config
    .host()
    .with_context(|| format!("Failed to determine host of '{}'", config.base_url))?;
  let auth = get_jira_credentials(home, &host).context("Failed to get credentials")?;

  Ok(JiraClient::new(config, auth))
}
