use std::time::Duration;

use reqwest::Client;
use tracing::instrument;

use crate::config::ClientConfig;
use crate::error::{JiraError, Result};
use crate::models::JiraAuth;

/// Represents a Jira API client
///
/// All state is fixed at construction, so a client can be shared between
/// tasks by reference or behind an `Arc`.
#[derive(Debug, Clone)]
pub struct JiraClient {
  pub(crate) client: Client,
  pub(crate) config: ClientConfig,
  pub(crate) auth: JiraAuth,
}

impl JiraClient {
  /// Create a new Jira client
  pub fn new(config: ClientConfig, auth: JiraAuth) -> Self {
    Self::with_http_client(config, auth, Client::new())
  }

  /// Create a client around an existing HTTP client, e.g. one with a custom
  /// proxy or TLS setup
  pub const fn with_http_client(config: ClientConfig, auth: JiraAuth, client: Client) -> Self {
    Self { client, config, auth }
  }

  /// Bound every request made by this client to `timeout`
  pub fn with_timeout(mut self, timeout: Duration) -> Self {
    self.config.timeout = Some(timeout);
    self
  }

  /// The configuration this client was built with
  pub const fn config(&self) -> &ClientConfig {
    &self.config
  }

  /// The login requests are authenticated as
  pub fn username(&self) -> &str {
    &self.auth.username
  }

  /// Test the Jira connection by fetching the current user
  #[instrument(skip(self), level = "debug")]
  pub async fn test_connection(&self) -> Result<bool> {
    let url = self.config.api_url("/myself");

    match self.get(&url).await {
      Ok(_) => Ok(true),
      Err(JiraError::HttpStatus { .. }) => Ok(false),
      Err(e) => Err(e),
    }
  }
}

/// Create a Jira client from credentials
pub fn create_jira_client(base_url: &str, username: &str, api_token: &str) -> JiraClient {
  let auth = JiraAuth {
    username: username.to_string(),
    api_token: api_token.to_string(),
  };

  JiraClient::new(ClientConfig::new(base_url), auth)
}
