use tracing::instrument;

use crate::client::JiraClient;
use crate::decode::decode_json;
use crate::endpoints::{encode_query_value, require_non_empty};
use crate::error::{JiraError, Result};
use crate::models::JiraUser;

/// Largest page the user search accepts; larger values are truncated by Jira
pub const MAX_USER_SEARCH_RESULTS: u32 = 1000;

/// Parameters for [`JiraClient::search_users`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserSearchParams {
  /// Matched against username, display name and e-mail address
  pub username: String,
  pub start_at: u32,
  pub max_results: u32,
  pub include_active: bool,
  pub include_inactive: bool,
}

impl UserSearchParams {
  /// Active users matching `username`, first page of 50
  pub fn new(username: &str) -> Self {
    Self {
      username: username.to_string(),
      start_at: 0,
      max_results: 50,
      include_active: true,
      include_inactive: false,
    }
  }

  fn query(&self) -> String {
    format!(
      "username={}&startAt={}&maxResults={}&includeActive={}&includeInactive={}",
      encode_query_value(&self.username),
      self.start_at,
      self.max_results,
      self.include_active,
      self.include_inactive
    )
  }
}

impl JiraClient {
  /// Get a user by username
  #[instrument(skip(self), level = "debug")]
  pub async fn get_user(&self, username: &str) -> Result<JiraUser> {
    let username = require_non_empty("username", username)?;
    let url = self
      .config
      .api_url(&format!("/user?username={}", encode_query_value(username)));

    let body = self.get(&url).await?;
    decode_json(&body)
  }

  /// Search users whose username, name or e-mail matches `params.username`
  #[instrument(skip(self), level = "debug")]
  pub async fn search_users(&self, params: &UserSearchParams) -> Result<Vec<JiraUser>> {
    require_non_empty("username", &params.username)?;
    if params.max_results == 0 || params.max_results > MAX_USER_SEARCH_RESULTS {
      return Err(JiraError::invalid_argument(format!(
        "max_results must be between 1 and {MAX_USER_SEARCH_RESULTS}"
      )));
    }
    let url = self.config.api_url(&format!("/user/search?{}", params.query()));

    let body = self.get(&url).await?;
    decode_json(&body)
  }
}
