use std::collections::HashMap;

use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::consts::CREATED_DATE_FORMAT;
use crate::pagination::Pagination;

/// Represents Jira authentication credentials
#[derive(Clone)]
pub struct JiraAuth {
  pub username: String,
  pub api_token: String,
}

impl std::fmt::Debug for JiraAuth {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("JiraAuth")
      .field("username", &self.username)
      .field("api_token", &"<redacted>")
      .finish()
  }
}

/// Represents a Jira issue
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Issue {
  pub id: String,
  pub key: String,
  #[serde(rename = "self", default)]
  pub self_url: String,
  #[serde(default)]
  pub expand: String,
  pub fields: IssueFields,
  /// Parsed from `fields.created`; `None` when the field is absent or does
  /// not match [`CREATED_DATE_FORMAT`]
  #[serde(skip_deserializing, rename = "createdAt")]
  pub created_at: Option<DateTime<FixedOffset>>,
}

impl Issue {
  /// Fill [`Issue::created_at`] from the raw `created` field.
  ///
  /// A value that does not parse leaves the timestamp unset.
  pub(crate) fn resolve_created_at(&mut self) {
    let Some(created) = self.fields.created.as_deref() else {
      return;
    };
    match DateTime::parse_from_str(created, CREATED_DATE_FORMAT) {
      Ok(timestamp) => self.created_at = Some(timestamp),
      Err(e) => warn!("Issue {} has an unparsable created date '{}': {}", self.key, created, e),
    }
  }
}

/// Represents Jira issue fields
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IssueFields {
  #[serde(rename = "issuetype")]
  pub issue_type: Option<IssueType>,
  #[serde(default)]
  pub summary: String,
  pub description: Option<String>,
  pub reporter: Option<JiraUser>,
  pub assignee: Option<JiraUser>,
  pub project: Option<JiraProject>,
  pub created: Option<String>,
}

/// Represents a Jira issue type
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IssueType {
  #[serde(rename = "self", default)]
  pub self_url: String,
  #[serde(default)]
  pub id: String,
  #[serde(default)]
  pub description: String,
  #[serde(default)]
  pub icon_url: String,
  pub name: String,
  #[serde(default)]
  pub subtask: bool,
}

/// Represents a Jira project
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct JiraProject {
  #[serde(rename = "self", default)]
  pub self_url: String,
  #[serde(default)]
  pub id: String,
  pub key: String,
  #[serde(default)]
  pub name: String,
  #[serde(default)]
  pub avatar_urls: HashMap<String, String>,
}

/// Represents a Jira user
///
/// `name` is the login and is required; everything else may be hidden by the
/// instance's privacy settings.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct JiraUser {
  #[serde(rename = "self", default)]
  pub self_url: String,
  pub name: String,
  #[serde(default)]
  pub email_address: String,
  #[serde(default)]
  pub display_name: String,
  #[serde(default)]
  pub active: bool,
  #[serde(default)]
  pub time_zone: String,
  #[serde(default)]
  pub avatar_urls: HashMap<String, String>,
  #[serde(default)]
  pub expand: String,
}

/// Represents one page of an issue search
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IssueList {
  #[serde(default)]
  pub expand: String,
  pub start_at: u32,
  pub max_results: u32,
  pub total: u32,
  #[serde(default)]
  pub issues: Vec<Issue>,
  /// Only filled in by [`crate::JiraClient::search_issues_by_assignee`]
  #[serde(skip_deserializing)]
  pub pagination: Option<Pagination>,
}

/// Represents a comment creation payload
#[derive(Debug, Serialize)]
pub struct CommentRequest {
  pub body: String,
}
