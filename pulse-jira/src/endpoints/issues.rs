//! # Jira Issue Endpoints
//!
//! Jira API endpoint implementations for issue operations: fetching a single
//! issue, searching by assignee, and commenting.

use tracing::{debug, info, instrument, trace};

use crate::client::JiraClient;
use crate::decode::decode_json;
use crate::endpoints::{append_path_segment, encode_query_value, jql_string_literal, require_non_empty};
use crate::error::{JiraError, Result};
use crate::models::{CommentRequest, Issue, IssueList};
use crate::pagination::Pagination;

impl JiraClient {
  /// Get a Jira issue by id or key
  ///
  /// # Errors
  ///
  /// Returns an error if the request fails, the server answers with a
  /// non-success status, or the body is not an issue.
  #[instrument(skip(self), level = "debug")]
  pub async fn get_issue(&self, issue_id: &str) -> Result<Issue> {
    let issue_id = require_non_empty("issue id", issue_id)?;
    let url = self.issue_url(issue_id)?;

    let body = self.get(&url).await?;
    let mut issue: Issue = decode_json(&body)?;
    issue.resolve_created_at();
    trace!("Issue: {:?}", issue);

    Ok(issue)
  }

  /// Search the issues assigned to `username`.
  ///
  /// Each issue's `created_at` is parsed from its `created` field, and the
  /// returned list carries [`Pagination`] computed from the echoed window.
  ///
  /// # Errors
  ///
  /// Returns [`JiraError::InvalidArgument`] for an empty username or a zero
  /// `max_results`, otherwise any transport, status, or decode error.
  #[instrument(skip(self), level = "debug")]
  pub async fn search_issues_by_assignee(&self, username: &str, max_results: u32, start_at: u32) -> Result<IssueList> {
    let username = require_non_empty("username", username)?;
    if max_results == 0 {
      return Err(JiraError::invalid_argument("max_results must be greater than zero"));
    }
    info!("Searching issues assigned to {}", username);

    let url = self.config.api_url(&format!(
      "/search?jql=assignee={}&startAt={}&maxResults={}",
      encode_query_value(&jql_string_literal(username)),
      start_at,
      max_results
    ));

    let body = self.get(&url).await?;
    let mut list: IssueList = decode_json(&body)?;
    for issue in &mut list.issues {
      issue.resolve_created_at();
    }

    let pagination = Pagination::compute(list.total, list.start_at, list.max_results)?;
    debug!(
      "Found {} issues, page {} of {}",
      list.total,
      pagination.page + 1,
      pagination.page_count
    );
    list.pagination = Some(pagination);

    Ok(list)
  }

  /// Add a comment to an issue
  #[instrument(skip(self, comment), level = "debug")]
  pub async fn add_comment(&self, issue_key: &str, comment: &str) -> Result<()> {
    let issue_key = require_non_empty("issue key", issue_key)?;
    let url = format!("{}/comment", self.issue_url(issue_key)?);

    let payload = CommentRequest {
      body: comment.to_string(),
    };
    self.post_json(&url, &payload).await?;
    info!("Added comment to {}", issue_key);

    Ok(())
  }

  fn issue_url(&self, issue_id: &str) -> Result<String> {
    append_path_segment(&self.config.api_url("/issue"), issue_id)
  }
}
