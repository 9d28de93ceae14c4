//! # Authenticated Transport
//!
//! The single path every endpoint request goes through: attach credentials,
//! send, drain the body, and classify the status.

use reqwest::{RequestBuilder, header};
use serde::Serialize;
use tracing::{debug, trace, warn};

use crate::client::JiraClient;
use crate::consts::USER_AGENT;
use crate::error::{JiraError, Result};

impl JiraClient {
  /// Send an authenticated GET and return the response body
  pub(crate) async fn get(&self, url: &str) -> Result<Vec<u8>> {
    self.execute("GET", url, self.client.get(url)).await
  }

  /// Send an authenticated POST with a JSON body and return the response body
  pub(crate) async fn post_json<B>(&self, url: &str, payload: &B) -> Result<Vec<u8>>
  where
    B: Serialize + ?Sized,
  {
    self.execute("POST", url, self.client.post(url).json(payload)).await
  }

  async fn execute(&self, method: &str, url: &str, request: RequestBuilder) -> Result<Vec<u8>> {
    trace!("Jira API request: {} {}", method, url);

    let mut request = request
      .basic_auth(&self.auth.username, Some(&self.auth.api_token))
      .header(header::USER_AGENT, USER_AGENT);
    if let Some(timeout) = self.config.timeout {
      request = request.timeout(timeout);
    }

    let response = request
      .send()
      .await
      .map_err(|e| JiraError::transport(format!("{method} {url} failed"), e))?;

    let status = response.status();
    debug!("Jira API response status: {}", status);

    // Drain the body before classifying the status.
    let body = response
      .bytes()
      .await
      .map_err(|e| JiraError::transport(format!("Failed to read response body of {method} {url}"), e))?
      .to_vec();

    if !status.is_success() {
      warn!("Jira API error: HTTP {} for {} {}", status, method, url);
      return Err(JiraError::HttpStatus {
        status,
        url: url.to_string(),
        body: String::from_utf8_lossy(&body).into_owned(),
      });
    }

    Ok(body)
  }
}
