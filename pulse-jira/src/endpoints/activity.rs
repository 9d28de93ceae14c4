use tracing::{debug, instrument};

use crate::atom::{ActivityFeed, decode_atom};
use crate::client::JiraClient;
use crate::endpoints::{encode_query_value, require_non_empty};
use crate::error::Result;

impl JiraClient {
  /// Get the activity stream of a single user
  #[instrument(skip(self), level = "debug")]
  pub async fn get_user_activity(&self, username: &str) -> Result<ActivityFeed> {
    let username = require_non_empty("username", username)?;
    let url = format!(
      "{}?streams={}",
      self.config.activity_url(),
      encode_query_value(&format!("user IS {username}"))
    );

    self.get_activity(&url).await
  }

  /// Get an activity feed from a full URL, such as the `next` link of a
  /// previously fetched feed
  #[instrument(skip(self), level = "debug")]
  pub async fn get_activity(&self, url: &str) -> Result<ActivityFeed> {
    let url = require_non_empty("activity feed url", url)?;

    let body = self.get(url).await?;
    let feed = decode_atom(&body)?;
    debug!("Activity feed '{}' has {} entries", feed.title, feed.entries.len());

    Ok(feed)
  }
}
