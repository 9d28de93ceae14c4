use pulse_test_utils::fixtures::{ACTIVITY_FEED, FIRST_AUTHOR_INNER, SECOND_AUTHOR_INNER};
use wiremock::matchers::{basic_auth, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use super::test_client;
use crate::error::{Format, JiraError};

fn atom_response(body: &str) -> ResponseTemplate {
  ResponseTemplate::new(200).set_body_raw(body.as_bytes().to_vec(), "application/atom+xml")
}

#[tokio::test]
async fn test_get_user_activity() -> anyhow::Result<()> {
  let mock_server = MockServer::start().await;
  let client = test_client(&mock_server);

  Mock::given(method("GET"))
    .and(path("/activity"))
    .and(query_param("streams", "user IS bob"))
    .and(basic_auth("test_user", "test_token"))
    .respond_with(atom_response(ACTIVITY_FEED))
    .expect(1)
    .mount(&mock_server)
    .await;

  let feed = client.get_user_activity("bob").await?;
  assert_eq!(feed.entries.len(), 2);
  assert_eq!(feed.entries[0].author.inner_xml, FIRST_AUTHOR_INNER);
  assert_eq!(feed.entries[1].author.inner_xml, SECOND_AUTHOR_INNER);

  let requests = mock_server.received_requests().await.unwrap_or_default();
  assert_eq!(requests[0].url.query(), Some("streams=user+IS+bob"));

  Ok(())
}

#[tokio::test]
async fn test_get_user_activity_custom_path() -> anyhow::Result<()> {
  let mock_server = MockServer::start().await;
  let config = crate::config::ClientConfig::new(&mock_server.uri()).with_activity_path("/jira/activity");
  let client = crate::JiraClient::new(config, crate::models::JiraAuth {
    username: "test_user".to_string(),
    api_token: "test_token".to_string(),
  });

  Mock::given(method("GET"))
    .and(path("/jira/activity"))
    .and(query_param("streams", "user IS jane doe"))
    .respond_with(atom_response(ACTIVITY_FEED))
    .expect(1)
    .mount(&mock_server)
    .await;

  let feed = client.get_user_activity("jane doe").await?;
  assert_eq!(feed.entries.len(), 2);

  Ok(())
}

#[tokio::test]
async fn test_get_activity_follows_next_link() -> anyhow::Result<()> {
  let mock_server = MockServer::start().await;
  let client = test_client(&mock_server);
  let older_page = ACTIVITY_FEED.replace(
    "https://jira.example.com/activity?streams=user+IS+bob&amp;maxResults=10&amp;before=1682928000000",
    "https://jira.example.com/activity?streams=user+IS+bob&amp;before=0",
  );

  Mock::given(method("GET"))
    .and(path("/activity"))
    .and(query_param("before", "1682928000000"))
    .respond_with(atom_response(&older_page))
    .expect(1)
    .mount(&mock_server)
    .await;

  let first = crate::atom::decode_atom(ACTIVITY_FEED.as_bytes())?;
  let next = first
    .next_link()
    .map(|link| link.replace("https://jira.example.com", &mock_server.uri()))
    .unwrap_or_default();

  let second = client.get_activity(&next).await?;
  assert_eq!(second.entries.len(), 2);
  assert_eq!(
    second.next_link(),
    Some("https://jira.example.com/activity?streams=user+IS+bob&before=0")
  );

  Ok(())
}

#[tokio::test]
async fn test_get_activity_malformed_feed() {
  let mock_server = MockServer::start().await;
  let client = test_client(&mock_server);

  Mock::given(method("GET"))
    .and(path("/activity"))
    .respond_with(atom_response("<feed xmlns=\"http://www.w3.org/2005/Atom\"><entry></feed>"))
    .mount(&mock_server)
    .await;

  let err = client.get_user_activity("bob").await.unwrap_err();
  assert!(matches!(
    err,
    JiraError::Decode {
      format: Format::AtomXml,
      ..
    }
  ));
}

#[tokio::test]
async fn test_get_activity_server_error() {
  let mock_server = MockServer::start().await;
  let client = test_client(&mock_server);

  Mock::given(method("GET"))
    .and(path("/activity"))
    .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
    .mount(&mock_server)
    .await;

  let err = client.get_user_activity("bob").await.unwrap_err();
  assert!(matches!(err, JiraError::HttpStatus { .. }));
  assert!(err.to_string().contains("boom"));
}
