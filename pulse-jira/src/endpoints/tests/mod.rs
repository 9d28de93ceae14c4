use wiremock::MockServer;

use crate::client::{JiraClient, create_jira_client};

mod activity_test;

fn test_client(mock_server: &MockServer) -> JiraClient {
  create_jira_client(&mock_server.uri(), "test_user", "test_token")
}
