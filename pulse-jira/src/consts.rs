//! Constants for the pulse-jira client.

/// User-Agent header value for the Jira API client
pub const USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

/// Default REST API path prefix
pub const DEFAULT_API_PATH: &str = "/rest/api/2";

/// Default activity stream path prefix
pub const DEFAULT_ACTIVITY_PATH: &str = "/activity";

/// Layout of the `created` field on issues, e.g. `2023-05-01T10:00:00.000+0200`
pub const CREATED_DATE_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.3f%z";

/// Namespace of the Atom syndication format
pub const ATOM_NAMESPACE: &str = "http://www.w3.org/2005/Atom";

/// Environment variable storing the Jira host
pub const ENV_JIRA_HOST: &str = "JIRA_HOST";

/// Environment variable overriding the REST API path prefix
pub const ENV_JIRA_API_PATH: &str = "JIRA_API_PATH";

/// Environment variable overriding the activity stream path prefix
pub const ENV_JIRA_ACTIVITY_PATH: &str = "JIRA_ACTIVITY_PATH";

/// Environment variable holding a per-request timeout in seconds
pub const ENV_JIRA_TIMEOUT_SECS: &str = "JIRA_TIMEOUT_SECS";
