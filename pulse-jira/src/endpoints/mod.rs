//! # Jira API Endpoints
//!
//! Organized endpoint implementations for the Jira resources the client
//! covers: issues and comments, users, and the activity stream.

use url::{Url, form_urlencoded};

use crate::error::{JiraError, Result};

pub mod activity;
pub mod issues;
pub mod users;

#[cfg(test)]
mod tests;

/// Percent-encode a value for use inside a query string
pub(crate) fn encode_query_value(value: &str) -> String {
  form_urlencoded::byte_serialize(value.as_bytes()).collect()
}

/// Quote a value as a JQL string literal
pub(crate) fn jql_string_literal(value: &str) -> String {
  let mut literal = String::with_capacity(value.len() + 2);
  literal.push('"');
  for ch in value.chars() {
    if matches!(ch, '"' | '\\') {
      literal.push('\\');
    }
    literal.push(ch);
  }
  literal.push('"');
  literal
}

/// Append `segment` to the path of `base`, percent-encoding it so that `/`,
/// `?` and `#` stay part of the segment
pub(crate) fn append_path_segment(base: &str, segment: &str) -> Result<String> {
  let mut url =
    Url::parse(base).map_err(|e| JiraError::invalid_argument(format!("invalid request URL '{base}': {e}")))?;
  url
    .path_segments_mut()
    .map_err(|()| JiraError::invalid_argument(format!("'{base}' cannot take a path segment")))?
    .push(segment);
  Ok(url.into())
}

/// Reject blank identifiers before they turn into a malformed URL. The value
/// itself is passed through unchanged.
pub(crate) fn require_non_empty<'a>(name: &str, value: &'a str) -> Result<&'a str> {
  if value.trim().is_empty() {
    return Err(JiraError::invalid_argument(format!("{name} must not be empty")));
  }
  Ok(value)
}

#[cfg(test)]
mod helper_tests {
  use super::*;

  #[test]
  fn test_jql_string_literal() {
    assert_eq!(jql_string_literal("bob"), r#""bob""#);
    assert_eq!(jql_string_literal(r#"bob" OR reporter="alice"#), r#""bob\" OR reporter=\"alice""#);
    assert_eq!(jql_string_literal(r"dom\user"), r#""dom\\user""#);
  }

  #[test]
  fn test_append_path_segment() {
    let url = append_path_segment("https://jira.example.com/rest/api/2/issue", "PROJ-1?expand=x#y/z").unwrap();
    assert_eq!(url, "https://jira.example.com/rest/api/2/issue/PROJ-1%3Fexpand=x%23y%2Fz");

    let url = append_path_segment("https://jira.example.com/rest/api/2/issue", "PROJ-1").unwrap();
    assert_eq!(url, "https://jira.example.com/rest/api/2/issue/PROJ-1");

    assert!(append_path_segment("not a url", "PROJ-1").is_err());
  }

  #[test]
  fn test_require_non_empty_keeps_value() {
    assert_eq!(require_non_empty("username", " bob ").unwrap(), " bob ");
    assert!(require_non_empty("username", " \t").is_err());
  }
}
