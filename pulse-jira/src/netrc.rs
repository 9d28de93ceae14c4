//! Reading Jira credentials from `.netrc` files.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::models::JiraAuth;

/// Returns the path to the `.netrc` file for the provided home directory.
pub fn get_netrc_path(home: &Path) -> PathBuf {
  home.join(".netrc")
}

/// Parses a `.netrc` file and returns credentials for the requested machine.
///
/// Both the single-line (`machine host login user password pass`) and the
/// multi-line layouts are understood. `Ok(None)` is returned when the machine
/// is missing or its entry lacks a `login` or `password`.
///
/// # Errors
///
/// Returns an error if the file cannot be opened or read.
pub fn parse_netrc_file(path: &Path, target_machine: &str) -> Result<Option<JiraAuth>> {
  let file = File::open(path).with_context(|| format!("Failed to open {}", path.display()))?;
  let reader = BufReader::new(file);

  let mut current_machine: Option<String> = None;
  let mut username = String::new();
  let mut password = String::new();

  for line in reader.lines() {
    let line = line.context("Failed to read line from .netrc")?;
    let mut tokens = line.split_whitespace();

    while let Some(token) = tokens.next() {
      match token {
        "machine" | "default" => {
          if current_machine.as_deref() == Some(target_machine) && !username.is_empty() && !password.is_empty() {
            return Ok(Some(JiraAuth {
              username,
              api_token: password,
            }));
          }
          current_machine = if token == "machine" {
            tokens.next().map(str::to_string)
          } else {
            None
          };
          username.clear();
          password.clear();
        }
        "login" => username = tokens.next().unwrap_or_default().to_string(),
        "password" => password = tokens.next().unwrap_or_default().to_string(),
        _ => {}
      }
    }
  }

  if current_machine.as_deref() == Some(target_machine) && !username.is_empty() && !password.is_empty() {
    return Ok(Some(JiraAuth {
      username,
      api_token: password,
    }));
  }

  Ok(None)
}

/// Normalizes a Jira host by removing the scheme and trailing slashes.
///
/// ```
/// use pulse_jira::netrc::normalize_host;
///
/// assert_eq!(normalize_host("https://company.atlassian.net/"), "company.atlassian.net");
/// assert_eq!(normalize_host("jira.example.com"), "jira.example.com");
/// ```
pub fn normalize_host(raw_host: &str) -> String {
  raw_host
    .trim()
    .trim_start_matches("https://")
    .trim_start_matches("http://")
    .trim_end_matches('/')
    .to_string()
}

#[cfg(test)]
mod tests {
  use pulse_test_utils::NetrcGuard;

  use super::*;

  #[test]
  fn test_parse_multi_line_entries() {
    let guard = NetrcGuard::new(
      r#"machine jira.example.com
  login bob@example.com
  password bob-token

machine atlassian.net
  login net@example.com
  password net-token
"#,
    );

    let creds = parse_netrc_file(guard.netrc_path(), "jira.example.com").unwrap().unwrap();
    assert_eq!(creds.username, "bob@example.com");
    assert_eq!(creds.api_token, "bob-token");

    let creds = parse_netrc_file(guard.netrc_path(), "atlassian.net").unwrap().unwrap();
    assert_eq!(creds.username, "net@example.com");
  }

  #[test]
  fn test_parse_single_line_entries() {
    let guard = NetrcGuard::new(
      "machine a.example.com login a password pa\nmachine b.example.com login b password pb\n",
    );

    let creds = parse_netrc_file(guard.netrc_path(), "b.example.com").unwrap().unwrap();
    assert_eq!(creds.username, "b");
    assert_eq!(creds.api_token, "pb");
  }

  #[test]
  fn test_parse_incomplete_entry() {
    let guard = NetrcGuard::new("machine jira.example.com\n  login bob\nmachine other.com login x password y\n");

    assert!(parse_netrc_file(guard.netrc_path(), "jira.example.com").unwrap().is_none());
    assert!(parse_netrc_file(guard.netrc_path(), "missing.com").unwrap().is_none());
  }

  #[test]
  fn test_default_entry_does_not_leak_into_previous_machine() {
    let guard = NetrcGuard::new("machine jira.example.com login bob\ndefault login anon password anon\n");

    assert!(parse_netrc_file(guard.netrc_path(), "jira.example.com").unwrap().is_none());
  }

  #[test]
  fn test_parse_missing_file() {
    let guard = NetrcGuard::new("");
    let missing = guard.home_dir().join("does-not-exist");

    assert!(parse_netrc_file(&missing, "jira.example.com").is_err());
  }

  #[test]
  fn test_normalize_host() {
    assert_eq!(normalize_host("https://company.atlassian.net/"), "company.atlassian.net");
    assert_eq!(normalize_host("http://jira.example.com"), "jira.example.com");
    assert_eq!(normalize_host("localhost:8080"), "localhost:8080");
  }

  #[test]
  fn test_get_netrc_path() {
    assert_eq!(get_netrc_path(Path::new("/home/user")), Path::new("/home/user/.netrc"));
  }
}
