//! # Jira Client Errors
//!
//! Every failure of the request pipeline is one of four kinds: the request
//! never completed, the server answered with a non-success status, the body
//! could not be decoded, or the caller passed an unusable argument.

use std::fmt;

use reqwest::StatusCode;
use thiserror::Error;

/// Longest payload excerpt kept on a [`JiraError::Decode`]
const PAYLOAD_EXCERPT_LEN: usize = 512;

/// Result alias used throughout the client
pub type Result<T> = std::result::Result<T, JiraError>;

/// Wire format a response body was decoded from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
  /// REST resources (issues, users)
  Json,
  /// The activity stream
  AtomXml,
}

impl fmt::Display for Format {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Format::Json => f.write_str("JSON"),
      Format::AtomXml => f.write_str("Atom XML"),
    }
  }
}

/// Errors returned by [`crate::JiraClient`]
#[derive(Debug, Error)]
pub enum JiraError {
  #[error("{context}")]
  Transport {
    context: String,
    #[source]
    source: reqwest::Error,
  },

  #[error("{}", describe_status(.status, .url, .body))]
  HttpStatus { status: StatusCode, url: String, body: String },

  #[error("Failed to decode {format} response: {message}")]
  Decode {
    format: Format,
    message: String,
    /// Leading part of the offending body
    payload: String,
  },

  #[error("Invalid argument: {0}")]
  InvalidArgument(String),
}

impl JiraError {
  pub(crate) fn transport(context: impl Into<String>, source: reqwest::Error) -> Self {
    Self::Transport {
      context: context.into(),
      source,
    }
  }

  pub(crate) fn decode(format: Format, message: impl fmt::Display, payload: &[u8]) -> Self {
    let text = String::from_utf8_lossy(payload);
    let payload = match text.char_indices().nth(PAYLOAD_EXCERPT_LEN) {
      Some((idx, _)) => format!("{}...", &text[..idx]),
      None => text.into_owned(),
    };
    Self::Decode {
      format,
      message: message.to_string(),
      payload,
    }
  }

  pub(crate) fn invalid_argument(message: impl Into<String>) -> Self {
    Self::InvalidArgument(message.into())
  }

  /// The HTTP status, when the server answered with a non-success code
  pub fn status(&self) -> Option<StatusCode> {
    match self {
      Self::HttpStatus { status, .. } => Some(*status),
      Self::Transport { source, .. } => source.status(),
      _ => None,
    }
  }
}

fn describe_status(status: &StatusCode, url: &str, body: &str) -> String {
  match *status {
    StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
      "Authentication failed. Please check your Jira credentials.".to_string()
    }
    StatusCode::NOT_FOUND => format!("Resource not found: {url}"),
    _ => format!("Unexpected error: HTTP {status} - {body}"),
  }
}
