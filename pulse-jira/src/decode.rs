//! JSON response decoding for the REST resources.
//!
//! The Atom counterpart lives in [`crate::atom`]; each endpoint calls the one
//! matching its resource, there is no content sniffing.

use serde::de::DeserializeOwned;

use crate::error::{Format, JiraError, Result};

/// Decode a JSON body into `T`.
///
/// # Errors
///
/// Returns [`JiraError::Decode`] if the body is not valid JSON or does not
/// match the shape of `T`.
pub fn decode_json<T: DeserializeOwned>(body: &[u8]) -> Result<T> {
  serde_json::from_slice(body).map_err(|e| JiraError::decode(Format::Json, e, body))
}
