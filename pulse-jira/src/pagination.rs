//! # Pagination
//!
//! Page metadata derived from the `total`, `startAt` and `maxResults` values a
//! paged Jira resource echoes back.

use serde::{Deserialize, Serialize};

use crate::error::{JiraError, Result};

/// Page index, page count and page list for one page of results
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
  pub total: u32,
  pub start_at: u32,
  pub max_results: u32,
  /// Zero-based index of the current page, `ceil(start_at / max_results)`
  pub page: u32,
  /// `ceil(total / max_results)`
  pub page_count: u32,
  /// `0..page_count`
  pub pages: Vec<u32>,
}

impl Pagination {
  /// Compute the page metadata for a result window.
  ///
  /// # Errors
  ///
  /// Returns [`JiraError::InvalidArgument`] when `max_results` is zero.
  pub fn compute(total: u32, start_at: u32, max_results: u32) -> Result<Self> {
    if max_results == 0 {
      return Err(JiraError::invalid_argument(
        "max_results must be greater than zero to compute pagination",
      ));
    }

    let page_count = total.div_ceil(max_results);
    let page = start_at.div_ceil(max_results);

    Ok(Self {
      total,
      start_at,
      max_results,
      page,
      page_count,
      pages: (0..page_count).collect(),
    })
  }

  /// Whether a page follows the current one
  pub fn has_next(&self) -> bool {
    self.page + 1 < self.page_count
  }

  /// The `startAt` value of the following page, if there is one
  pub fn next_start_at(&self) -> Option<u32> {
    let next = self.start_at.checked_add(self.max_results)?;
    (next < self.total).then_some(next)
  }
}
