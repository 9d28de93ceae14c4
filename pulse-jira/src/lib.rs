//! # Jira API Client
//!
//! Async client for the Jira REST API and the Jira activity stream. Covers
//! issue lookup and search by assignee, comments, user lookup and search, and
//! the per-user Atom activity feed. Credentials come from `.netrc` and
//! connection settings from the environment.

pub mod atom;
pub mod auth;
mod client;
pub mod config;
pub mod consts;
pub mod decode;
mod endpoints;
pub mod error;
pub mod models;
pub mod netrc;
pub mod pagination;
mod transport;

// Re-export the client
pub use atom::{ActivityFeed, ActivityItem, Category, Link, Person, Text};
pub use client::{JiraClient, create_jira_client};
pub use config::ClientConfig;
pub use endpoints::users::{MAX_USER_SEARCH_RESULTS, UserSearchParams};
pub use error::{Format, JiraError, Result};
// Re-export models
pub use models::{CommentRequest, Issue, IssueFields, IssueList, IssueType, JiraAuth, JiraProject, JiraUser};
pub use pagination::Pagination;
