//! Test utilities shared across the pulse workspace
//!
//! This crate provides common testing infrastructure including:
//! - Temporary home directories holding a `.netrc` file ([`NetrcGuard`])
//! - Canned Jira JSON payloads and Atom feeds ([`fixtures`])
//!
//! The clippy dead_code lint is disabled for this crate because test utilities
//! may not be used by all tests, and the compiler cannot detect usage across
//! crate boundaries in development dependencies.

#![allow(dead_code)]

pub mod fixtures;
pub mod netrc;

// Re-export commonly used items
pub use netrc::NetrcGuard;
