//! Shared test utilities for the rail-sync workspace.
//!
//! This crate provides fixtures used across crate test suites. It is a
//! dev-dependency only, never published.
//!
//! # Modules
//!
//! - [`fake`]: [`FakeService`], an in-memory [`rail_core::ServiceClient`]
//!   that records every call
//! - [`dir`]: [`TestDir`] builder for on-disk test file trees

pub mod dir;
pub mod fake;

pub use dir::TestDir;
pub use fake::{Call, FakeService};
