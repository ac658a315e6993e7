//! Query, filter and synchronization helpers for a test-management service
//!
//! This crate sits on top of a service API client (abstracted as
//! [`ServiceClient`]) and the filesystem layer in `rail-fs`:
//!
//! - **Finders**: runs of a project (standalone and plan-nested) filtered by
//!   configs and statuses and ordered FIFO/LIFO; tests of a run; cases of a
//!   testsuite
//! - **Matcher**: classify cases as matched, orphaned, or list files with no
//!   case, against a directory of test files
//! - **Sync**: build a reconciliation and push it back as case
//!   create/update/delete calls, with dry-run support
//!
//! # Architecture
//!
//! ```text
//!          caller (CLI, CI job, ...)
//!                    |
//!                rail-core
//!              /           \
//!    ServiceClient        rail-fs
//!   (API client impl)  (scan, resolve)
//! ```
//!
//! Everything is synchronous and single threaded. Every service call blocks
//! until the client returns.
//!
//! # Example
//!
//! ```ignore
//! use rail_core::{Order, RunFinder, RunQuery};
//!
//! let runs = RunFinder::new(&client)
//!     .find_runs(&RunQuery::new("Web").configs(["Chrome"]).order(Order::Lifo))?;
//! ```

pub mod client;
pub mod error;
pub mod finder;
pub mod logging;
pub mod matcher;
pub mod model;
pub mod sync;

pub use client::ServiceClient;
pub use error::{EntityKind, Error, Result};
pub use finder::{
    CaseFinder, CaseQuery, Order, RunFinder, RunQuery, SortKey, TestFinder, TestQuery,
};
pub use matcher::{MatchFlags, MatchMode, MatchOptions, MatchOutput, find_tests};
pub use model::{
    Case, CaseFields, CaseRecord, ConfigItem, Milestone, Plan, Project, Run, RunStatus, Section,
    Suite, Test,
};
pub use sync::{
    ReconcileOptions, Reconciliation, SectionResolver, SyncReport, Synchronizer, reconcile,
};
