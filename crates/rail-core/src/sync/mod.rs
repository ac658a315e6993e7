//! Pushing file reconciliation results back to the service
//!
//! This module provides:
//! - **reconcile**: classify cases against a directory into update / orphans
//!   and collect files that have no case
//! - **synchronizer**: create, update and delete case records for a
//!   reconciliation, or only report the actions in dry-run mode

mod reconcile;
mod report;
mod synchronizer;

pub use reconcile::{ReconcileOptions, Reconciliation, reconcile};
pub use report::SyncReport;
pub use synchronizer::{SectionResolver, Synchronizer, location_description};
