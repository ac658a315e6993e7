//! Service-side queries
//!
//! - **run_finder**: runs of a project, filtered by configs and statuses and
//!   ordered by creation or milestone due date
//! - **test_finder**: tests of one resolved run
//! - **case_finder**: cases of a testsuite, optionally narrowed by section and type

mod case_finder;
mod run_finder;
mod test_finder;

pub use case_finder::{CaseFinder, CaseQuery};
pub use run_finder::{Order, RunFinder, RunQuery, SortKey};
pub use test_finder::{TestFinder, TestQuery};
