//! Finder and sync events under the installed subscriber

mod common;

use common::{LOGIN, case_world, ids, run_world};
use rail_core::{Case, Reconciliation, Result, RunFinder, RunQuery, Synchronizer, logging};

fn login_section(_: &Case) -> Result<u64> {
    Ok(LOGIN)
}

#[test]
fn test_operations_log_under_subscriber() {
    // Only the first init in a process succeeds
    let _ = logging::init_with("rail_core=debug");
    assert!(logging::init().is_err());

    // Run 7 has no status summary and is dropped at debug level
    let service = run_world();
    let runs = RunFinder::new(&service)
        .find_runs(&RunQuery::new("Web").statuses(["retest"]))
        .unwrap();
    assert_eq!(ids(&runs), vec![2, 1]);

    let service = case_world();
    let reconciliation = Reconciliation {
        orphans: vec![Case::new(2, "b.t")],
        ..Reconciliation::default()
    };
    let report = Synchronizer::new(&service, &login_section)
        .synchronize(&reconciliation)
        .unwrap();
    assert_eq!(report.actions, vec!["Deleted case C2 \"b.t\"".to_string()]);
}
