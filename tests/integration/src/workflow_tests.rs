//! End-to-end workflows against an in-memory service
//!
//! These exercise the full flow: option file -> finders -> matcher ->
//! reconciliation -> synchronizer.

use pretty_assertions::assert_eq;
use rail_core::{
    Case, CaseFinder, CaseQuery, MatchMode, MatchOptions, MatchOutput, Order, ReconcileOptions,
    Result, Run, RunFinder, RunQuery, Synchronizer, Test, TestFinder, TestQuery, find_tests,
    reconcile,
};
use rail_fs::ConfigStore;
use rail_test_utils::{Call, FakeService, TestDir};

const WEB: u64 = 1;
const REGRESSION: u64 = 20;
const AUTH: u64 = 30;

fn case_service() -> FakeService {
    FakeService::new()
        .with_project(WEB, "Web")
        .with_suite(WEB, REGRESSION, "Regression")
        .with_section(REGRESSION, AUTH, "Auth")
        .with_case(
            REGRESSION,
            Case {
                section_id: Some(AUTH),
                ..Case::new(1, "login.t")
            },
        )
        .with_case(
            REGRESSION,
            Case {
                section_id: Some(AUTH),
                ..Case::new(2, "legacy.t")
            },
        )
}

fn auth_section(_: &Case) -> Result<u64> {
    Ok(AUTH)
}

fn titles(cases: &[Case]) -> Vec<&str> {
    cases.iter().map(|c| c.title.as_str()).collect()
}

#[test]
fn test_reconcile_and_synchronize_suite() {
    let service = case_service();
    let dir = TestDir::new().with_files(&["auth/login.t", "auth/logout.t", "README.md"]);
    dir.write(
        "sync.json",
        &serde_json::json!({
            "directory": dir.root(),
            "extension": ".t",
        })
        .to_string(),
    );

    let options: ReconcileOptions = ConfigStore::new().load(&dir.path("sync.json")).unwrap();
    let query = CaseQuery::new("Web", "Regression");
    let cases = CaseFinder::new(&service).get_cases(&query).unwrap();

    let plan = reconcile(&options, cases).unwrap();
    assert_eq!(titles(&plan.update), vec!["login.t"]);
    assert_eq!(
        plan.update[0].full_title.as_deref(),
        Some(dir.resolved("auth/login.t").as_str())
    );
    assert_eq!(titles(&plan.orphans), vec!["legacy.t"]);
    assert_eq!(plan.missing.len(), 1);
    assert_eq!(
        plan.missing[0].title,
        dir.path("auth/logout.t").to_string_lossy()
    );

    let report = Synchronizer::new(&service, &auth_section)
        .synchronize(&plan)
        .unwrap();
    assert!(report.success);
    assert_eq!(report.actions.len(), 3);
    assert_eq!(service.mutations().len(), 3);
    assert_eq!(service.count("add_case"), 1);
    assert_eq!(service.count("update_case"), 1);
    assert_eq!(service.count("delete_case"), 1);

    // A second pass finds nothing to create or delete.
    let cases = CaseFinder::new(&service).get_cases(&query).unwrap();
    let again = reconcile(&options, cases).unwrap();
    assert!(again.missing.is_empty());
    assert!(again.orphans.is_empty());
    assert_eq!(titles(&again.update), vec!["login.t", "logout.t"]);
}

#[test]
fn test_dry_run_leaves_service_untouched() {
    let service = case_service();
    let dir = TestDir::new().with_files(&["login.t", "logout.t"]);

    let cases = CaseFinder::new(&service)
        .get_cases(&CaseQuery::new("Web", "Regression").section("Auth"))
        .unwrap();
    let plan = reconcile(&ReconcileOptions::new(dir.root()).dry_run(true), cases).unwrap();
    let report = Synchronizer::new(&service, &auth_section)
        .synchronize(&plan)
        .unwrap();

    assert_eq!(report.actions.len(), 3);
    assert!(report.actions.iter().all(|a| a.starts_with("[dry-run]")));
    assert!(service.mutations().is_empty());
    assert!(service.calls().iter().all(|c| !c.is_mutation()));
    assert_eq!(titles(&service.cases_in(REGRESSION)), vec!["login.t", "legacy.t"]);
}

#[test]
fn test_latest_run_failures_with_files() {
    let failed = 5;
    let service = FakeService::new()
        .with_project(WEB, "Web")
        .with_status("passed", "passed_count", 1)
        .with_status("failed", "failed_count", failed)
        .with_run(WEB, Run::new(1, "Nightly", 100))
        .with_run(WEB, Run::new(2, "Smoke", 200))
        .with_test(test(11, 2, "login.t", failed))
        .with_test(test(12, 2, "logout.t", failed))
        .with_test(test(13, 2, "signup.t", 1))
        .with_test(test(14, 1, "login.t", failed));
    let dir = TestDir::new().with_files(&["web/login.t", "web/signup.t"]);

    let runs = RunFinder::new(&service)
        .find_runs(&RunQuery::new("Web").order(Order::Lifo))
        .unwrap();
    let latest = &runs[0];
    assert_eq!(latest.name, "Smoke");

    let (tests, run) = TestFinder::new(&service)
        .get_tests(&TestQuery::new("Web", latest.name.as_str()).statuses(["failed"]))
        .unwrap();
    assert_eq!(run.id, 2);
    assert_eq!(tests.len(), 2);

    let options = MatchOptions::new(MatchMode::Match(dir.root().to_path_buf())).names_only();
    let paths = find_tests(&options, tests).unwrap();
    assert_eq!(paths, MatchOutput::Names(vec![dir.resolved("web/login.t")]));

    assert!(service.calls().contains(&Call::Tests {
        run_id: 2,
        status_ids: vec![failed],
        user_ids: Vec::new(),
    }));
}

fn test(id: u64, run_id: u64, title: &str, status_id: u64) -> Test {
    Test {
        id: Some(id),
        run_id: Some(run_id),
        title: title.to_string(),
        status_id: Some(status_id),
        ..Test::default()
    }
}
