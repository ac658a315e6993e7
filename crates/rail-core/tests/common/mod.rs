#![allow(dead_code)]

use rail_core::{Case, Plan, Run, RunStatus, Test};
use rail_test_utils::FakeService;

pub const WEB: u64 = 1;
pub const REGRESSION: u64 = 20;
pub const LOGIN: u64 = 30;
pub const CHECKOUT: u64 = 31;

/// Project "Web" with two standalone runs and two plans.
///
/// | run | kind             | created_on | milestone (due) | configs          |
/// |-----|------------------|------------|-----------------|------------------|
/// | 1   | standalone       | 300        | 7 (5000)        |                  |
/// | 2   | standalone       | 100        |                 |                  |
/// | 3   | "Release 2.0"    | 200 (plan) | 8 (1000, plan)  | Chrome, Linux    |
/// | 4   | "Release 2.0"    | 200 (plan) | 8 (1000, plan)  | Firefox, Linux   |
/// | 5   | "Release 2.0"    | 200 (plan) | 8 (1000, plan)  | Chrome           |
/// | 6   | "Release 2.1"    | 400 (plan) |                 | Linux, Chrome    |
/// | 7   | "Release 2.1"    | 400 (plan) |                 |                  |
///
/// Without a config filter only the config-less runs 1, 2 and 7 qualify.
pub fn run_world() -> FakeService {
    FakeService::new()
        .with_project(WEB, "Web")
        .with_project(2, "Mobile")
        .with_config(WEB, 10, "Chrome")
        .with_config(WEB, 11, "Firefox")
        .with_config(WEB, 12, "Linux")
        .with_status("passed", "passed_count", 1)
        .with_status("retest", "retest_count", 4)
        .with_status("failed", "failed_count", 5)
        .with_run(WEB, Run::new(1, "Smoke", 300).with_milestone(7))
        .with_run(WEB, Run::new(2, "Hotfix", 100))
        .with_plan(
            WEB,
            Plan {
                id: 100,
                name: "Release 2.0".to_string(),
                created_on: 200,
                milestone_id: Some(8),
                runs: vec![
                    Run::new(3, "Release 2.0", 999).with_configs([10, 12]),
                    Run::new(4, "Release 2.0", 999).with_configs([11, 12]),
                    Run::new(5, "Release 2.0", 999)
                        .with_configs([10])
                        .with_milestone(7),
                ],
            },
        )
        .with_plan(
            WEB,
            Plan {
                id: 101,
                name: "Release 2.1".to_string(),
                created_on: 400,
                milestone_id: None,
                runs: vec![
                    Run::new(6, "Release 2.1", 50).with_configs([12, 10]),
                    Run::new(7, "Release 2.1", 60),
                ],
            },
        )
        .with_milestone(7, Some(5000))
        .with_milestone(8, Some(1000))
        .with_run_status(1, status(&[("passed_count", 3), ("retest_count", 1)]))
        .with_run_status(2, status(&[("passed_count", 0), ("retest_count", 2)]))
        .with_run_status(3, status(&[("passed_count", 5), ("retest_count", 0)]))
}

/// Run world plus users and tests for run 2 and plan run 3.
pub fn test_world() -> FakeService {
    run_world()
        .with_user("alice", 501)
        .with_user("bob", 502)
        .with_test(test(9001, 2, "login.t", 1, 501))
        .with_test(test(9002, 2, "logout.t", 5, 502))
        .with_test(test(9003, 2, "signup.t", 4, 501))
        .with_test(test(9004, 3, "cart.t", 1, 502))
}

/// Suite "Regression" with sections "Login" and "Checkout".
pub fn case_world() -> FakeService {
    FakeService::new()
        .with_project(WEB, "Web")
        .with_suite(WEB, REGRESSION, "Regression")
        .with_section(REGRESSION, LOGIN, "Login")
        .with_section(REGRESSION, CHECKOUT, "Checkout")
        .with_case_type("Automated", 3)
        .with_case_type("Manual", 7)
        .with_case(REGRESSION, case(1, "a.t", LOGIN, 3))
        .with_case(REGRESSION, case(2, "b.t", LOGIN, 3))
        .with_case(REGRESSION, case(3, "pay.t", CHECKOUT, 3))
        .with_case(REGRESSION, case(4, "exploratory", CHECKOUT, 7))
}

pub fn status(counts: &[(&str, u64)]) -> RunStatus {
    counts.iter().map(|(label, count)| (*label, *count)).collect()
}

pub fn test(id: u64, run_id: u64, title: &str, status_id: u64, user_id: u64) -> Test {
    Test {
        id: Some(id),
        run_id: Some(run_id),
        title: title.to_string(),
        status_id: Some(status_id),
        assignedto_id: Some(user_id),
        ..Test::default()
    }
}

pub fn case(id: u64, title: &str, section_id: u64, type_id: u64) -> Case {
    Case {
        section_id: Some(section_id),
        type_id: Some(type_id),
        ..Case::new(id, title)
    }
}

pub fn ids(runs: &[Run]) -> Vec<u64> {
    runs.iter().map(|r| r.id).collect()
}
