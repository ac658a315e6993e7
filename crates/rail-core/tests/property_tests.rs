//! Property-based tests for run selection and file matching

use proptest::prelude::*;
use rail_core::{
    Case, MatchMode, MatchOptions, Order, Plan, Run, RunFinder, RunQuery, find_tests,
};
use rail_test_utils::{FakeService, TestDir};

fn standalone(created: &[i64]) -> FakeService {
    created
        .iter()
        .enumerate()
        .fold(FakeService::new().with_project(1, "Web"), |service, (i, at)| {
            service.with_run(1, Run::new(i as u64 + 1, format!("run {i}"), *at))
        })
}

proptest! {
    /// Exact config matching is set equality, independent of order.
    #[test]
    fn prop_exact_configs_is_set_equality(
        own in prop::collection::btree_set(0u64..8, 0..6),
        requested in prop::collection::btree_set(0u64..8, 0..6),
    ) {
        let run = Run::new(1, "run", 0).with_configs(own.iter().copied());
        let forward: Vec<u64> = requested.iter().copied().collect();
        let backward: Vec<u64> = requested.iter().rev().copied().collect();

        prop_assert_eq!(run.has_exact_configs(&forward), own == requested);
        prop_assert_eq!(run.has_exact_configs(&backward), own == requested);
    }

    /// Without a config filter a plan contributes exactly its config-less runs.
    #[test]
    fn prop_unfiltered_plan_runs_have_no_configs(
        configs in prop::collection::vec(prop::collection::btree_set(0u64..4, 0..3), 0..8),
    ) {
        let runs: Vec<Run> = configs
            .iter()
            .enumerate()
            .map(|(i, set)| Run::new(i as u64 + 1, "Release", 0).with_configs(set.iter().copied()))
            .collect();
        let expected: Vec<u64> = runs
            .iter()
            .filter(|run| run.config_ids.is_empty())
            .map(|run| run.id)
            .collect();
        let service = FakeService::new().with_project(1, "Web").with_plan(
            1,
            Plan {
                id: 100,
                name: "Release".to_string(),
                created_on: 0,
                milestone_id: None,
                runs,
            },
        );

        let found = RunFinder::new(&service).find_runs(&RunQuery::new("Web")).unwrap();
        let ids: Vec<u64> = found.iter().map(|run| run.id).collect();

        prop_assert_eq!(ids, expected);
    }

    /// FIFO is non-decreasing and LIFO non-increasing in creation time.
    #[test]
    fn prop_runs_ordered_by_creation(created in prop::collection::vec(-1000i64..1000, 0..12)) {
        let service = standalone(&created);
        let finder = RunFinder::new(&service);

        let fifo = finder.find_runs(&RunQuery::new("Web")).unwrap();
        let lifo = finder
            .find_runs(&RunQuery::new("Web").order(Order::Lifo))
            .unwrap();

        prop_assert_eq!(fifo.len(), created.len());
        prop_assert_eq!(lifo.len(), created.len());
        prop_assert!(fifo.windows(2).all(|w| w[0].created_on <= w[1].created_on));
        prop_assert!(lifo.windows(2).all(|w| w[0].created_on >= w[1].created_on));
    }

    /// Ties keep listing order in both directions.
    #[test]
    fn prop_sort_is_stable(created in prop::collection::vec(0i64..3, 0..12)) {
        let service = standalone(&created);
        let finder = RunFinder::new(&service);

        for order in [Order::Fifo, Order::Lifo] {
            let runs = finder.find_runs(&RunQuery::new("Web").order(order)).unwrap();
            for pair in runs.windows(2) {
                if pair[0].created_on == pair[1].created_on {
                    prop_assert!(pair[0].id < pair[1].id);
                }
            }
        }
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    /// Match and Orphans split the cases between them with nothing lost.
    #[test]
    fn prop_match_and_orphans_partition_cases(
        titles in prop::collection::vec("[a-e]\\.t", 0..8),
    ) {
        let dir = TestDir::new().with_files(&["a.t", "c.t", "sub/e.t"]);
        let cases: Vec<Case> = titles
            .iter()
            .enumerate()
            .map(|(i, title)| Case::new(i as u64 + 1, title.as_str()))
            .collect();

        let root = dir.root().to_path_buf();
        let matched = find_tests(&MatchOptions::new(MatchMode::Match(root.clone())), cases.clone())
            .unwrap()
            .into_records()
            .unwrap();
        let orphans = find_tests(&MatchOptions::new(MatchMode::Orphans(root)), cases.clone())
            .unwrap()
            .into_records()
            .unwrap();

        prop_assert_eq!(matched.len() + orphans.len(), cases.len());

        let mut ids: Vec<Option<u64>> = matched.iter().chain(&orphans).map(|c| c.id).collect();
        ids.sort();
        let expected: Vec<Option<u64>> = cases.iter().map(|c| c.id).collect();
        prop_assert_eq!(ids, expected);

        for case in &matched {
            prop_assert!(["a.t", "c.t", "e.t"].contains(&case.title.as_str()));
        }
        for case in &orphans {
            prop_assert!(["b.t", "d.t"].contains(&case.title.as_str()));
        }
    }
}
