//! Property-based tests for filter merging and bounded polling

use std::collections::BTreeMap;
use std::time::Duration;

use proptest::prelude::*;
use widget_api::{wait, Action, Filter, ParamValue, WaitError};

fn value_strategy() -> impl Strategy<Value = ParamValue> {
    prop_oneof![
        "[a-zA-Z0-9 _&]{0,10}".prop_map(ParamValue::Str),
        any::<i64>().prop_map(ParamValue::Int),
        any::<bool>().prop_map(ParamValue::Bool),
    ]
}

fn map_strategy() -> impl Strategy<Value = BTreeMap<String, ParamValue>> {
    prop::collection::btree_map("[a-z]{1,4}", value_strategy(), 0..6)
}

proptest! {
    /// Every key comes through; action values win on collision
    #[test]
    fn prop_merge_action_wins(filter in map_strategy(), action in map_strategy()) {
        let merged = Filter::from(filter.clone()).merged_with(&Action::from(action.clone()));

        for (key, value) in &action {
            prop_assert_eq!(merged.get(key), Some(value));
        }
        for (key, value) in &filter {
            if !action.contains_key(key) {
                prop_assert_eq!(merged.get(key), Some(value));
            }
        }
        prop_assert!(merged.keys().all(|k| filter.contains_key(k) || action.contains_key(k)));
    }

    /// Merging leaves both inputs as they were
    #[test]
    fn prop_merge_is_pure(filter in map_strategy(), action in map_strategy()) {
        let filter = Filter::from(filter);
        let action = Action::from(action);
        let (filter_before, action_before) = (filter.clone(), action.clone());

        let _ = filter.merged_with(&action);

        prop_assert_eq!(filter, filter_before);
        prop_assert_eq!(action, action_before);
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(16))]

    /// The k-th success is returned after exactly k calls
    #[test]
    fn prop_wait_stops_at_first_success(k in 1u32..6) {
        let mut calls = 0;
        let result = wait::until(Duration::from_secs(5), Duration::from_millis(1), || {
            calls += 1;
            (calls == k).then_some(calls)
        });

        prop_assert_eq!(result, Ok(k));
        prop_assert_eq!(calls, k);
    }

    /// Any timeout, even zero, gets at least one call
    #[test]
    fn prop_wait_always_calls_once(timeout_ms in 0u64..20) {
        let mut calls = 0;
        let result: Result<(), WaitError> =
            wait::until(Duration::from_millis(timeout_ms), Duration::from_millis(5), || {
                calls += 1;
                None
            });

        let expired = matches!(result, Err(WaitError::DeadlineExpired { .. }));
        prop_assert!(expired);
        prop_assert!(calls >= 1);
    }
}
