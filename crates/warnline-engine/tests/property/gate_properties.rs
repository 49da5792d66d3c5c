//! Property tests for reference selection and the ratchet.

use proptest::prelude::*;
use warnline_core::model::HistoryChain;
use warnline_core::{AnnotationSet, BuildId, Outcome, ResultRecord, Warning};
use warnline_engine::{apply_ratchet, find_reference};

fn outcome() -> impl Strategy<Value = Outcome> {
    prop_oneof![
        Just(Outcome::Success),
        Just(Outcome::Unstable),
        Just(Outcome::Failure),
    ]
}

fn record(build: u64, outcome: Outcome, warnings: usize) -> ResultRecord {
    let annotations: AnnotationSet = (0..warnings)
        .map(|i| Warning::new("src/lib.rs", i as u32 + 1, i as u32 + 1, "unused"))
        .collect();
    ResultRecord {
        build_id: BuildId(build),
        outcome,
        annotations,
        new_count: 0,
        fixed_count: 0,
        reference_build: None,
        ratchet_failed: false,
        zero_warnings_since: None,
    }
}

/// A chain of builds 1..=n where each slot is either a gap or a record.
fn chain_slots() -> impl Strategy<Value = Vec<Option<Outcome>>> {
    prop::collection::vec(prop::option::weighted(0.8, outcome()), 0..16)
}

fn build_chain(slots: &[Option<Outcome>]) -> HistoryChain {
    let chain = HistoryChain::from_records(
        slots
            .iter()
            .enumerate()
            .filter_map(|(i, slot)| slot.map(|o| record(i as u64 + 1, o, 1))),
    );
    for (i, slot) in slots.iter().enumerate() {
        if slot.is_none() {
            chain.push_gap(BuildId(i as u64 + 1)).unwrap();
        }
    }
    chain
}

proptest! {
    #[test]
    fn ratchet_fires_exactly_when_all_conditions_hold(
        current in outcome(),
        reference in prop::option::of((outcome(), 0usize..4)),
        new_count in 0usize..4,
    ) {
        let reference = reference.map(|(o, n)| record(1, o, n));
        let decision = apply_ratchet(current, reference.as_ref(), new_count);

        let expected = current == Outcome::Success
            && reference.as_ref().is_some_and(|r| r.total_warnings() > 0)
            && new_count > 0;
        prop_assert_eq!(decision.triggered, expected);
        if expected {
            prop_assert_eq!(decision.outcome, Outcome::Failure);
        } else {
            prop_assert_eq!(decision.outcome, current);
        }
    }

    #[test]
    fn ratchet_never_changes_a_non_success_outcome(
        current in prop_oneof![Just(Outcome::Unstable), Just(Outcome::Failure)],
        reference_warnings in 0usize..4,
        new_count in 0usize..4,
    ) {
        let reference = record(1, Outcome::Success, reference_warnings);
        let decision = apply_ratchet(current, Some(&reference), new_count);
        prop_assert_eq!(decision.outcome, current);
        prop_assert!(!decision.triggered);
    }

    #[test]
    fn any_outcome_policy_takes_nearest_record(slots in chain_slots()) {
        let chain = build_chain(&slots);
        let next = BuildId(slots.len() as u64 + 1);
        let found = find_reference(&chain, next, false, None).unwrap();

        let expected = slots
            .iter()
            .enumerate()
            .rev()
            .find(|(_, slot)| slot.is_some())
            .map(|(i, _)| BuildId(i as u64 + 1));
        prop_assert_eq!(found.map(|r| r.build_id), expected);
    }

    #[test]
    fn stable_policy_takes_nearest_success(slots in chain_slots()) {
        let chain = build_chain(&slots);
        let next = BuildId(slots.len() as u64 + 1);
        let found = find_reference(&chain, next, true, None).unwrap();

        let expected = slots
            .iter()
            .enumerate()
            .rev()
            .find(|(_, slot)| **slot == Some(Outcome::Success))
            .map(|(i, _)| BuildId(i as u64 + 1));
        prop_assert_eq!(found.as_ref().map(|r| r.build_id), expected);
        if let Some(r) = found {
            prop_assert_eq!(r.outcome, Outcome::Success);
        }
    }

    #[test]
    fn lookback_never_reaches_past_its_window(
        slots in chain_slots(),
        lookback in 1usize..6,
    ) {
        let chain = build_chain(&slots);
        let next = BuildId(slots.len() as u64 + 1);
        if let Some(r) = find_reference(&chain, next, false, Some(lookback)).unwrap() {
            prop_assert!(next.get() - r.build_id.get() <= lookback as u64);
        }
    }
}
