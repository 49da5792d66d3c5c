//! Property tests for the delta calculator.

use proptest::prelude::*;
use warnline_core::{AnnotationSet, Warning};
use warnline_engine::compute_delta;

/// Small domains so that generated sets overlap and contain duplicates.
fn warning() -> impl Strategy<Value = Warning> {
    (
        prop::sample::select(vec!["a.rs", "b.rs", "c.rs"]),
        1u32..6,
        0u32..2,
        prop::sample::select(vec!["unused", "shadowed", "too long"]),
        prop::sample::select(vec!["", "style", "naming"]),
    )
        .prop_map(|(file, start, span, message, category)| {
            Warning::new(file, start, start + span, message).with_category(category)
        })
}

fn warnings() -> impl Strategy<Value = Vec<Warning>> {
    prop::collection::vec(warning(), 0..24)
}

proptest! {
    #[test]
    fn no_reference_makes_everything_new(current in warnings()) {
        let set = AnnotationSet::new(current);
        let delta = compute_delta(&set, None);
        prop_assert_eq!(delta.new_count, set.len());
        prop_assert_eq!(delta.fixed_count, 0);
    }

    #[test]
    fn identical_sets_have_no_delta(current in warnings()) {
        let set = AnnotationSet::new(current);
        let delta = compute_delta(&set, Some(&set.clone()));
        prop_assert_eq!(delta.new_count, 0);
        prop_assert_eq!(delta.fixed_count, 0);
        prop_assert_eq!(delta.matched_count, set.len());
    }

    #[test]
    fn matching_conserves_both_sides(current in warnings(), reference in warnings()) {
        let cur = AnnotationSet::new(current);
        let refr = AnnotationSet::new(reference);
        let delta = compute_delta(&cur, Some(&refr));
        prop_assert_eq!(delta.new_count + delta.matched_count, cur.len());
        prop_assert_eq!(delta.fixed_count + delta.matched_count, refr.len());
        prop_assert_eq!(delta.new_warnings.len(), delta.new_count);
        prop_assert_eq!(delta.fixed_warnings.len(), delta.fixed_count);
    }

    #[test]
    fn swapping_sides_swaps_counts(current in warnings(), reference in warnings()) {
        let cur = AnnotationSet::new(current);
        let refr = AnnotationSet::new(reference);
        let forward = compute_delta(&cur, Some(&refr));
        let backward = compute_delta(&refr, Some(&cur));
        prop_assert_eq!(forward.new_count, backward.fixed_count);
        prop_assert_eq!(forward.fixed_count, backward.new_count);
    }

    #[test]
    fn counts_ignore_order(current in warnings(), reference in warnings()) {
        let cur = AnnotationSet::new(current.clone());
        let refr = AnnotationSet::new(reference.clone());
        let delta = compute_delta(&cur, Some(&refr));

        let mut current_rev = current;
        current_rev.reverse();
        let mut reference_rev = reference;
        reference_rev.reverse();
        let reversed = compute_delta(
            &AnnotationSet::new(current_rev),
            Some(&AnnotationSet::new(reference_rev)),
        );
        prop_assert_eq!(delta.new_count, reversed.new_count);
        prop_assert_eq!(delta.fixed_count, reversed.fixed_count);
    }
}
