//! Delta calculator: new and fixed warnings against a reference build.
//!
//! Matching is one-to-one by identity key (file, line range, message,
//! category). When a key occurs several times, occurrences pair up in their
//! original order: the first current occurrence takes the first reference
//! occurrence, and so on. Warnings without a key never match.

use std::collections::VecDeque;

use rustc_hash::FxHashMap;
use warnline_core::model::{AnnotationSet, Warning, WarningKey};

/// Outcome of comparing two annotation sets.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WarningDelta {
    pub new_count: usize,
    pub fixed_count: usize,
    /// Warnings present in both builds.
    pub matched_count: usize,
    /// Current warnings with no partner in the reference, in current order.
    pub new_warnings: Vec<Warning>,
    /// Reference warnings with no partner in the current build, in reference order.
    pub fixed_warnings: Vec<Warning>,
}

/// Compare `current` against `reference`.
///
/// Without a reference every current warning is new and nothing is fixed.
pub fn compute_delta(current: &AnnotationSet, reference: Option<&AnnotationSet>) -> WarningDelta {
    let Some(reference) = reference else {
        return WarningDelta {
            new_count: current.len(),
            fixed_count: 0,
            matched_count: 0,
            new_warnings: current.warnings().to_vec(),
            fixed_warnings: Vec::new(),
        };
    };

    // Unmatched reference positions per key, oldest first.
    let mut pool: FxHashMap<WarningKey<'_>, VecDeque<usize>> = FxHashMap::default();
    for (idx, warning) in reference.iter().enumerate() {
        if let Some(key) = warning.key() {
            pool.entry(key).or_default().push_back(idx);
        }
    }

    let mut reference_matched = vec![false; reference.len()];
    let mut new_warnings = Vec::new();
    let mut matched_count = 0;
    for warning in current.iter() {
        let partner = warning
            .key()
            .and_then(|key| pool.get_mut(&key))
            .and_then(VecDeque::pop_front);
        match partner {
            Some(idx) => {
                reference_matched[idx] = true;
                matched_count += 1;
            }
            None => new_warnings.push(warning.clone()),
        }
    }

    let fixed_warnings: Vec<Warning> = reference
        .iter()
        .zip(&reference_matched)
        .filter(|(_, matched)| !**matched)
        .map(|(w, _)| w.clone())
        .collect();

    WarningDelta {
        new_count: new_warnings.len(),
        fixed_count: fixed_warnings.len(),
        matched_count,
        new_warnings,
        fixed_warnings,
    }
}
