//! Ratchet gate: no new warnings on top of an accepted, warning-bearing baseline.

use warnline_core::model::{Outcome, ResultRecord};

/// Final outcome after the ratchet, and whether the ratchet forced it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RatchetDecision {
    pub outcome: Outcome,
    pub triggered: bool,
}

impl RatchetDecision {
    pub fn unchanged(outcome: Outcome) -> Self {
        Self {
            outcome,
            triggered: false,
        }
    }
}

/// Decide whether `current_outcome` must be forced to `Failure`.
///
/// Fires only when the build would otherwise succeed, the reference exists
/// and carried at least one warning, and this build introduces new ones. A
/// clean reference never triggers the ratchet: thresholds cover that case.
pub fn apply_ratchet(
    current_outcome: Outcome,
    reference: Option<&ResultRecord>,
    new_count: usize,
) -> RatchetDecision {
    if !current_outcome.is_success() {
        return RatchetDecision::unchanged(current_outcome);
    }
    if has_previous_warning_history(reference) && new_count > 0 {
        return RatchetDecision {
            outcome: Outcome::Failure,
            triggered: true,
        };
    }
    RatchetDecision::unchanged(current_outcome)
}

fn has_previous_warning_history(reference: Option<&ResultRecord>) -> bool {
    reference.is_some_and(|r| r.total_warnings() > 0)
}
