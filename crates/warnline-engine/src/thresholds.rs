//! Warning-count thresholds that produce the pre-ratchet outcome.

use warnline_core::config::ThresholdConfig;
use warnline_core::model::Outcome;

/// Limits on total and new warnings. A count strictly greater than a limit
/// trips it; failed limits take precedence over unstable ones.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Thresholds {
    pub unstable_total: Option<usize>,
    pub failed_total: Option<usize>,
    pub unstable_new: Option<usize>,
    pub failed_new: Option<usize>,
}

impl Thresholds {
    /// No limits; always evaluates to `Success`.
    pub fn none() -> Self {
        Self::default()
    }

    pub fn evaluate(&self, total: usize, new: usize) -> Outcome {
        if exceeds(self.failed_total, total) || exceeds(self.failed_new, new) {
            Outcome::Failure
        } else if exceeds(self.unstable_total, total) || exceeds(self.unstable_new, new) {
            Outcome::Unstable
        } else {
            Outcome::Success
        }
    }
}

fn exceeds(limit: Option<usize>, count: usize) -> bool {
    limit.is_some_and(|limit| count > limit)
}

impl From<&ThresholdConfig> for Thresholds {
    fn from(config: &ThresholdConfig) -> Self {
        Self {
            unstable_total: config.unstable_total,
            failed_total: config.failed_total,
            unstable_new: config.unstable_new,
            failed_new: config.failed_new,
        }
    }
}
