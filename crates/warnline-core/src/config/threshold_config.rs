//! Warning-count thresholds.

use serde::{Deserialize, Serialize};

/// Configuration for the `[thresholds]` section. A count strictly above a
/// limit trips it; unset limits never trip.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(default)]
pub struct ThresholdConfig {
    pub unstable_total: Option<usize>,
    pub failed_total: Option<usize>,
    pub unstable_new: Option<usize>,
    pub failed_new: Option<usize>,
}
