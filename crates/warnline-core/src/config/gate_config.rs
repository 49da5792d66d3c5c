//! Reference selection and ratchet configuration.

use serde::{Deserialize, Serialize};

/// Configuration for the `[gate]` section.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct GateConfig {
    /// Only builds with a `success` outcome may serve as reference. Default: false.
    pub use_stable_build_as_reference: Option<bool>,
    /// Fail builds that add warnings on top of a warning-bearing baseline. Default: false.
    pub should_ratchet: Option<bool>,
    /// Maximum history entries visited per walk, gaps included. Default: unbounded.
    pub max_lookback: Option<usize>,
}

impl GateConfig {
    pub fn effective_stable_only(&self) -> bool {
        self.use_stable_build_as_reference.unwrap_or(false)
    }

    pub fn effective_should_ratchet(&self) -> bool {
        self.should_ratchet.unwrap_or(false)
    }
}
