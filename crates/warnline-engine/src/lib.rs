//! Regression gate for per-build warning results.
//!
//! - `history`: reference build selection over a `BuildHistory`.
//! - `delta`: new/fixed warnings against the reference.
//! - `thresholds`: warning-count limits that yield the pre-ratchet outcome.
//! - `ratchet`: forces failure on regressions against a warning-bearing baseline.
//! - `assembly`: runs the above in order and hands the record to a `ResultSink`.

pub mod assembly;
pub mod delta;
pub mod history;
pub mod ratchet;
pub mod thresholds;

pub use assembly::{BuildInput, GatePolicy, ResultAssembler};
pub use delta::{compute_delta, WarningDelta};
pub use history::{find_previous, find_reference, select_reference};
pub use ratchet::{apply_ratchet, RatchetDecision};
pub use thresholds::Thresholds;
