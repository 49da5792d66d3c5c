//! Result record assembly: reference lookup, delta, thresholds and ratchet,
//! then a single hand-off to the sink.

use warnline_core::config::WarnlineConfig;
use warnline_core::errors::{AssemblyError, HistoryError};
use warnline_core::model::{AnnotationSet, BuildId, Outcome, ResultRecord};
use warnline_core::traits::{BuildHistory, ResultSink};

use crate::delta::compute_delta;
use crate::history::{find_previous, find_reference};
use crate::ratchet::{apply_ratchet, RatchetDecision};
use crate::thresholds::Thresholds;

/// Per-pipeline gate settings.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GatePolicy {
    /// Only `Success` builds may serve as reference.
    pub stable_only: bool,
    pub should_ratchet: bool,
    pub max_lookback: Option<usize>,
    pub thresholds: Thresholds,
}

impl GatePolicy {
    pub fn from_config(config: &WarnlineConfig) -> Self {
        Self {
            stable_only: config.gate.effective_stable_only(),
            should_ratchet: config.gate.effective_should_ratchet(),
            max_lookback: config.gate.max_lookback,
            thresholds: Thresholds::from(&config.thresholds),
        }
    }
}

/// Everything the host knows about the build being gated.
#[derive(Debug, Clone)]
pub struct BuildInput {
    pub build_id: BuildId,
    pub annotations: AnnotationSet,
    /// Outcome decided by the host before warnings are considered.
    pub host_outcome: Outcome,
}

impl BuildInput {
    pub fn new(build_id: BuildId, annotations: AnnotationSet) -> Self {
        Self {
            build_id,
            annotations,
            host_outcome: Outcome::Success,
        }
    }

    pub fn with_host_outcome(mut self, outcome: Outcome) -> Self {
        self.host_outcome = outcome;
        self
    }
}

/// Assembles one `ResultRecord` per build from history and the current
/// warnings.
///
/// Builds of one pipeline must be assembled one at a time, in increasing
/// build id order; each stored record is history for the next build.
pub struct ResultAssembler<H, S> {
    history: H,
    sink: S,
    policy: GatePolicy,
}

impl<H: BuildHistory, S: ResultSink> ResultAssembler<H, S> {
    pub fn new(history: H, sink: S, policy: GatePolicy) -> Self {
        Self {
            history,
            sink,
            policy,
        }
    }

    pub fn policy(&self) -> &GatePolicy {
        &self.policy
    }

    /// Compute the record for `input` and store it.
    ///
    /// The sink is called once, after every decision is final. On any error
    /// nothing is stored, so the previous build stays the latest history.
    pub fn assemble(&self, input: BuildInput) -> Result<ResultRecord, AssemblyError> {
        let record = self.evaluate(input)?;
        self.sink.store(&record)?;
        tracing::info!(
            build = %record.build_id,
            outcome = %record.outcome,
            warnings = record.total_warnings(),
            new = record.new_count,
            fixed = record.fixed_count,
            "result record stored"
        );
        Ok(record)
    }

    /// Compute the record for `input` without storing it.
    pub fn evaluate(&self, input: BuildInput) -> Result<ResultRecord, AssemblyError> {
        let policy = &self.policy;
        let reference = find_reference(
            &self.history,
            input.build_id,
            policy.stable_only,
            policy.max_lookback,
        )?;
        tracing::debug!(
            build = %input.build_id,
            reference = ?reference.as_ref().map(|r| r.build_id),
            stable_only = policy.stable_only,
            "reference build selected"
        );

        let delta = compute_delta(&input.annotations, reference.as_ref().map(|r| &r.annotations));
        tracing::debug!(
            build = %input.build_id,
            new = delta.new_count,
            fixed = delta.fixed_count,
            "warning delta computed"
        );

        let threshold_outcome = policy
            .thresholds
            .evaluate(input.annotations.len(), delta.new_count);
        let pre_ratchet = input.host_outcome.worst(threshold_outcome);

        let decision = if policy.should_ratchet {
            apply_ratchet(pre_ratchet, reference.as_ref(), delta.new_count)
        } else {
            RatchetDecision::unchanged(pre_ratchet)
        };
        if decision.triggered {
            tracing::warn!(
                build = %input.build_id,
                reference = ?reference.as_ref().map(|r| r.build_id),
                new = delta.new_count,
                "ratchet failed the build: new warnings on top of a warning-bearing baseline"
            );
        }

        let zero_warnings_since = self.zero_warnings_since(&input, reference.as_ref())?;

        Ok(ResultRecord {
            build_id: input.build_id,
            outcome: decision.outcome,
            annotations: input.annotations,
            new_count: delta.new_count,
            fixed_count: delta.fixed_count,
            reference_build: reference.map(|r| r.build_id),
            ratchet_failed: decision.triggered,
            zero_warnings_since,
        })
    }

    /// Start of the zero-warning streak ending at this build, if it is clean.
    fn zero_warnings_since(
        &self,
        input: &BuildInput,
        reference: Option<&ResultRecord>,
    ) -> Result<Option<BuildId>, HistoryError> {
        if !input.annotations.is_empty() {
            return Ok(None);
        }
        // Without the stable-only filter the reference already is the previous record.
        let previous = if self.policy.stable_only {
            find_previous(&self.history, input.build_id, self.policy.max_lookback)?
        } else {
            reference.cloned()
        };
        let since = previous
            .filter(|p| p.total_warnings() == 0)
            .map(|p| p.zero_warnings_since.unwrap_or(p.build_id))
            .unwrap_or(input.build_id);
        Ok(Some(since))
    }
}
