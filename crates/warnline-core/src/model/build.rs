//! Build identifiers and build outcomes.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Sequence number of a build within one pipeline.
///
/// Totally ordered; later builds have larger ids.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct BuildId(pub u64);

impl BuildId {
    pub fn get(self) -> u64 {
        self.0
    }
}

impl From<u64> for BuildId {
    fn from(value: u64) -> Self {
        Self(value)
    }
}

impl fmt::Display for BuildId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Overall status of a build, ordered by severity:
/// `Success < Unstable < Failure`.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Outcome {
    Success,
    Unstable,
    Failure,
}

impl Outcome {
    pub fn is_success(self) -> bool {
        self == Outcome::Success
    }

    /// The more severe of the two outcomes.
    pub fn worst(self, other: Outcome) -> Outcome {
        self.max(other)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Outcome::Success => "success",
            Outcome::Unstable => "unstable",
            Outcome::Failure => "failure",
        }
    }

    pub fn parse(s: &str) -> Option<Outcome> {
        match s {
            "success" => Some(Outcome::Success),
            "unstable" => Some(Outcome::Unstable),
            "failure" => Some(Outcome::Failure),
            _ => None,
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
