//! The set of warnings reported for one build.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::warning::{Severity, Warning};

/// All warnings of one build. Order carries no meaning except as the
/// tie-break when several warnings share an identity key.
///
/// Built once from parser output; there is no API to add or remove warnings
/// afterwards.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AnnotationSet {
    warnings: Vec<Warning>,
}

impl AnnotationSet {
    pub fn new(warnings: Vec<Warning>) -> Self {
        Self { warnings }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    /// Total number of warnings.
    pub fn len(&self) -> usize {
        self.warnings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.warnings.is_empty()
    }

    pub fn warnings(&self) -> &[Warning] {
        &self.warnings
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Warning> {
        self.warnings.iter()
    }

    /// Warning count per module. Warnings without a module are not counted.
    pub fn count_by_module(&self) -> BTreeMap<String, usize> {
        count_by(&self.warnings, |w| &w.module)
    }

    /// Warning count per category. Warnings without a category are not counted.
    pub fn count_by_category(&self) -> BTreeMap<String, usize> {
        count_by(&self.warnings, |w| &w.category)
    }

    pub fn count_by_severity(&self) -> BTreeMap<Severity, usize> {
        let mut counts = BTreeMap::new();
        for w in &self.warnings {
            *counts.entry(w.severity).or_insert(0) += 1;
        }
        counts
    }

    pub fn count_of(&self, severity: Severity) -> usize {
        self.warnings.iter().filter(|w| w.severity == severity).count()
    }

    /// Number of distinct modules that carry at least one warning.
    pub fn module_count(&self) -> usize {
        self.count_by_module().len()
    }
}

fn count_by<F>(warnings: &[Warning], field: F) -> BTreeMap<String, usize>
where
    F: Fn(&Warning) -> &String,
{
    let mut counts = BTreeMap::new();
    for w in warnings {
        let name = field(w);
        if name.is_empty() {
            continue;
        }
        *counts.entry(name.clone()).or_insert(0) += 1;
    }
    counts
}

impl FromIterator<Warning> for AnnotationSet {
    fn from_iter<I: IntoIterator<Item = Warning>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a AnnotationSet {
    type Item = &'a Warning;
    type IntoIter = std::slice::Iter<'a, Warning>;

    fn into_iter(self) -> Self::IntoIter {
        self.warnings.iter()
    }
}
