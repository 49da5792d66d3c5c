//! A single analysis finding and its cross-build identity key.

use serde::{Deserialize, Serialize};
use xxhash_rust::xxh3::xxh3_64;

/// Priority assigned by the analysis tool.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    High,
    #[default]
    Normal,
    Low,
}

impl Severity {
    pub fn as_str(self) -> &'static str {
        match self {
            Severity::High => "high",
            Severity::Normal => "normal",
            Severity::Low => "low",
        }
    }

    pub fn parse(s: &str) -> Option<Severity> {
        match s {
            "high" => Some(Severity::High),
            "normal" => Some(Severity::Normal),
            "low" => Some(Severity::Low),
            _ => None,
        }
    }
}

/// One warning reported by the parser collaborator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Warning {
    pub file: String,
    pub start_line: u32,
    pub end_line: u32,
    pub message: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub module: String,
    #[serde(default)]
    pub severity: Severity,
}

impl Warning {
    /// A warning spanning `start_line..=end_line` with normal severity and no
    /// category or module.
    pub fn new(
        file: impl Into<String>,
        start_line: u32,
        end_line: u32,
        message: impl Into<String>,
    ) -> Self {
        Self {
            file: file.into(),
            start_line,
            end_line,
            message: message.into(),
            category: String::new(),
            module: String::new(),
            severity: Severity::Normal,
        }
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = category.into();
        self
    }

    pub fn with_module(mut self, module: impl Into<String>) -> Self {
        self.module = module.into();
        self
    }

    pub fn with_severity(mut self, severity: Severity) -> Self {
        self.severity = severity;
        self
    }

    /// Identity key used to match this warning across builds.
    ///
    /// Returns `None` when the file or the message is blank: such a warning
    /// never matches anything and is always counted as new (or fixed).
    pub fn key(&self) -> Option<WarningKey<'_>> {
        if self.file.trim().is_empty() || self.message.trim().is_empty() {
            return None;
        }
        Some(WarningKey {
            file: &self.file,
            start_line: self.start_line,
            end_line: self.end_line,
            message: &self.message,
            category: &self.category,
        })
    }
}

/// `(file, line range, message, category)`. Severity and module are not part
/// of the identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct WarningKey<'a> {
    pub file: &'a str,
    pub start_line: u32,
    pub end_line: u32,
    pub message: &'a str,
    pub category: &'a str,
}

impl WarningKey<'_> {
    /// Stable 64-bit fingerprint of the key fields.
    ///
    /// String fields are length-prefixed, so distinct keys never share an
    /// encoding whatever bytes their fields contain.
    pub fn fingerprint(&self) -> u64 {
        let mut buf = Vec::with_capacity(
            self.file.len() + self.message.len() + self.category.len() + 32,
        );
        push_field(&mut buf, self.file);
        buf.extend_from_slice(&self.start_line.to_le_bytes());
        buf.extend_from_slice(&self.end_line.to_le_bytes());
        push_field(&mut buf, self.message);
        push_field(&mut buf, self.category);
        xxh3_64(&buf)
    }
}

fn push_field(buf: &mut Vec<u8>, field: &str) {
    buf.extend_from_slice(&(field.len() as u64).to_le_bytes());
    buf.extend_from_slice(field.as_bytes());
}
