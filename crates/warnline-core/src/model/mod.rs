//! Data model shared by the engine and the persistence layer.

pub mod annotations;
pub mod build;
pub mod chain;
pub mod record;
pub mod warning;

pub use annotations::AnnotationSet;
pub use build::{BuildId, Outcome};
pub use chain::HistoryChain;
pub use record::{HistoryEntry, ResultRecord};
pub use warning::{Severity, Warning, WarningKey};
