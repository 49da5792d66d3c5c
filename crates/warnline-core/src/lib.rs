//! Core types, collaborator traits, errors, config, and logging for the
//! Warnline regression gate.
//!
//! The engine (`warnline-engine`) and the SQLite store (`warnline-storage`)
//! both build on the types defined here. Nothing in this crate performs
//! history walks or gate decisions.

pub mod config;
pub mod errors;
pub mod logging;
pub mod model;
pub mod traits;

pub use model::{
    AnnotationSet, BuildId, HistoryEntry, Outcome, ResultRecord, Severity, Warning, WarningKey,
};
