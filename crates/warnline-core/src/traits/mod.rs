//! Collaborator seams between the engine and persistence.

pub mod history;
pub mod sink;

pub use history::BuildHistory;
pub use sink::ResultSink;
