//! SQLite persistence for Warnline build results.
//!
//! `SqliteHistory` is the persistence collaborator of the engine: it serves
//! prior records through `BuildHistory` and stores finalized records through
//! `ResultSink`. Each record and its warnings are written in one transaction.

pub mod connection;
pub mod history;
pub mod migrations;
pub mod queries;

pub use connection::DatabaseManager;
pub use history::SqliteHistory;
