//! Row-level queries, one module per table.

pub mod build_results;
pub mod warnings;
