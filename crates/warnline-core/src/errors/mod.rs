//! Error handling for Warnline.
//! One error enum per subsystem, `thiserror` only, zero `anyhow`.

pub mod assembly_error;
pub mod config_error;
pub mod error_code;
pub mod history_error;
pub mod storage_error;

pub use assembly_error::AssemblyError;
pub use config_error::ConfigError;
pub use error_code::WarnlineErrorCode;
pub use history_error::HistoryError;
pub use storage_error::StorageError;
