//! Configuration system for Warnline.
//! TOML-based, layered resolution: CLI > env > project > user > defaults.

pub mod gate_config;
pub mod storage_config;
pub mod threshold_config;
pub mod warnline_config;

pub use gate_config::GateConfig;
pub use storage_config::StorageConfig;
pub use threshold_config::ThresholdConfig;
pub use warnline_config::{CliOverrides, WarnlineConfig};
