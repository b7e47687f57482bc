//! CLI command implementations.

pub mod chat;
pub mod run;
pub mod scan;

use periscan_config::LogConfig;
use periscan_core::ChatTurn;
use periscan_obslog::BoundedLog;
use std::sync::Arc;

/// The three observation logs, built once at startup with configured
/// capacities. Each producer gets its own; they are never cross-locked.
pub struct Logs {
    pub dialogue: Arc<BoundedLog<ChatTurn>>,
    pub hosts: Arc<BoundedLog<String>>,
    pub devices: Arc<BoundedLog<String>>,
}

pub fn build_logs(config: &LogConfig) -> Logs {
    Logs {
        dialogue: Arc::new(BoundedLog::new("dialogue", config.dialogue_capacity)),
        hosts: Arc::new(BoundedLog::new("hosts", config.host_capacity)),
        devices: Arc::new(BoundedLog::new("devices", config.device_capacity)),
    }
}
