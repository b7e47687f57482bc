//! `periscan run` — Full device mode.
//!
//! Spawns the network sweep and the radio scanner as background tasks,
//! then drops into the interactive chat loop. Scanner failures stay in
//! their own tasks; a radio listener that cannot start just leaves the
//! device log empty.

use crate::commands::{build_logs, chat};
use crate::netif;
use periscan_config::AppConfig;
use periscan_core::event::{radio_channel, RadioEvent};
use periscan_core::ScanError;
use periscan_scan::{RadioScanner, SubnetSweep};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tracing::warn;

pub async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load().map_err(|e| format!("Failed to load config: {e}"))?;
    let logs = build_logs(&config.logs);
    let assembler = chat::build_assembler(&config, &logs)?;

    // Network sweep: one pass over the local subnet, then the task ends.
    match netif::local_ipv4() {
        Ok((ip, netmask)) => {
            let sweep = SubnetSweep::new(ip, netmask, Arc::clone(&logs.hosts))
                .with_ports(config.scan.ports.clone())
                .with_connect_timeout(Duration::from_millis(config.scan.connect_timeout_ms))
                .with_max_host_id(config.scan.max_host_id);
            tokio::spawn(sweep.run());
        }
        Err(e) => warn!(error = %e, "network sweep unavailable"),
    }

    // Radio scanner: runs until its event channel closes.
    let (radio_tx, radio_rx) = radio_channel(64);
    let scanner = RadioScanner::new(Arc::clone(&logs.devices));
    tokio::spawn(scanner.run(radio_rx));
    if let Err(e) = start_radio_listener(radio_tx) {
        // Reported and left idle — never fatal.
        warn!(error = %e, "radio listener failed to start");
    }

    chat::interactive_loop(&assembler).await
}

/// Hook the platform radio stack up to the event channel.
///
/// The device build wires the BLE host stack's discovery callback to
/// `tx` here; desktop builds have no radio and report that instead.
fn start_radio_listener(_tx: mpsc::Sender<RadioEvent>) -> Result<(), ScanError> {
    Err(ScanError::ListenerStart(
        "no radio host stack on this platform".into(),
    ))
}
