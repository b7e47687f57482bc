//! `periscan scan` — One network sweep, then print the snapshot.

use crate::commands::build_logs;
use crate::netif;
use periscan_agent::HOST_SNAPSHOT_PREFIX;
use periscan_config::AppConfig;
use periscan_scan::SubnetSweep;
use std::sync::Arc;
use std::sync::atomic::Ordering;
use std::time::Duration;

pub async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load().map_err(|e| format!("Failed to load config: {e}"))?;
    let logs = build_logs(&config.logs);

    let (ip, netmask) = netif::local_ipv4()?;
    let sweep = SubnetSweep::new(ip, netmask, Arc::clone(&logs.hosts))
        .with_ports(config.scan.ports.clone())
        .with_connect_timeout(Duration::from_millis(config.scan.connect_timeout_ms))
        .with_max_host_id(config.scan.max_host_id);
    let seen = sweep.hosts_seen();

    sweep.run().await;

    println!("{}", logs.hosts.render_snapshot(HOST_SNAPSHOT_PREFIX));
    println!();
    println!("Scanned: {}", seen.load(Ordering::Relaxed));

    Ok(())
}
