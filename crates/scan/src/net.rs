//! Network discovery sweep — bounded TCP probes across the local subnet.
//!
//! Derives the subnet base from the device's own address and netmask,
//! walks host ids 1..=max, and tries each configured port with a short
//! connect deadline. Hits become `Host: <addr> (Port <port>)` lines in the
//! host log. The sweep runs once per activation and ends when the range is
//! exhausted; per-candidate failures are skipped, and only descriptor
//! exhaustion earns a backoff-and-retry.

use periscan_obslog::BoundedLog;
use std::net::Ipv4Addr;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;
use tokio::net::TcpStream;
use tokio::time::{sleep, timeout};
use tracing::{info, warn};

const DEFAULT_PORTS: [u16; 3] = [20, 22, 80];
const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_millis(200);
const DEFAULT_MAX_HOST_ID: u8 = 255;
const EXHAUSTION_BACKOFF: Duration = Duration::from_secs(1);

/// One-shot sweep of the local subnet.
pub struct SubnetSweep {
    ip: Ipv4Addr,
    netmask: Ipv4Addr,
    ports: Vec<u16>,
    connect_timeout: Duration,
    max_host_id: u8,
    hits: Arc<BoundedLog<String>>,
    hosts_seen: Arc<AtomicU64>,
}

impl SubnetSweep {
    /// Create a sweep over the subnet containing `ip`/`netmask`, pushing
    /// hits into `hits`.
    pub fn new(ip: Ipv4Addr, netmask: Ipv4Addr, hits: Arc<BoundedLog<String>>) -> Self {
        Self {
            ip,
            netmask,
            ports: DEFAULT_PORTS.to_vec(),
            connect_timeout: DEFAULT_CONNECT_TIMEOUT,
            max_host_id: DEFAULT_MAX_HOST_ID,
            hits,
            hosts_seen: Arc::new(AtomicU64::new(0)),
        }
    }

    /// Override the probed port set.
    pub fn with_ports(mut self, ports: Vec<u16>) -> Self {
        self.ports = ports;
        self
    }

    /// Override the per-attempt connect timeout.
    pub fn with_connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = timeout;
        self
    }

    /// Override the highest host id swept.
    pub fn with_max_host_id(mut self, max: u8) -> Self {
        self.max_host_id = max;
        self
    }

    /// Handle to the running count of hits (for the UI layer).
    pub fn hosts_seen(&self) -> Arc<AtomicU64> {
        Arc::clone(&self.hosts_seen)
    }

    /// The address probed for a given host id within this sweep's subnet.
    pub fn candidate(&self, host_id: u8) -> Ipv4Addr {
        let base = u32::from(self.ip) & u32::from(self.netmask);
        Ipv4Addr::from(base | host_id as u32)
    }

    /// Run the full sweep. Ends implicitly once the range is exhausted.
    pub async fn run(self) {
        info!(ip = %self.ip, netmask = %self.netmask, "starting network sweep");

        for host_id in 1..=self.max_host_id {
            let addr = self.candidate(host_id);
            for &port in &self.ports {
                if self.probe(addr, port).await {
                    let line = format!("Host: {addr} (Port {port})");
                    info!("{line}");
                    self.hits.push(line);
                    self.hosts_seen.fetch_add(1, Ordering::Relaxed);
                }
            }
        }

        info!("network sweep finished");
    }

    /// Probe one candidate. Refusals and timeouts are a quiet `false`;
    /// descriptor exhaustion backs off and retries the candidate once.
    async fn probe(&self, addr: Ipv4Addr, port: u16) -> bool {
        for attempt in 0..2 {
            match timeout(self.connect_timeout, TcpStream::connect((addr, port))).await {
                Ok(Ok(_stream)) => return true,
                Ok(Err(e)) if attempt == 0 && is_resource_exhaustion(&e) => {
                    warn!(%addr, port, error = %e, "out of sockets, backing off");
                    sleep(EXHAUSTION_BACKOFF).await;
                }
                Ok(Err(_)) | Err(_) => return false,
            }
        }
        false
    }
}

/// EMFILE/ENFILE-class failures: the process or system is out of
/// descriptors, so the candidate deserves one retry after a pause.
fn is_resource_exhaustion(e: &std::io::Error) -> bool {
    matches!(e.raw_os_error(), Some(23) | Some(24))
        || e.kind() == std::io::ErrorKind::OutOfMemory
}
