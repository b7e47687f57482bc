//! Radio discovery scanner — consumes advertisement events, logs summaries.
//!
//! The scanner owns the receiving end of the radio event channel and runs
//! until the stack side closes it. Every frame with a name or at least one
//! 16-bit service UUID becomes one line in the device log; everything else
//! is dropped silently.

use crate::adv;
use periscan_core::RadioEvent;
use periscan_obslog::BoundedLog;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::sync::mpsc;
use tracing::{debug, info};

/// Continuous passive listener over the typed radio event channel.
pub struct RadioScanner {
    devices: Arc<BoundedLog<String>>,
    devices_seen: Arc<AtomicU64>,
}

impl RadioScanner {
    /// Create a scanner that pushes summaries into `devices`.
    pub fn new(devices: Arc<BoundedLog<String>>) -> Self {
        Self {
            devices,
            devices_seen: Arc::new(AtomicU64::new(0)),
        }
    }

    /// Handle to the running count of logged devices (for the UI layer).
    pub fn devices_seen(&self) -> Arc<AtomicU64> {
        Arc::clone(&self.devices_seen)
    }

    /// Consume events until the channel closes.
    ///
    /// Malformed payloads and frames without a name or UUID are skipped;
    /// nothing here can fail the task.
    pub async fn run(self, mut events: mpsc::Receiver<RadioEvent>) {
        info!("radio scanner listening");

        while let Some(event) = events.recv().await {
            match event {
                RadioEvent::Advertisement {
                    addr,
                    addr_type,
                    rssi,
                    data,
                } => {
                    if let Some(line) = adv::summarize(&addr, addr_type, rssi, &data) {
                        info!("{line}");
                        self.devices.push(line);
                        self.devices_seen.fetch_add(1, Ordering::Relaxed);
                    }
                }
                RadioEvent::ScanComplete { reason } => {
                    info!(reason, "scan complete");
                }
            }
        }

        debug!("radio event channel closed, scanner idle");
    }
}
