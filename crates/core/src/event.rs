//! Radio-stack events — the typed boundary to the BLE host layer.
//!
//! The underlying radio stack (NimBLE on the device, a stub in tests)
//! delivers discovery callbacks. Rather than coupling the scanner to any
//! particular registration mechanism, the stack side sends `RadioEvent`s
//! down an mpsc channel and the scanner consumes them.

use tokio::sync::mpsc;

/// Length of a raw BLE device address in bytes.
pub const RADIO_ADDR_LEN: usize = 6;

/// An event emitted by the radio stack during a passive scan.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RadioEvent {
    /// A broadcast advertisement frame was received.
    Advertisement {
        /// Raw device address, least-significant byte first (BLE order).
        addr: [u8; RADIO_ADDR_LEN],
        /// Address type as reported by the stack (public, random, ...).
        addr_type: u8,
        /// Received signal strength in dBm.
        rssi: i8,
        /// The raw variable-length advertisement payload.
        data: Vec<u8>,
    },

    /// The stack ended the scan; carries the stack's reason code.
    /// Logged but otherwise unacted upon.
    ScanComplete { reason: i32 },
}

/// Create a bounded channel for radio events.
///
/// The stack side keeps the `Sender`; the scanner owns the `Receiver`.
pub fn radio_channel(capacity: usize) -> (mpsc::Sender<RadioEvent>, mpsc::Receiver<RadioEvent>) {
    mpsc::channel(capacity)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn events_arrive_in_order() {
        let (tx, mut rx) = radio_channel(8);

        tx.send(RadioEvent::Advertisement {
            addr: [1, 2, 3, 4, 5, 6],
            addr_type: 0,
            rssi: -40,
            data: vec![2, 0x09, b'x'],
        })
        .await
        .unwrap();
        tx.send(RadioEvent::ScanComplete { reason: 0 }).await.unwrap();
        drop(tx);

        assert!(matches!(
            rx.recv().await,
            Some(RadioEvent::Advertisement { rssi: -40, .. })
        ));
        assert_eq!(rx.recv().await, Some(RadioEvent::ScanComplete { reason: 0 }));
        assert_eq!(rx.recv().await, None);
    }
}
