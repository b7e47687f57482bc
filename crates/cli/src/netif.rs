//! Local interface discovery — boot-time glue, not core behavior.

use periscan_core::ScanError;
use std::net::{IpAddr, Ipv4Addr, UdpSocket};

/// Determine the local IPv4 address and a netmask for the sweep.
///
/// The device firmware reads both straight off the network interface;
/// plain sockets expose only the address (via a routed-but-unsent UDP
/// connect), so a /24 netmask is assumed — the common case for the home
/// and lab networks this device roams.
pub fn local_ipv4() -> Result<(Ipv4Addr, Ipv4Addr), ScanError> {
    let socket = UdpSocket::bind(("0.0.0.0", 0))
        .map_err(|e| ScanError::NoInterface(e.to_string()))?;
    socket
        .connect(("8.8.8.8", 53))
        .map_err(|e| ScanError::NoInterface(e.to_string()))?;
    let addr = socket
        .local_addr()
        .map_err(|e| ScanError::NoInterface(e.to_string()))?;

    match addr.ip() {
        IpAddr::V4(ip) => Ok((ip, Ipv4Addr::new(255, 255, 255, 0))),
        IpAddr::V6(_) => Err(ScanError::NoInterface("no IPv4 address".into())),
    }
}
