//! # Periscan Scanners
//!
//! The two discovery producers:
//! - [`net::SubnetSweep`] — one-shot sweep of the local subnet, probing a
//!   small port set with bounded-time TCP connects.
//! - [`radio::RadioScanner`] — continuous consumer of BLE advertisement
//!   events, parsing tagged fields out of raw payloads.
//!
//! Both push rendered one-line summaries into their own `BoundedLog`;
//! neither retains structured records. Scanner failures never propagate
//! past the scanner's own task.

pub mod adv;
pub mod net;
pub mod radio;

pub use net::SubnetSweep;
pub use radio::RadioScanner;
