//! # Periscan Core
//!
//! Domain types, traits, and error definitions for the Periscan ambient
//! scanner. This crate has **zero framework dependencies** — it defines the
//! domain model that all other crates implement against.
//!
//! ## Design Philosophy
//!
//! The seams of the system are defined as traits and typed events here.
//! Implementations live in their respective crates:
//! - `LanguageModel` — the remote model boundary (`periscan-providers`)
//! - `RadioEvent` — the radio-stack boundary (`periscan-scan`)
//!
//! This keeps the dependency graph clean (all crates depend inward on core)
//! and lets the assembler and scanners be tested with stubs.

pub mod error;
pub mod event;
pub mod model;
pub mod turn;

// Re-export key types at crate root for ergonomics
pub use error::{AgentError, ConfigError, Error, ProviderError, Result, ScanError};
pub use event::RadioEvent;
pub use model::LanguageModel;
pub use turn::{ChatTurn, Role};
