//! # Periscan Agent
//!
//! The conversation assembler: turns accumulated observations into one
//! bounded request to the remote model and folds the reply back into
//! dialogue history.

pub mod assembler;

pub use assembler::{
    ConversationAssembler, DEVICE_SNAPSHOT_PREFIX, HOST_SNAPSHOT_PREFIX, SYSTEM_INSTRUCTION,
};
