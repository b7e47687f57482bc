//! The conversation assembler.
//!
//! Per user query: record the user turn, snapshot both discovery logs,
//! assemble the ordered request (system instruction, host snapshot, device
//! snapshot, full dialogue history), dispatch, and on success record the
//! model's turn. On any failure the dialogue log is left exactly as it was
//! after the user turn — the question is kept even when no answer arrives,
//! so a later query still carries it as context.

use periscan_core::error::AgentError;
use periscan_core::turn::ChatTurn;
use periscan_core::LanguageModel;
use periscan_obslog::BoundedLog;
use std::sync::Arc;
use tracing::{debug, warn};

/// Persona and ground rules, sent as the first turn of every request.
/// The endpoint has no separate system role, so it rides as a user turn.
pub const SYSTEM_INSTRUCTION: &str = "SYSTEM: You are a tiny handheld screen that helps users \
find and understand devices around them. When you say technical things such as hex provide a \
description of what it could mean. The user is technically informed and knows what hex codes \
are. Keep things simple and under 400 characters per response. NO EMOJIS";

/// Prefix line for the host-discovery snapshot turn.
pub const HOST_SNAPSHOT_PREFIX: &str =
    "SYSTEM: Here is a scan of everything in the local network:";

/// Prefix line for the device-discovery snapshot turn.
pub const DEVICE_SNAPSHOT_PREFIX: &str =
    "SYSTEM: Here is a scan of all the named bluetooth things:";

/// Builds requests from observations and dialogue history, dispatches them,
/// and maintains the rolling dialogue log.
pub struct ConversationAssembler {
    model: Arc<dyn LanguageModel>,
    dialogue: Arc<BoundedLog<ChatTurn>>,
    hosts: Arc<BoundedLog<String>>,
    devices: Arc<BoundedLog<String>>,
    system_instruction: String,
}

impl ConversationAssembler {
    /// Create an assembler over the three logs.
    pub fn new(
        model: Arc<dyn LanguageModel>,
        dialogue: Arc<BoundedLog<ChatTurn>>,
        hosts: Arc<BoundedLog<String>>,
        devices: Arc<BoundedLog<String>>,
    ) -> Self {
        Self {
            model,
            dialogue,
            hosts,
            devices,
            system_instruction: SYSTEM_INSTRUCTION.into(),
        }
    }

    /// Override the system instruction.
    pub fn with_system_instruction(mut self, instruction: impl Into<String>) -> Self {
        self.system_instruction = instruction.into();
        self
    }

    /// The dialogue log (shared with the UI layer).
    pub fn dialogue(&self) -> Arc<BoundedLog<ChatTurn>> {
        Arc::clone(&self.dialogue)
    }

    /// Assemble the ordered request: system instruction, host snapshot,
    /// device snapshot, then the full dialogue history oldest-to-newest.
    ///
    /// Snapshots are taken log-by-log; each is atomic with respect to its
    /// own producer, and no lock is held across the dispatch await.
    fn build_request(&self) -> Vec<ChatTurn> {
        let mut turns = vec![
            ChatTurn::user(self.system_instruction.clone()),
            ChatTurn::user(self.hosts.render_snapshot(HOST_SNAPSHOT_PREFIX)),
            ChatTurn::user(self.devices.render_snapshot(DEVICE_SNAPSHOT_PREFIX)),
        ];
        self.dialogue.for_each(|t| turns.push(t.clone()));
        turns
    }

    /// Answer one user query.
    ///
    /// Blank input is rejected before any mutation. The user turn is
    /// appended first and survives a failed round trip; a model turn is
    /// appended only on success.
    pub async fn ask(&self, input: &str) -> Result<String, AgentError> {
        let input = input.trim();
        if input.is_empty() {
            return Err(AgentError::EmptyInput);
        }

        self.dialogue.push(ChatTurn::user(input));

        let request = self.build_request();
        debug!(turns = request.len(), "dispatching assembled request");

        let reply = match self.model.generate(&request).await {
            Ok(reply) => reply,
            Err(e) => {
                warn!(error = %e, "no reply from model");
                return Err(e.into());
            }
        };

        self.dialogue.push(ChatTurn::model(reply.clone()));
        Ok(reply)
    }
}
