//! Error types for the Periscan domain.
//!
//! Uses `thiserror` for ergonomic error definitions.
//! Each bounded context has its own error variant. Nothing here is
//! process-fatal: scanners skip failed candidates, the assembler reports
//! "no reply" and leaves dialogue history intact.

use thiserror::Error;

/// The top-level error type for all Periscan operations.
#[derive(Debug, Error)]
pub enum Error {
    // --- Provider errors ---
    #[error("Provider error: {0}")]
    Provider(#[from] ProviderError),

    // --- Scanner errors ---
    #[error("Scan error: {0}")]
    Scan(#[from] ScanError),

    // --- Assembler errors ---
    #[error("Agent error: {0}")]
    Agent(#[from] AgentError),

    // --- Configuration errors ---
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    // --- Serialization ---
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    // --- Generic ---
    #[error("Internal error: {0}")]
    Internal(String),
}

/// Result type alias using our Error.
pub type Result<T> = std::result::Result<T, Error>;

// --- Bounded context errors ---

#[derive(Debug, Clone, Error)]
pub enum ProviderError {
    #[error("API request failed: {message} (status: {status_code})")]
    ApiError { status_code: u16, message: String },

    #[error("Rate limited by provider, retry after {retry_after_secs}s")]
    RateLimited { retry_after_secs: u64 },

    #[error("Authentication failed: {0}")]
    AuthenticationFailed(String),

    #[error("Malformed reply: {0}")]
    MalformedReply(String),

    #[error("Provider not configured: {0}")]
    NotConfigured(String),

    #[error("Network error: {0}")]
    Network(String),
}

#[derive(Debug, Error)]
pub enum ScanError {
    #[error("Listener failed to start: {0}")]
    ListenerStart(String),

    #[error("Address type resolution failed: {0}")]
    AddressType(String),

    #[error("No usable network interface: {0}")]
    NoInterface(String),
}

#[derive(Debug, Error)]
pub enum AgentError {
    #[error("Empty input rejected")]
    EmptyInput,

    #[error("No reply available: {0}")]
    NoReply(#[from] ProviderError),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {reason}")]
    Io { path: String, reason: String },

    #[error("Failed to parse config: {0}")]
    Parse(String),

    #[error("Missing API key — set `api_key` in config.toml or GEMINI_API_KEY")]
    MissingApiKey,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn provider_error_displays_correctly() {
        let err = Error::Provider(ProviderError::ApiError {
            status_code: 429,
            message: "Too many requests".into(),
        });
        assert!(err.to_string().contains("429"));
        assert!(err.to_string().contains("Too many requests"));
    }

    #[test]
    fn agent_error_wraps_provider_error() {
        let err = AgentError::from(ProviderError::MalformedReply("no candidates".into()));
        assert!(err.to_string().contains("No reply available"));
        assert!(err.to_string().contains("no candidates"));
    }

    #[test]
    fn config_error_names_both_sources() {
        let err = ConfigError::MissingApiKey;
        assert!(err.to_string().contains("GEMINI_API_KEY"));
    }
}
