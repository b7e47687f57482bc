//! LanguageModel trait — the abstraction over the remote model backend.
//!
//! A LanguageModel knows how to send an ordered turn sequence to a remote
//! endpoint and return the reply text. The assembler calls `generate()`
//! without knowing which backend is wired in — pure polymorphism, and the
//! seam where tests substitute a stub.

use crate::error::ProviderError;
use crate::turn::ChatTurn;
use async_trait::async_trait;

/// The remote language-model boundary.
///
/// The one real implementation is the Gemini client in `periscan-providers`;
/// tests use in-process stubs.
#[async_trait]
pub trait LanguageModel: Send + Sync {
    /// A human-readable name for this backend (e.g., "gemini").
    fn name(&self) -> &str;

    /// Send the ordered turn sequence as one request and return the reply
    /// text. May block for the duration of the remote round trip; the only
    /// deadline is the transport's own timeout.
    async fn generate(&self, turns: &[ChatTurn]) -> std::result::Result<String, ProviderError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Parrot;

    #[async_trait]
    impl LanguageModel for Parrot {
        fn name(&self) -> &str {
            "parrot"
        }

        async fn generate(
            &self,
            turns: &[ChatTurn],
        ) -> std::result::Result<String, ProviderError> {
            turns
                .last()
                .map(|t| t.text.clone())
                .ok_or_else(|| ProviderError::MalformedReply("empty request".into()))
        }
    }

    #[tokio::test]
    async fn trait_object_dispatch() {
        let model: Box<dyn LanguageModel> = Box::new(Parrot);
        assert_eq!(model.name(), "parrot");
        let reply = model.generate(&[ChatTurn::user("echo")]).await.unwrap();
        assert_eq!(reply, "echo");
    }

    #[tokio::test]
    async fn empty_request_is_an_error() {
        let model = Parrot;
        assert!(model.generate(&[]).await.is_err());
    }
}
