//! # Periscan Providers
//!
//! Implementations of the core `LanguageModel` trait. The only shipping
//! backend is Gemini's `generateContent` endpoint; the trait seam keeps
//! the assembler testable with stubs.

pub mod gemini;

pub use gemini::GeminiClient;
