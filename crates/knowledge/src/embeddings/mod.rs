//! Query embedding providers.
//!
//! The evidence index is built offline; at query time only the question
//! needs embedding, with the same model the index was built with.

pub mod provider;
pub mod providers;

pub use provider::{create_provider, EmbeddingProvider};
pub use providers::{mock::MockProvider, ollama::OllamaProvider};
