//! Virtual CA LLM - Query classification and answer generation
//!
//! This crate holds the chat-completion adapter and the two pipeline
//! components that talk to it.

pub mod classifier;
pub mod composer;
pub mod groq;
pub mod prompts;

// Re-export main types
pub use classifier::QueryClassifier;
pub use composer::ResponseComposer;
pub use groq::GroqClient;
