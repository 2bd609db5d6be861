//! Virtual CA Retrieval - Legal search and the query-resolution pipeline
//!
//! This crate implements legal snippet retrieval and the orchestrator that
//! sequences transcription, classification, retrieval, and composition.

pub mod kanoon;
pub mod legal;
pub mod pipeline;

pub use kanoon::KanoonClient;
pub use legal::{LegalInfoRetriever, LegalSourceKind};
pub use pipeline::{BackendSummary, PipelineOrchestrator};
