//! Port trait definitions
//!
//! These traits define the interfaces that backend adapters must implement.
//! A backend that is not configured is represented by its absence (`None`),
//! never by a stub implementation.

pub mod chat;
pub mod legal;
pub mod speech;

use std::future::Future;
use std::time::Duration;

use crate::error::{Result, VcaError};

pub use chat::{ChatBackend, ChatRequest};
pub use legal::{LegalDocument, LegalSearchBackend, LegalSearchRequest, SortOrder};
pub use speech::{SpeechBackend, SpeechRequest};

/// Default bound on a single outbound backend call
pub const DEFAULT_CALL_TIMEOUT: Duration = Duration::from_secs(20);

/// Run a backend call, treating an elapsed `limit` as a failure
pub async fn bounded<T, F>(backend: &str, limit: Duration, call: F) -> Result<T>
where
    F: Future<Output = Result<T>>,
{
    match tokio::time::timeout(limit, call).await {
        Ok(result) => result,
        Err(_) => Err(VcaError::Timeout {
            backend: backend.to_string(),
            seconds: limit.as_secs(),
        }),
    }
}
