mod request;
mod response;

pub use request::TextQueryRequest;
pub use response::{HealthResponse, TextQueryResponse, VoiceQueryResponse};
