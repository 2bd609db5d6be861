use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use crate::outcome::StageReport;

/// Terminal artifact of a resolved pipeline run
#[derive(Debug, Clone, Serialize)]
pub struct Answer {
    /// Identifier correlating the log lines of one run
    pub request_id: Uuid,

    /// Transcript of the spoken query (voice path only)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transcription: Option<String>,

    /// Final localized answer
    pub response: String,

    /// How each stage resolved, in execution order
    pub stages: Vec<StageReport>,

    pub resolved_at: DateTime<Utc>,
}

impl Answer {
    /// True when every stage was answered by its live backend
    pub fn fully_live(&self) -> bool {
        self.stages.iter().all(|report| report.status.is_live())
    }
}
