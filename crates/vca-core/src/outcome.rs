//! Tagged stage results
//!
//! Every pipeline component returns a [`StageOutcome`]: the value is always
//! present, the tag records whether a live backend produced it, whether the
//! backend was unconfigured, or whether a runtime failure was recovered.

use serde::Serialize;
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StageOutcome<T> {
    /// Produced by the configured backend
    Live(T),

    /// Backend not configured; deterministic degraded value
    Unconfigured(T),

    /// Backend failed at runtime; fallback value with the underlying cause
    Recovered { value: T, cause: String },
}

impl<T> StageOutcome<T> {
    pub fn recovered(value: T, cause: impl ToString) -> Self {
        Self::Recovered {
            value,
            cause: cause.to_string(),
        }
    }

    pub fn value(&self) -> &T {
        match self {
            Self::Live(value) | Self::Unconfigured(value) => value,
            Self::Recovered { value, .. } => value,
        }
    }

    pub fn into_value(self) -> T {
        match self {
            Self::Live(value) | Self::Unconfigured(value) => value,
            Self::Recovered { value, .. } => value,
        }
    }

    pub fn status(&self) -> StageStatus {
        match self {
            Self::Live(_) => StageStatus::Live,
            Self::Unconfigured(_) => StageStatus::Unconfigured,
            Self::Recovered { .. } => StageStatus::Recovered,
        }
    }

    pub fn cause(&self) -> Option<&str> {
        match self {
            Self::Recovered { cause, .. } => Some(cause),
            _ => None,
        }
    }

    /// Split into a report for `stage` and the carried value
    pub fn report(self, stage: Stage) -> (StageReport, T) {
        let report = StageReport {
            stage,
            status: self.status(),
            cause: self.cause().map(str::to_string),
        };
        (report, self.into_value())
    }
}

/// Pipeline stage names, in execution order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Stage {
    Transcribe,
    Classify,
    Retrieve,
    Compose,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Stage::Transcribe => "transcribe",
            Stage::Classify => "classify",
            Stage::Retrieve => "retrieve",
            Stage::Compose => "compose",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum StageStatus {
    Live,
    Unconfigured,
    Recovered,
}

impl StageStatus {
    pub fn is_live(&self) -> bool {
        matches!(self, StageStatus::Live)
    }
}

impl fmt::Display for StageStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            StageStatus::Live => "live",
            StageStatus::Unconfigured => "unconfigured",
            StageStatus::Recovered => "recovered",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StageReport {
    pub stage: Stage,
    pub status: StageStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cause: Option<String>,
}
