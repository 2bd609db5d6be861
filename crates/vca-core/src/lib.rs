//! Virtual CA Core - Domain models, configuration, and backend ports
//!
//! This crate contains the query-resolution data model, the localization
//! catalog, layered configuration, and the port traits that backend adapters
//! implement.

pub mod config;
pub mod error;
pub mod i18n;
pub mod models;
pub mod outcome;
pub mod ports;

pub use error::{Rejection, Result, VcaError};
pub use i18n::{message, MessageId};
pub use models::{Analysis, Answer, AudioClip, AudioEncoding, Language, Query, VoiceQuery};
pub use outcome::{Stage, StageOutcome, StageReport, StageStatus};
