//! Virtual CA Speech - Speech-to-text for voice queries
//!
//! Audio is staged to a temporary file for the duration of a transcription
//! and removed afterwards on every exit path.

pub mod reverie;
pub mod staging;
pub mod transcriber;

pub use reverie::ReverieClient;
pub use staging::StagedAudio;
pub use transcriber::SpeechTranscriber;
