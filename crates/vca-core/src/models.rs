pub mod analysis;
pub mod answer;
pub mod audio;
pub mod query;

pub use analysis::Analysis;
pub use answer::Answer;
pub use audio::{AudioClip, AudioEncoding};
pub use query::{Language, Query, VoiceQuery};
