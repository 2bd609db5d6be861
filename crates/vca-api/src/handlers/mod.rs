mod health;
mod text;
mod voice;

pub use health::health_check;
pub use text::process_text;
pub use voice::process_voice;
