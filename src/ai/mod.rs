pub mod audio;
pub mod companion;
pub mod gemini;
pub mod traits;

pub use audio::PcmAudio;
pub use companion::{Companion, Generated, Mood, Speech};
pub use gemini::GeminiClient;
pub use traits::GenerativeClient;
