pub mod message;
pub mod regex;

pub use message::{MessageParser, ParsedMessage};
pub use regex::RegexPatterns;
