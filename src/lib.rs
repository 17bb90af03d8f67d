// 公开内部模块以便测试
pub mod ai;
pub mod bot;
pub mod config;
pub mod error;
pub mod feed;
pub mod ledger;
pub mod parser;
pub mod session;
pub mod utils;

// 重新导出常用的类型和结构体
pub use ai::{Companion, GeminiClient, GenerativeClient};
pub use bot::{Commands, MessageHandler};
pub use config::Settings;
pub use error::DebtBreakerError;
pub use ledger::DebtLedger;
pub use parser::MessageParser;
pub use session::SessionStore;
