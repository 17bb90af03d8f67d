pub mod commands;
pub mod dispatcher;
pub mod handler;
pub mod traits;
pub mod views;

pub use commands::Commands;
pub use dispatcher::{start_bot, Command};
pub use handler::MessageHandler;
pub use traits::BotApi;
