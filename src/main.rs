use std::sync::Arc;

use anyhow::Result;
use dotenv::dotenv;
use log::info;

use debtbreaker::ai::{Companion, GeminiClient};
use debtbreaker::bot::{start_bot, MessageHandler};
use debtbreaker::config::Settings;
use debtbreaker::session::SessionStore;
use debtbreaker::utils::Logger;

#[tokio::main]
async fn main() -> Result<()> {
    // 加载环境变量
    dotenv().ok();

    // 初始化日志
    env_logger::init();

    Logger::log_operation_start("DebtBreaker", "Initializing application");

    // 加载配置
    let settings = match Settings::new() {
        Ok(s) => {
            Logger::log_operation_success("Configuration", "Settings loaded successfully");
            s
        }
        Err(e) => {
            Logger::log_operation_failure("Configuration", &e.to_string());
            return Err(e);
        }
    };

    // 验证配置
    if let Err(e) = settings.validate() {
        Logger::log_operation_failure("Configuration validation", &e.to_string());
        return Err(e);
    }

    // 初始化 AI 客户端
    let client = match GeminiClient::new(&settings) {
        Ok(client) => {
            Logger::log_operation_success("GeminiClient", "HTTP client initialized successfully");
            client
        }
        Err(e) => {
            Logger::log_operation_failure("GeminiClient", &e.to_string());
            return Err(e.into());
        }
    };
    let companion = Companion::new(Arc::new(client));

    // 会话只保存在内存中
    let store = SessionStore::new();
    let message_handler = MessageHandler::new(store, companion);
    Logger::log_operation_success("MessageHandler", "Handler initialized successfully");

    info!("🤖 DebtBreaker initialized successfully!");
    info!("📊 Configuration:");
    info!("  - Bot Name: {}", settings.bot_name);
    info!("  - Gemini API Key: {}", if settings.gemini_api_key.is_some() { "set" } else { "missing (fallback only)" });
    info!("  - Text Model: {}", settings.text_model);
    info!("  - Speech Model: {} ({})", settings.speech_model, settings.voice_name);
    info!("  - AI Request Timeout: {}s", settings.ai_request_timeout);

    start_bot(&settings.telegram_bot_token, message_handler).await
}
