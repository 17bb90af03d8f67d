use std::env;
use anyhow::{Result, anyhow};

pub const DEFAULT_GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com";
pub const DEFAULT_TEXT_MODEL: &str = "gemini-3-flash-preview";
pub const DEFAULT_SPEECH_MODEL: &str = "gemini-2.5-flash-preview-tts";
pub const DEFAULT_VOICE: &str = "Kore";

#[derive(Debug, Clone)]
pub struct Settings {
    pub telegram_bot_token: String,
    pub bot_name: String,
    pub gemini_api_key: Option<String>,
    pub gemini_base_url: String,
    pub text_model: String,
    pub speech_model: String,
    pub voice_name: String,
    pub ai_request_timeout: u64,
    pub log_level: String,
}

impl Settings {
    pub fn new() -> Result<Self> {
        let telegram_bot_token = env::var("TELEGRAM_BOT_TOKEN")
            .map_err(|_| anyhow!("TELEGRAM_BOT_TOKEN must be set"))?;

        let bot_name = env::var("BOT_NAME")
            .unwrap_or_else(|_| "DebtBreaker".to_string());

        // 没有 key 时所有 AI 调用都会走兜底文案
        let gemini_api_key = env::var("GEMINI_API_KEY")
            .ok()
            .filter(|key| !key.trim().is_empty());

        let gemini_base_url = env::var("GEMINI_BASE_URL")
            .unwrap_or_else(|_| DEFAULT_GEMINI_BASE_URL.to_string());

        let text_model = env::var("GEMINI_TEXT_MODEL")
            .unwrap_or_else(|_| DEFAULT_TEXT_MODEL.to_string());

        let speech_model = env::var("GEMINI_SPEECH_MODEL")
            .unwrap_or_else(|_| DEFAULT_SPEECH_MODEL.to_string());

        let voice_name = env::var("GEMINI_VOICE")
            .unwrap_or_else(|_| DEFAULT_VOICE.to_string());

        let ai_request_timeout = env::var("AI_REQUEST_TIMEOUT")
            .unwrap_or_else(|_| "30".to_string())
            .parse::<u64>()
            .unwrap_or(30);

        let log_level = env::var("RUST_LOG")
            .unwrap_or_else(|_| "info".to_string());

        Ok(Settings {
            telegram_bot_token,
            bot_name,
            gemini_api_key,
            gemini_base_url,
            text_model,
            speech_model,
            voice_name,
            ai_request_timeout,
            log_level,
        })
    }

    pub fn validate(&self) -> Result<()> {
        if self.telegram_bot_token.is_empty() {
            return Err(anyhow!("Telegram bot token cannot be empty"));
        }

        if self.gemini_base_url.is_empty() {
            return Err(anyhow!("Gemini base URL cannot be empty"));
        }

        if self.text_model.is_empty() || self.speech_model.is_empty() {
            return Err(anyhow!("Gemini model names cannot be empty"));
        }

        if self.ai_request_timeout == 0 {
            return Err(anyhow!("AI request timeout must be greater than 0"));
        }

        Ok(())
    }
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            telegram_bot_token: String::new(),
            bot_name: "DebtBreaker".to_string(),
            gemini_api_key: None,
            gemini_base_url: DEFAULT_GEMINI_BASE_URL.to_string(),
            text_model: DEFAULT_TEXT_MODEL.to_string(),
            speech_model: DEFAULT_SPEECH_MODEL.to_string(),
            voice_name: DEFAULT_VOICE.to_string(),
            ai_request_timeout: 30,
            log_level: "info".to_string(),
        }
    }
}
