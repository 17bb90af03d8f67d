use teloxide::RequestError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DebtBreakerError {
    #[error("Configuration error: {0}")]
    Config(#[from] anyhow::Error),

    #[error("Telegram API error: {0}")]
    Telegram(#[from] RequestError),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Audio decode error: {0}")]
    AudioDecode(#[from] base64::DecodeError),

    #[error("Generation error: {message}")]
    Generation { message: String },

    #[error("Invalid command: {message}")]
    InvalidCommand { message: String },

    #[error("Invalid debt category: {tag}")]
    InvalidCategory { tag: String },

    #[error("Debt not found: {id}")]
    DebtNotFound { id: String },

    #[error("Spark not found: {id}")]
    SparkNotFound { id: String },

    #[error("Empty content: {field}")]
    EmptyContent { field: String },
}

pub type Result<T> = std::result::Result<T, DebtBreakerError>;

impl DebtBreakerError {
    pub fn generation_error(message: impl Into<String>) -> Self {
        Self::Generation {
            message: message.into(),
        }
    }

    pub fn invalid_command(message: impl Into<String>) -> Self {
        Self::InvalidCommand {
            message: message.into(),
        }
    }

    pub fn invalid_category(tag: impl Into<String>) -> Self {
        Self::InvalidCategory { tag: tag.into() }
    }

    pub fn debt_not_found(id: impl Into<String>) -> Self {
        Self::DebtNotFound { id: id.into() }
    }

    pub fn spark_not_found(id: impl Into<String>) -> Self {
        Self::SparkNotFound { id: id.into() }
    }

    pub fn empty_content(field: impl Into<String>) -> Self {
        Self::EmptyContent {
            field: field.into(),
        }
    }

    /// 远端 AI 调用失败，调用方会用兜底内容代替
    pub fn is_remote(&self) -> bool {
        matches!(
            self,
            DebtBreakerError::Http(_)
                | DebtBreakerError::Generation { .. }
                | DebtBreakerError::AudioDecode(_)
        )
    }

    /// 用户输入错误，需要回复给用户
    pub fn is_user_facing(&self) -> bool {
        matches!(
            self,
            DebtBreakerError::InvalidCommand { .. }
                | DebtBreakerError::InvalidCategory { .. }
                | DebtBreakerError::DebtNotFound { .. }
                | DebtBreakerError::SparkNotFound { .. }
                | DebtBreakerError::EmptyContent { .. }
        )
    }

    /// 获取错误的严重程度
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            DebtBreakerError::Config(_) => ErrorSeverity::Critical,
            DebtBreakerError::Telegram(_) => ErrorSeverity::Medium,
            DebtBreakerError::Http(_) => ErrorSeverity::Medium,
            DebtBreakerError::AudioDecode(_) => ErrorSeverity::Low,
            DebtBreakerError::Generation { .. } => ErrorSeverity::Low,
            DebtBreakerError::InvalidCommand { .. } => ErrorSeverity::Low,
            DebtBreakerError::InvalidCategory { .. } => ErrorSeverity::Low,
            DebtBreakerError::DebtNotFound { .. } => ErrorSeverity::Low,
            DebtBreakerError::SparkNotFound { .. } => ErrorSeverity::Low,
            DebtBreakerError::EmptyContent { .. } => ErrorSeverity::Low,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl std::fmt::Display for ErrorSeverity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorSeverity::Low => write!(f, "LOW"),
            ErrorSeverity::Medium => write!(f, "MEDIUM"),
            ErrorSeverity::High => write!(f, "HIGH"),
            ErrorSeverity::Critical => write!(f, "CRITICAL"),
        }
    }
}
