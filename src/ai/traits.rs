use async_trait::async_trait;

use crate::error::Result;

/// 远端生成能力的抽象，测试时可替换为 mock
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait GenerativeClient: Send + Sync {
    /// 根据提示词生成文本
    async fn generate(&self, prompt: &str) -> Result<String>;

    /// 合成语音，返回 base64 编码的 16 位 PCM（单声道 24kHz）
    async fn synthesize(&self, text: &str) -> Result<String>;
}
