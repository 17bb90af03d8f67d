use async_trait::async_trait;
use teloxide::{
    payloads::SendDocumentSetters,
    requests::Requester,
    types::{ChatId, InputFile},
    Bot, RequestError,
};

/// 抽象Bot API操作的trait，用于测试时mock
#[async_trait]
pub trait BotApi: Send + Sync {
    /// 发送消息
    async fn send_message(&self, chat_id: ChatId, text: &str) -> Result<(), RequestError>;

    /// 发送音频文件（WAV）
    async fn send_audio_file(
        &self,
        chat_id: ChatId,
        file_name: &str,
        bytes: Vec<u8>,
        caption: &str,
    ) -> Result<(), RequestError>;
}

#[async_trait]
impl BotApi for Bot {
    async fn send_message(&self, chat_id: ChatId, text: &str) -> Result<(), RequestError> {
        Requester::send_message(self, chat_id, text.to_string()).await?;
        Ok(())
    }

    async fn send_audio_file(
        &self,
        chat_id: ChatId,
        file_name: &str,
        bytes: Vec<u8>,
        caption: &str,
    ) -> Result<(), RequestError> {
        let document = InputFile::memory(bytes).file_name(file_name.to_string());
        Requester::send_document(self, chat_id, document)
            .caption(caption.to_string())
            .await?;
        Ok(())
    }
}
