use crate::ai::{Companion, Mood};
use crate::bot::dispatcher::Command;
use crate::bot::handler::MessageHandler;
use crate::bot::traits::BotApi;
use crate::bot::views;
use crate::feed::models::SparkCategory;
use log::info;
use teloxide::{types::ChatId, RequestError};

#[derive(Clone)]
pub struct Commands {
    handler: MessageHandler,
}

impl Commands {
    pub fn new(handler: MessageHandler) -> Self {
        Self { handler }
    }

    pub async fn handle_command<B: BotApi + ?Sized>(
        &self,
        bot: &B,
        chat_id: ChatId,
        command: Command,
    ) -> Result<(), RequestError> {
        match command {
            Command::Start => self.handle_start(bot, chat_id).await,
            Command::Help => bot.send_message(chat_id, views::HELP_TEXT).await,
            Command::Debts => {
                let text = self.handler.ledger_summary(chat_id).await;
                bot.send_message(chat_id, &text).await
            }
            Command::Victories => {
                let text = self.handler.victories_summary(chat_id).await;
                bot.send_message(chat_id, &text).await
            }
            Command::Wall(tab) => self.handle_wall(bot, chat_id, &tab).await,
            Command::Spark(id) => {
                let text = self.handler.spark_view(chat_id, id.trim()).await;
                bot.send_message(chat_id, &text).await
            }
            Command::Encourage(mood) => self.handle_encourage(bot, chat_id, &mood).await,
            Command::Speak(text) => {
                let text = match text.trim() {
                    "" => Companion::random_quote().to_string(),
                    given => given.to_string(),
                };
                self.handler.speak(bot, chat_id, &text).await?;
                Ok(())
            }
            Command::Reset => self.handle_reset(bot, chat_id).await,
            Command::Status => self.handle_status(bot, chat_id).await,
        }
    }

    /// 欢迎语 + 随机语录，并尝试语音播报语录
    async fn handle_start<B: BotApi + ?Sized>(
        &self,
        bot: &B,
        chat_id: ChatId,
    ) -> Result<(), RequestError> {
        let quote = Companion::random_quote();
        bot.send_message(chat_id, &format!("{}\n\n“{}”", views::WELCOME_TEXT, quote))
            .await?;

        self.handler.speak(bot, chat_id, quote).await?;
        Ok(())
    }

    async fn handle_wall<B: BotApi + ?Sized>(
        &self,
        bot: &B,
        chat_id: ChatId,
        tab: &str,
    ) -> Result<(), RequestError> {
        let category = if tab.trim().is_empty() {
            Ok(SparkCategory::Story)
        } else {
            tab.parse::<SparkCategory>()
        };

        let text = match category {
            Ok(category) => self.handler.wall_view(chat_id, category).await,
            Err(e) => views::user_message(&e),
        };
        bot.send_message(chat_id, &text).await
    }

    async fn handle_encourage<B: BotApi + ?Sized>(
        &self,
        bot: &B,
        chat_id: ChatId,
        mood: &str,
    ) -> Result<(), RequestError> {
        let text = match mood.parse::<Mood>() {
            Ok(mood) => self.handler.encouragement(mood).await,
            Err(e) => views::user_message(&e),
        };
        bot.send_message(chat_id, &text).await
    }

    async fn handle_reset<B: BotApi + ?Sized>(
        &self,
        bot: &B,
        chat_id: ChatId,
    ) -> Result<(), RequestError> {
        info!("Session reset requested for chat {}", chat_id);
        let store = self.handler.store();
        store.reset(chat_id.0).await;

        let text = if store.seeds_new_sessions() {
            "🔄 已恢复演示数据。"
        } else {
            "🔄 已清空会话数据。"
        };
        bot.send_message(chat_id, text).await
    }

    async fn handle_status<B: BotApi + ?Sized>(
        &self,
        bot: &B,
        chat_id: ChatId,
    ) -> Result<(), RequestError> {
        let sessions = self.handler.store().session_count().await;
        let status_text = format!(
            "DebtBreaker Status: ✅ Running\n\nSessions: {}\nLedger: ✅ Ready\nCompanion: ✅ Ready",
            sessions
        );

        bot.send_message(chat_id, &status_text).await
    }
}
