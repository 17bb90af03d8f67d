use chrono::Utc;
use log::{debug, info, warn};
use teloxide::{types::ChatId, RequestError};

use crate::ai::{Companion, Generated, Mood, Speech};
use crate::bot::traits::BotApi;
use crate::bot::views;
use crate::error::{DebtBreakerError, Result};
use crate::feed::models::{SparkCategory, VictoryKind};
use crate::feed::RepaymentLog;
use crate::ledger::models::{DebtDraft, DebtId};
use crate::parser::message::{MessageParser, ParsedMessage};
use crate::session::{Session, SessionStore};
use crate::utils::Logger;

pub const SPEECH_FILE_NAME: &str = "debtbreaker-voice.wav";

#[derive(Clone)]
pub struct MessageHandler {
    parser: MessageParser,
    store: SessionStore,
    companion: Companion,
}

impl MessageHandler {
    pub fn new(store: SessionStore, companion: Companion) -> Self {
        Self {
            parser: MessageParser::new(),
            store,
            companion,
        }
    }

    pub fn store(&self) -> &SessionStore {
        &self.store
    }

    pub fn companion(&self) -> &Companion {
        &self.companion
    }

    /// 处理普通文本消息；不符合格式的消息直接忽略
    pub async fn handle_message<B: BotApi + ?Sized>(
        &self,
        bot: &B,
        chat_id: ChatId,
        text: &str,
    ) -> std::result::Result<(), RequestError> {
        debug!("Processing message: {}", text);

        let Some(parsed) = self.parser.parse(text) else {
            debug!("Not a DebtBreaker message, skipping");
            return Ok(());
        };

        let reply = match self
            .store
            .with_session(chat_id.0, |session| Self::apply(chat_id.0, session, parsed))
            .await
        {
            Ok(reply) => reply,
            Err(e) if e.is_user_facing() => {
                info!("Rejected message in chat {}: {}", chat_id, e);
                views::user_message(&e)
            }
            Err(e) => {
                warn!("Failed to apply message in chat {}: {} ({})", chat_id, e, e.severity());
                views::user_message(&e)
            }
        };

        bot.send_message(chat_id, &reply).await
    }

    /// 在会话上执行一次解析后的操作，返回回复文本
    fn apply(chat_id: i64, session: &mut Session, parsed: ParsedMessage) -> Result<String> {
        match parsed {
            ParsedMessage::SaveDebt {
                id,
                name,
                total,
                paid,
                category,
            } => {
                let mut draft = DebtDraft::new(name, total, paid, category);
                if let Some(id) = id {
                    draft = draft.with_id(DebtId::from(id.as_str()));
                }

                let saved = session.ledger.save(draft);
                Logger::log_debt_saved(&saved.name, saved.total, saved.paid, saved.percentage);
                let line = views::debt_line(saved);

                Ok(format!(
                    "✅ 已保存\n{}\n\n{}",
                    line,
                    views::render_ledger(&session.ledger)
                ))
            }
            ParsedMessage::DeleteDebt { id } => {
                if !session.ledger.delete(&DebtId::from(id.as_str())) {
                    return Err(DebtBreakerError::debt_not_found(id));
                }
                Ok(format!(
                    "🗑 已删除 {}\n\n{}",
                    id,
                    views::render_ledger(&session.ledger)
                ))
            }
            ParsedMessage::Repayment { creditor, amount } => {
                // 匹配到已登记的机构时按其类型归类
                let kind = session
                    .ledger
                    .find_by_name(&creditor)
                    .map(|d| RepaymentLog::kind_for(d.category))
                    .unwrap_or(VictoryKind::Credit);

                let victory = session.victories.record(&creditor, &amount, kind)?;
                Logger::log_repayment(chat_id, &victory.title, &victory.amount);

                Ok(format!(
                    "🎉 又一次胜利！\n{}",
                    views::victory_line(victory, Utc::now())
                ))
            }
            ParsedMessage::Post { category, content } => {
                let spark = session.wall.post(category, &content)?;
                Logger::log_spark(chat_id, &spark.id, "posted");

                Ok(format!(
                    "✨ 已发布到希望之墙（{}），编号 {}",
                    spark.category.label(),
                    spark.id
                ))
            }
            ParsedMessage::Reply { spark_id, text } => {
                let spark = session.wall.reply(&spark_id, &text)?;
                Logger::log_spark(chat_id, &spark.id, "replied");

                Ok(views::render_spark_detail(spark, Utc::now()))
            }
        }
    }

    pub async fn ledger_summary(&self, chat_id: ChatId) -> String {
        self.store
            .with_session(chat_id.0, |s| views::render_ledger(&s.ledger))
            .await
    }

    pub async fn victories_summary(&self, chat_id: ChatId) -> String {
        self.store
            .with_session(chat_id.0, |s| views::render_victories(&s.victories, Utc::now()))
            .await
    }

    pub async fn wall_view(&self, chat_id: ChatId, category: SparkCategory) -> String {
        self.store
            .with_session(chat_id.0, |s| views::render_wall(&s.wall, category, Utc::now()))
            .await
    }

    pub async fn spark_view(&self, chat_id: ChatId, spark_id: &str) -> String {
        self.store
            .with_session(chat_id.0, |s| match s.wall.get(spark_id) {
                Some(spark) => views::render_spark_detail(spark, Utc::now()),
                None => views::user_message(&DebtBreakerError::spark_not_found(spark_id)),
            })
            .await
    }

    /// AI 鼓励；兜底文案使用不同的标题
    pub async fn encouragement(&self, mood: Mood) -> String {
        match self.companion.encourage(mood).await {
            Generated::Generated(text) => format!("✨ AI 寄语（{}）\n{}", mood.label(), text),
            Generated::Fallback(text) => {
                info!("Serving fallback encouragement for mood {:?}", mood);
                format!("💌 寄语\n{}", text)
            }
        }
    }

    /// 语音播报；合成失败时不发送任何内容
    pub async fn speak<B: BotApi + ?Sized>(
        &self,
        bot: &B,
        chat_id: ChatId,
        text: &str,
    ) -> std::result::Result<bool, RequestError> {
        match self.companion.speak(text).await {
            Speech::Audio(audio) => {
                bot.send_audio_file(chat_id, SPEECH_FILE_NAME, audio.to_wav(), text)
                    .await?;
                Ok(true)
            }
            Speech::Silent => {
                debug!("No speech delivered to chat {}", chat_id);
                Ok(false)
            }
        }
    }
}
