use std::fmt;
use std::sync::Arc;
use tokio::sync::Mutex;
use async_trait::async_trait;
use cucumber::{given, when, then, World};
use teloxide::types::ChatId;
use teloxide::RequestError;

// 导入项目模块
use debtbreaker::ai::{Companion, GenerativeClient};
use debtbreaker::bot::{BotApi, MessageHandler};
use debtbreaker::error::{DebtBreakerError, Result as DebtBreakerResult};
use debtbreaker::ledger::models::{DebtCategory, DebtDraft};
use debtbreaker::ledger::DebtLedger;
use debtbreaker::session::SessionStore;

// 只记录文本回复的 Mock Bot API
#[derive(Debug, Clone, Default)]
pub struct MockBotApi {
    pub sent_messages: Arc<Mutex<Vec<(ChatId, String)>>>,
}

#[async_trait]
impl BotApi for MockBotApi {
    async fn send_message(&self, chat_id: ChatId, text: &str) -> Result<(), RequestError> {
        self.sent_messages.lock().await.push((chat_id, text.to_string()));
        Ok(())
    }

    async fn send_audio_file(
        &self,
        _chat_id: ChatId,
        _file_name: &str,
        _bytes: Vec<u8>,
        _caption: &str,
    ) -> Result<(), RequestError> {
        Ok(())
    }
}

// 离线的生成客户端，所有请求都失败
struct OfflineClient;

#[async_trait]
impl GenerativeClient for OfflineClient {
    async fn generate(&self, _prompt: &str) -> DebtBreakerResult<String> {
        Err(DebtBreakerError::generation_error("offline"))
    }

    async fn synthesize(&self, _text: &str) -> DebtBreakerResult<String> {
        Err(DebtBreakerError::generation_error("offline"))
    }
}

// World结构，管理测试状态
#[derive(World)]
#[world(init = Self::new)]
pub struct DebtBreakerWorld {
    pub ledger: DebtLedger,
    pub bot_api: MockBotApi,
    pub message_handler: MessageHandler,
    pub current_chat_id: ChatId,
}

impl fmt::Debug for DebtBreakerWorld {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DebtBreakerWorld")
            .field("ledger", &self.ledger)
            .field("bot_api", &self.bot_api)
            .field("current_chat_id", &self.current_chat_id)
            .finish()
    }
}

impl DebtBreakerWorld {
    async fn new() -> Self {
        Self {
            ledger: DebtLedger::new(),
            bot_api: MockBotApi::default(),
            message_handler: MessageHandler::new(
                SessionStore::without_seed(),
                Companion::new(Arc::new(OfflineClient)),
            ),
            current_chat_id: ChatId(12345),
        }
    }

    async fn last_reply(&self) -> String {
        self.bot_api
            .sent_messages
            .lock()
            .await
            .last()
            .map(|(_, text)| text.clone())
            .unwrap_or_default()
    }
}

// 账本步骤实现
#[given(expr = "一个空的债务账本")]
async fn empty_ledger(world: &mut DebtBreakerWorld) {
    world.ledger = DebtLedger::new();
}

#[given(expr = "账本中有债务 {string} 总额 {string} 已还 {string}")]
async fn existing_debt(world: &mut DebtBreakerWorld, name: String, total: String, paid: String) {
    world
        .ledger
        .save(DebtDraft::new(name, total, paid, DebtCategory::Bank));
}

#[when(expr = "我添加债务 {string} 总额 {string} 已还 {string}")]
async fn add_debt(world: &mut DebtBreakerWorld, name: String, total: String, paid: String) {
    existing_debt(world, name, total, paid).await;
}

#[when(expr = "我把债务 {string} 的总额改为 {string}")]
async fn edit_debt_total(world: &mut DebtBreakerWorld, name: String, total: String) {
    let existing = world
        .ledger
        .find_by_name(&name)
        .cloned()
        .expect("debt should exist");

    let draft = DebtDraft::new(
        existing.name.clone(),
        total,
        existing.paid.to_string(),
        existing.category,
    )
    .with_id(existing.id.clone());
    world.ledger.save(draft);
}

#[when(expr = "我删除债务 {string}")]
async fn delete_debt(world: &mut DebtBreakerWorld, name: String) {
    let id = world
        .ledger
        .find_by_name(&name)
        .map(|d| d.id.clone())
        .expect("debt should exist");
    assert!(world.ledger.delete(&id));
}

#[then(expr = "债务 {string} 的份额应该是 {int}%")]
async fn share_should_be(world: &mut DebtBreakerWorld, name: String, expected: u32) {
    let debt = world.ledger.find_by_name(&name).expect("debt should exist");
    assert_eq!(debt.percentage, expected);
}

#[then(expr = "债务 {string} 的剩余应该是 {int}")]
async fn remaining_should_be(world: &mut DebtBreakerWorld, name: String, expected: i64) {
    let debt = world.ledger.find_by_name(&name).expect("debt should exist");
    assert_eq!(debt.remaining, expected as f64);
}

#[then(expr = "总债务应该是 {int}")]
async fn total_debt_should_be(world: &mut DebtBreakerWorld, expected: i64) {
    assert_eq!(world.ledger.totals().total_debt, expected as f64);
}

#[then(expr = "待还总额应该是 {int}")]
async fn total_remaining_should_be(world: &mut DebtBreakerWorld, expected: i64) {
    assert_eq!(world.ledger.totals().total_remaining, expected as f64);
}

#[then(expr = "还款进度应该是 {int}%")]
async fn progress_should_be(world: &mut DebtBreakerWorld, expected: u32) {
    assert_eq!(world.ledger.progress(), expected);
}

#[then(expr = "最高债务项应该是 {string}")]
async fn largest_should_be(world: &mut DebtBreakerWorld, expected: String) {
    let largest = world.ledger.largest().map(|d| d.name.clone());
    assert_eq!(largest.as_deref(), Some(expected.as_str()));
}

#[then(expr = "份额总和应该在 {int} 到 {int} 之间")]
async fn share_sum_within(world: &mut DebtBreakerWorld, low: u32, high: u32) {
    let sum: u32 = world.ledger.records().iter().map(|d| d.percentage).sum();
    assert!(sum >= low && sum <= high, "share sum {sum} out of range");
}

// 聊天步骤实现
#[given(expr = "我在聊天 {string} 中")]
async fn set_chat_id(world: &mut DebtBreakerWorld, chat_id: String) {
    world.current_chat_id = ChatId(chat_id.parse::<i64>().unwrap());
}

#[when(expr = "我发送消息 {string}")]
async fn send_message(world: &mut DebtBreakerWorld, text: String) {
    world
        .message_handler
        .handle_message(&world.bot_api, world.current_chat_id, &text)
        .await
        .unwrap();
}

#[then(expr = "回复应该包含 {string}")]
async fn reply_should_contain(world: &mut DebtBreakerWorld, expected_text: String) {
    let reply = world.last_reply().await;
    assert!(
        reply.contains(&expected_text),
        "reply {reply:?} does not contain {expected_text:?}"
    );
}

#[then(expr = "不应该收到任何回复")]
async fn no_reply(world: &mut DebtBreakerWorld) {
    assert!(world.bot_api.sent_messages.lock().await.is_empty());
}

#[then(expr = "聊天 {string} 的账本中应该有 {int} 条债务")]
async fn chat_debt_count(world: &mut DebtBreakerWorld, chat_id: String, expected: usize) {
    let chat_id = chat_id.parse::<i64>().unwrap();
    let count = world
        .message_handler
        .store()
        .with_session(chat_id, |s| s.ledger.records().len())
        .await;
    assert_eq!(count, expected);
}

#[then(expr = "聊天 {string} 的帖子 {string} 应该有 {int} 条回复")]
async fn spark_reply_count(world: &mut DebtBreakerWorld, chat_id: String, spark_id: String, expected: usize) {
    let chat_id = chat_id.parse::<i64>().unwrap();
    let count = world
        .message_handler
        .store()
        .with_session(chat_id, |s| s.wall.get(&spark_id).map(|sp| sp.replies.len()))
        .await;
    assert_eq!(count, Some(expected));
}

#[tokio::main]
async fn main() {
    DebtBreakerWorld::run("tests/features").await;
}
