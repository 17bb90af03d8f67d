use std::collections::HashMap;
use std::sync::Arc;

use chrono::{Duration, Utc};
use log::{debug, info};
use tokio::sync::Mutex;

use crate::feed::models::{Spark, SparkCategory, SparkTone, Victory, VictoryKind};
use crate::feed::{RepaymentLog, Wall};
use crate::ledger::models::{DebtCategory, DebtDraft, DebtId, DebtRecord};
use crate::ledger::DebtLedger;

/// 单个聊天的全部会话状态，进程退出即丢失
#[derive(Debug, Clone, Default)]
pub struct Session {
    pub ledger: DebtLedger,
    pub victories: RepaymentLog,
    pub wall: Wall,
}

impl Session {
    pub fn empty() -> Self {
        Self::default()
    }

    /// 带演示数据的新会话
    pub fn seeded() -> Self {
        Self {
            ledger: DebtLedger::from_records(seed_debts()),
            victories: RepaymentLog::from_entries(seed_victories()),
            wall: Wall::from_sparks(seed_sparks()),
        }
    }
}

#[derive(Clone)]
pub struct SessionStore {
    sessions: Arc<Mutex<HashMap<i64, Session>>>,
    seed_new_sessions: bool,
}

impl SessionStore {
    pub fn new() -> Self {
        Self {
            sessions: Arc::new(Mutex::new(HashMap::new())),
            seed_new_sessions: true,
        }
    }

    /// 新会话不带演示数据
    pub fn without_seed() -> Self {
        Self {
            sessions: Arc::new(Mutex::new(HashMap::new())),
            seed_new_sessions: false,
        }
    }

    /// 在锁内对会话做同步操作；首次访问时创建会话
    pub async fn with_session<T>(&self, chat_id: i64, f: impl FnOnce(&mut Session) -> T) -> T {
        let mut sessions = self.sessions.lock().await;
        let seed = self.seed_new_sessions;

        let session = sessions.entry(chat_id).or_insert_with(|| {
            info!("Creating session for chat {}", chat_id);
            if seed {
                Session::seeded()
            } else {
                Session::empty()
            }
        });

        debug!("Session access for chat {}", chat_id);
        f(session)
    }

    /// 新会话是否带演示数据
    pub fn seeds_new_sessions(&self) -> bool {
        self.seed_new_sessions
    }

    pub async fn session_count(&self) -> usize {
        self.sessions.lock().await.len()
    }

    /// 丢弃会话，下次访问时重新创建
    pub async fn reset(&self, chat_id: i64) -> bool {
        let removed = self.sessions.lock().await.remove(&chat_id).is_some();
        if removed {
            info!("Reset session for chat {}", chat_id);
        }
        removed
    }
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::new()
    }
}

fn seed_debts() -> Vec<DebtRecord> {
    [
        ("d1", "南京银行", "50000", "35000", DebtCategory::Bank),
        ("d2", "招商银行信用卡", "30000", "20000", DebtCategory::Bank),
        ("d3", "蚂蚁借呗", "20000", "10000", DebtCategory::Fintech),
    ]
    .into_iter()
    .map(|(id, name, total, paid, category)| {
        DebtRecord::from_draft(DebtDraft::new(name, total, paid, category).with_id(DebtId::from(id)))
    })
    .collect()
}

fn seed_victories() -> Vec<Victory> {
    let now = Utc::now();
    vec![
        Victory {
            id: "1".to_string(),
            title: "信用卡 A".to_string(),
            amount: "¥2,000".to_string(),
            recorded_at: Some(now - Duration::days(1)),
            kind: VictoryKind::Credit,
            status: "已完成".to_string(),
        },
        Victory {
            id: "2".to_string(),
            title: "个人贷款".to_string(),
            amount: "¥500".to_string(),
            recorded_at: Some(now - Duration::days(3)),
            kind: VictoryKind::Loan,
            status: "按月".to_string(),
        },
        Victory {
            id: "3".to_string(),
            title: "达成里程碑".to_string(),
            amount: "50% 债务缩减".to_string(),
            recorded_at: None,
            kind: VictoryKind::Milestone,
            status: "成就".to_string(),
        },
    ]
}

fn seed_sparks() -> Vec<Spark> {
    let now = Utc::now();
    let seeds: [(&str, &str, i64, u32, u32, SparkTone, &str, SparkCategory, &[&str]); 6] = [
        ("1", "从负债20万到现在的5万，我学会了克制。", 2, 124, 12, SparkTone::Green, "auto_stories", SparkCategory::Story, &["加油！你是最棒的", "希望能早日像你一样上岸"]),
        ("2", "今天压力好大，想哭。", 15, 89, 42, SparkTone::Blue, "favorite", SparkCategory::Feeling, &["抱抱你", "想哭就大声哭出来吧"]),
        ("3", "第一笔逾期时的绝望，现在想来也是成长的代价。", 60, 542, 203, SparkTone::Purple, "history_edu", SparkCategory::Story, &[]),
        ("4", "加油，明天会更好。", 180, 31, 0, SparkTone::Green, "mood", SparkCategory::Feeling, &["借你吉言"]),
        ("5", "坚持记账第100天，发现了很多没必要的开支。", 300, 210, 15, SparkTone::Blue, "menu_book", SparkCategory::Story, &[]),
        ("6", "感觉自己像在深海里游泳。", 360, 45, 8, SparkTone::Purple, "waves", SparkCategory::Feeling, &[]),
    ];

    seeds
        .into_iter()
        .map(|(id, content, minutes_ago, likes, secondary_stat, tone, icon, category, replies)| Spark {
            id: id.to_string(),
            content: content.to_string(),
            posted_at: now - Duration::minutes(minutes_ago),
            likes,
            secondary_stat,
            tone,
            icon: icon.to_string(),
            category,
            replies: replies.iter().map(|r| r.to_string()).collect(),
        })
        .collect()
}
