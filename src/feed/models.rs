use chrono::{DateTime, Utc};
use std::str::FromStr;

use crate::error::DebtBreakerError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VictoryKind {
    Credit,    // 信用卡类还款
    Loan,      // 贷款类还款
    Milestone, // 里程碑
}

impl VictoryKind {
    pub fn icon(&self) -> &'static str {
        match self {
            VictoryKind::Credit => "💳",
            VictoryKind::Loan => "🏦",
            VictoryKind::Milestone => "🏆",
        }
    }
}

/// 还款胜利记录，只追加不修改
#[derive(Debug, Clone)]
pub struct Victory {
    pub id: String,
    pub title: String,
    pub amount: String, // 已格式化的展示文本，如 "¥2,000"
    pub recorded_at: Option<DateTime<Utc>>,
    pub kind: VictoryKind,
    pub status: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SparkCategory {
    Story,   // 上岸故事
    Feeling, // 匿名心声
}

impl SparkCategory {
    pub fn label(&self) -> &'static str {
        match self {
            SparkCategory::Story => "故事",
            SparkCategory::Feeling => "心情",
        }
    }

    pub fn icons(&self) -> &'static [&'static str] {
        match self {
            SparkCategory::Story => &["auto_stories", "history_edu", "menu_book"],
            SparkCategory::Feeling => &["favorite", "mood", "waves"],
        }
    }
}

impl FromStr for SparkCategory {
    type Err = DebtBreakerError;

    fn from_str(tag: &str) -> Result<Self, Self::Err> {
        match tag.trim().trim_start_matches('#').to_lowercase().as_str() {
            "story" | "故事" => Ok(SparkCategory::Story),
            "feeling" | "心情" => Ok(SparkCategory::Feeling),
            other => Err(DebtBreakerError::invalid_command(format!(
                "unknown wall tab: {other}"
            ))),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SparkTone {
    Green,
    Blue,
    Purple,
}

impl SparkTone {
    pub const ALL: [SparkTone; 3] = [SparkTone::Green, SparkTone::Blue, SparkTone::Purple];

    pub fn marker(&self) -> &'static str {
        match self {
            SparkTone::Green => "🟢",
            SparkTone::Blue => "🔵",
            SparkTone::Purple => "🟣",
        }
    }
}

/// 希望之墙上的一条匿名帖子
#[derive(Debug, Clone)]
pub struct Spark {
    pub id: String,
    pub content: String,
    pub posted_at: DateTime<Utc>,
    pub likes: u32,
    pub secondary_stat: u32,
    pub tone: SparkTone,
    pub icon: String,
    pub category: SparkCategory,
    pub replies: Vec<String>,
}
