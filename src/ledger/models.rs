use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

use crate::error::DebtBreakerError;
use crate::parser::regex::RegexPatterns;

pub const UNNAMED_INSTITUTION: &str = "未命名机构";

/// 单项金额上限（一万亿），保证求和不会溢出
pub const MAX_AMOUNT: f64 = 1e12;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DebtId(String);

impl DebtId {
    /// 8 位十六进制短 id，方便在聊天里引用
    pub fn generate() -> Self {
        let mut id = Uuid::new_v4().simple().to_string();
        id.truncate(8);
        Self(id)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for DebtId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl fmt::Display for DebtId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DebtCategory {
    Bank,     // 银行
    Fintech,  // 网贷平台
    Personal, // 个人借款
}

impl DebtCategory {
    pub fn label(&self) -> &'static str {
        match self {
            DebtCategory::Bank => "银行",
            DebtCategory::Fintech => "网贷",
            DebtCategory::Personal => "个人",
        }
    }
}

impl FromStr for DebtCategory {
    type Err = DebtBreakerError;

    fn from_str(tag: &str) -> Result<Self, Self::Err> {
        match tag.trim().trim_start_matches('#').to_lowercase().as_str() {
            "bank" | "银行" => Ok(DebtCategory::Bank),
            "fintech" | "网贷" => Ok(DebtCategory::Fintech),
            "personal" | "个人" => Ok(DebtCategory::Personal),
            _ => Err(DebtBreakerError::invalid_category(tag)),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct DebtRecord {
    pub id: DebtId,
    pub name: String,
    pub total: f64,
    pub paid: f64,
    pub remaining: f64, // 派生字段，每次保存时重算
    pub percentage: u32, // 派生字段，每次集合变化时整体重算
    pub category: DebtCategory,
}

impl DebtRecord {
    /// 由表单草稿构建记录；percentage 由账本统一计算
    pub fn from_draft(draft: DebtDraft) -> Self {
        let total = coerce_amount(&draft.total);
        let paid = coerce_amount(&draft.paid);
        let name = match draft.name.trim() {
            "" => UNNAMED_INSTITUTION.to_string(),
            trimmed => trimmed.to_string(),
        };

        Self {
            id: draft.id.unwrap_or_else(DebtId::generate),
            name,
            total,
            paid,
            remaining: (total - paid).max(0.0),
            percentage: 0,
            category: draft.category,
        }
    }

    pub fn is_overpaid(&self) -> bool {
        self.paid > self.total
    }

    /// 本项已还清的比例，总额为 0 时为 0，超额还款按 100 计
    pub fn cleared_percentage(&self) -> u32 {
        if self.total <= 0.0 {
            return 0;
        }
        (self.paid / self.total * 100.0).round().clamp(0.0, 100.0) as u32
    }
}

/// 用户提交的原始表单字段，金额保持原样字符串
#[derive(Debug, Clone)]
pub struct DebtDraft {
    pub id: Option<DebtId>,
    pub name: String,
    pub total: String,
    pub paid: String,
    pub category: DebtCategory,
}

impl DebtDraft {
    pub fn new(
        name: impl Into<String>,
        total: impl Into<String>,
        paid: impl Into<String>,
        category: DebtCategory,
    ) -> Self {
        Self {
            id: None,
            name: name.into(),
            total: total.into(),
            paid: paid.into(),
            category,
        }
    }

    pub fn with_id(mut self, id: DebtId) -> Self {
        self.id = Some(id);
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct LedgerTotals {
    pub total_debt: f64,
    pub total_paid: f64,
    pub total_remaining: f64,
}

/// 宽松的金额解析：取开头的数字部分，无法解析、负数或非有限值都视为 0，
/// 超过上限的金额截断为 MAX_AMOUNT
pub fn coerce_amount(raw: &str) -> f64 {
    let value = RegexPatterns::get_instance()
        .leading_number_regex
        .find(raw)
        .and_then(|m| m.as_str().trim().parse::<f64>().ok())
        .unwrap_or(0.0);

    if value.is_finite() && value > 0.0 {
        value.min(MAX_AMOUNT)
    } else {
        0.0
    }
}
