use chrono::{DateTime, Utc};
use log::info;

use crate::error::{DebtBreakerError, Result};
use crate::feed::models::{Victory, VictoryKind};
use crate::ledger::models::{coerce_amount, DebtCategory};
use crate::utils::Formatter;

pub const COMPLETED_STATUS: &str = "已完成";

/// 还款记录，最新的在最前
#[derive(Debug, Clone)]
pub struct RepaymentLog {
    entries: Vec<Victory>,
    next_id: u64,
}

impl RepaymentLog {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
            next_id: 1,
        }
    }

    /// 以已有记录初始化，传入顺序即展示顺序
    pub fn from_entries(entries: Vec<Victory>) -> Self {
        let next_id = entries
            .iter()
            .filter_map(|v| v.id.parse::<u64>().ok())
            .max()
            .unwrap_or(0)
            + 1;
        Self { entries, next_id }
    }

    /// 根据债务类型推断还款类别
    pub fn kind_for(category: DebtCategory) -> VictoryKind {
        match category {
            DebtCategory::Bank => VictoryKind::Credit,
            DebtCategory::Fintech | DebtCategory::Personal => VictoryKind::Loan,
        }
    }

    pub fn record(&mut self, title: &str, amount_raw: &str, kind: VictoryKind) -> Result<&Victory> {
        self.record_at(title, amount_raw, kind, Utc::now())
    }

    pub fn record_at(
        &mut self,
        title: &str,
        amount_raw: &str,
        kind: VictoryKind,
        now: DateTime<Utc>,
    ) -> Result<&Victory> {
        let title = title.trim();
        if title.is_empty() {
            return Err(DebtBreakerError::empty_content("title"));
        }

        let amount = coerce_amount(amount_raw);
        if amount <= 0.0 {
            return Err(DebtBreakerError::empty_content("amount"));
        }

        let victory = Victory {
            id: self.next_id.to_string(),
            title: title.to_string(),
            amount: Formatter::format_yuan(amount),
            recorded_at: Some(now),
            kind,
            status: COMPLETED_STATUS.to_string(),
        };
        self.next_id += 1;

        info!("Recorded repayment {} for {}: {}", victory.id, victory.title, victory.amount);
        self.entries.insert(0, victory);
        Ok(&self.entries[0])
    }

    pub fn entries(&self) -> &[Victory] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for RepaymentLog {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_prepends() {
        let mut log = RepaymentLog::new();
        log.record("信用卡 A", "2000", VictoryKind::Credit).unwrap();
        let latest = log.record("个人贷款", "1234.5元", VictoryKind::Loan).unwrap();
        assert_eq!(latest.amount, "¥1,234.5");
        assert_eq!(latest.status, COMPLETED_STATUS);
        assert_eq!(latest.id, "2");

        let titles: Vec<&str> = log.entries().iter().map(|v| v.title.as_str()).collect();
        assert_eq!(titles, vec!["个人贷款", "信用卡 A"]);
        assert_eq!(log.entries()[1].amount, "¥2,000");
    }

    #[test]
    fn test_record_rejects_missing_fields() {
        let mut log = RepaymentLog::new();
        assert!(matches!(
            log.record("  ", "100", VictoryKind::Credit),
            Err(DebtBreakerError::EmptyContent { .. })
        ));
        assert!(log.record("招商银行", "", VictoryKind::Credit).is_err());
        assert!(log.record("招商银行", "abc", VictoryKind::Credit).is_err());
        assert!(log.is_empty());
    }

    #[test]
    fn test_kind_for_category() {
        assert_eq!(RepaymentLog::kind_for(DebtCategory::Bank), VictoryKind::Credit);
        assert_eq!(RepaymentLog::kind_for(DebtCategory::Fintech), VictoryKind::Loan);
        assert_eq!(RepaymentLog::kind_for(DebtCategory::Personal), VictoryKind::Loan);
    }

    #[test]
    fn test_ids_continue_after_seed() {
        let mut log = RepaymentLog::from_entries(Vec::new());
        assert_eq!(log.record("a", "1", VictoryKind::Loan).unwrap().id, "1");

        let mut log = RepaymentLog::from_entries(log.entries().to_vec());
        assert_eq!(log.record("b", "1", VictoryKind::Loan).unwrap().id, "2");
        assert_eq!(log.len(), 2);
    }
}
