use crate::ledger::models::{DebtDraft, DebtId, DebtRecord, LedgerTotals};
use log::{debug, info};

/// 插入或替换一条记录，然后整体重算份额
///
/// id 已存在时原位替换（保持顺序），否则追加到末尾。
pub fn upsert(record: DebtRecord, existing: &[DebtRecord]) -> Vec<DebtRecord> {
    let mut records = existing.to_vec();

    match records.iter_mut().find(|d| d.id == record.id) {
        Some(slot) => *slot = record,
        None => records.push(record),
    }

    recompute_percentages(records)
}

/// 删除指定 id 的记录并重算；id 不存在时只做重算
pub fn remove(id: &DebtId, existing: &[DebtRecord]) -> Vec<DebtRecord> {
    let records = existing
        .iter()
        .filter(|d| &d.id != id)
        .cloned()
        .collect();

    recompute_percentages(records)
}

pub fn aggregate(records: &[DebtRecord]) -> LedgerTotals {
    let total_debt: f64 = records.iter().map(|d| d.total).sum();
    let total_paid: f64 = records.iter().map(|d| d.paid).sum();

    LedgerTotals {
        total_debt,
        total_paid,
        total_remaining: total_debt - total_paid,
    }
}

/// 总额最高的一项，并列时取靠前的
pub fn largest(records: &[DebtRecord]) -> Option<&DebtRecord> {
    records.iter().fold(None, |best: Option<&DebtRecord>, d| match best {
        Some(b) if b.total >= d.total => Some(b),
        _ => Some(d),
    })
}

/// 还款进度百分比，封顶 100
pub fn progress(records: &[DebtRecord]) -> u32 {
    let totals = aggregate(records);
    if totals.total_debt <= 0.0 {
        return 0;
    }
    let ratio = (totals.total_paid / totals.total_debt * 100.0).round();
    ratio.clamp(0.0, 100.0) as u32
}

// 每项独立四舍五入，不做余数分配，总和可能偏离 100 几个点
fn recompute_percentages(mut records: Vec<DebtRecord>) -> Vec<DebtRecord> {
    let global_total: f64 = records.iter().map(|d| d.total).sum();

    for record in records.iter_mut() {
        record.percentage = if global_total > 0.0 {
            (record.total / global_total * 100.0).round() as u32
        } else {
            0
        };
    }

    debug!(
        "Recomputed shares for {} debts against total {:.2}",
        records.len(),
        global_total
    );
    records
}

/// 一个会话持有的债务账本
#[derive(Debug, Clone, Default)]
pub struct DebtLedger {
    records: Vec<DebtRecord>,
}

impl DebtLedger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_records(records: Vec<DebtRecord>) -> Self {
        Self {
            records: recompute_percentages(records),
        }
    }

    /// 新增或编辑；返回保存后的记录
    pub fn save(&mut self, draft: DebtDraft) -> &DebtRecord {
        let record = DebtRecord::from_draft(draft);
        let id = record.id.clone();
        let editing = self.get(&id).is_some();

        self.records = upsert(record, &self.records);
        info!(
            "{} debt {} ({} debts in ledger)",
            if editing { "Updated" } else { "Added" },
            id,
            self.records.len()
        );

        // upsert 之后 id 必然存在
        let index = self
            .records
            .iter()
            .position(|d| d.id == id)
            .unwrap_or(self.records.len() - 1);
        &self.records[index]
    }

    /// 删除记录，返回是否确实删除了
    pub fn delete(&mut self, id: &DebtId) -> bool {
        let before = self.records.len();
        self.records = remove(id, &self.records);
        let deleted = self.records.len() < before;
        if deleted {
            info!("Deleted debt {} ({} debts left)", id, self.records.len());
        }
        deleted
    }

    pub fn get(&self, id: &DebtId) -> Option<&DebtRecord> {
        self.records.iter().find(|d| &d.id == id)
    }

    pub fn find_by_name(&self, name: &str) -> Option<&DebtRecord> {
        let name = name.trim();
        self.records.iter().find(|d| d.name == name)
    }

    pub fn records(&self) -> &[DebtRecord] {
        &self.records
    }

    pub fn totals(&self) -> LedgerTotals {
        aggregate(&self.records)
    }

    pub fn largest(&self) -> Option<&DebtRecord> {
        largest(&self.records)
    }

    pub fn progress(&self) -> u32 {
        progress(&self.records)
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ledger::models::DebtCategory;

    fn record(id: &str, total: &str, paid: &str) -> DebtRecord {
        DebtRecord::from_draft(
            DebtDraft::new(id, total, paid, DebtCategory::Bank).with_id(DebtId::from(id)),
        )
    }

    fn sample() -> Vec<DebtRecord> {
        let mut records = Vec::new();
        records = upsert(record("d1", "50000", "35000"), &records);
        records = upsert(record("d2", "30000", "20000"), &records);
        upsert(record("d3", "20000", "10000"), &records)
    }

    fn shares(records: &[DebtRecord]) -> Vec<u32> {
        records.iter().map(|d| d.percentage).collect()
    }

    #[test]
    fn test_sample_ledger() {
        let records = sample();
        assert_eq!(shares(&records), vec![50, 30, 20]);

        let totals = aggregate(&records);
        assert_eq!(totals.total_debt, 100000.0);
        assert_eq!(totals.total_paid, 65000.0);
        assert_eq!(totals.total_remaining, 35000.0);
        assert_eq!(progress(&records), 65);
    }

    #[test]
    fn test_aggregate_empty() {
        assert_eq!(aggregate(&[]), LedgerTotals::default());
        assert_eq!(progress(&[]), 0);
        assert!(largest(&[]).is_none());
    }

    #[test]
    fn test_single_record_is_hundred_percent() {
        let records = upsert(record("only", "1234.56", "0"), &[]);
        assert_eq!(shares(&records), vec![100]);
    }

    #[test]
    fn test_share_sum_within_rounding_slack() {
        let mut records = Vec::new();
        for (i, total) in ["1", "1", "1", "7", "13.3", "999"].iter().enumerate() {
            records = upsert(record(&format!("r{i}"), total, "0"), &records);
            let n = records.len() as i64;
            let sum: i64 = records.iter().map(|d| d.percentage as i64).sum();
            assert!((100 - n..=100 + n).contains(&sum), "sum {sum} for {n} records");
        }

        // 三等分：33 + 33 + 33 = 99，不做修正
        let thirds = sample()
            .into_iter()
            .map(|mut d| {
                d.total = 1.0;
                d
            })
            .collect::<Vec<_>>();
        let thirds = remove(&DebtId::from("missing"), &thirds);
        assert_eq!(shares(&thirds), vec![33, 33, 33]);
    }

    #[test]
    fn test_upsert_then_remove_restores_shares() {
        let before = sample();
        let with_extra = upsert(record("d4", "25000", "0"), &before);
        assert_eq!(shares(&with_extra), vec![40, 24, 16, 20]);

        let after = remove(&DebtId::from("d4"), &with_extra);
        assert_eq!(after, before);
    }

    #[test]
    fn test_edit_preserves_position() {
        let records = upsert(record("d1", "10000", "0"), &sample());
        let ids: Vec<&str> = records.iter().map(|d| d.id.as_str()).collect();
        assert_eq!(ids, vec!["d1", "d2", "d3"]);
        assert_eq!(records[0].total, 10000.0);
    }

    #[test]
    fn test_zero_total_edit() {
        let records = upsert(record("d1", "0", "0"), &sample());
        assert_eq!(shares(&records), vec![0, 60, 40]);
        assert_eq!(records[0].remaining, 0.0);
    }

    #[test]
    fn test_huge_totals_keep_shares() {
        let records = upsert(record("a", "1e308", "0"), &[]);
        let records = upsert(record("b", "1e308", "0"), &records);
        assert_eq!(shares(&records), vec![50, 50]);
        assert!(aggregate(&records).total_debt.is_finite());
    }

    #[test]
    fn test_all_zero_totals() {
        let records = upsert(record("a", "abc", ""), &[]);
        let records = upsert(record("b", "", "5"), &records);
        assert_eq!(shares(&records), vec![0, 0]);
    }

    #[test]
    fn test_non_numeric_paid_treated_as_zero() {
        let records = upsert(record("d9", "8000", ""), &[]);
        assert_eq!(records[0].paid, 0.0);
        assert_eq!(records[0].remaining, 8000.0);
    }

    #[test]
    fn test_remove_unknown_id_is_noop() {
        let before = sample();
        assert_eq!(remove(&DebtId::from("nope"), &before), before);
    }

    #[test]
    fn test_largest() {
        let records = sample();
        assert_eq!(largest(&records).map(|d| d.id.as_str()), Some("d1"));

        let tied = upsert(record("d2", "50000", "0"), &records);
        assert_eq!(largest(&tied).map(|d| d.id.as_str()), Some("d1"));
    }

    #[test]
    fn test_ledger_save_and_delete() {
        let mut ledger = DebtLedger::from_records(sample());

        let saved = ledger
            .save(DebtDraft::new("亲戚借款", "25000", "5000", DebtCategory::Personal))
            .clone();
        assert_eq!(saved.percentage, 20);
        assert_eq!(saved.remaining, 20000.0);
        assert_eq!(ledger.records().len(), 4);

        let edited = ledger
            .save(
                DebtDraft::new("亲戚借款", "25000", "25000", DebtCategory::Personal)
                    .with_id(saved.id.clone()),
            )
            .clone();
        assert_eq!(edited.id, saved.id);
        assert_eq!(edited.remaining, 0.0);
        assert_eq!(ledger.records().len(), 4);

        assert!(ledger.delete(&saved.id));
        assert!(!ledger.delete(&saved.id));
        assert_eq!(shares(ledger.records()), vec![50, 30, 20]);
        assert_eq!(ledger.find_by_name("南京银行"), None);
    }
}
