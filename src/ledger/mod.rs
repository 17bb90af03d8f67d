pub mod debt;
pub mod models;

pub use debt::DebtLedger;
pub use models::{DebtCategory, DebtDraft, DebtId, DebtRecord, LedgerTotals};
