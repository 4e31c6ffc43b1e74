use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransactionKind {
    Expense,
    Income,
    Other,
}

impl TransactionKind {
    pub fn parse(raw: &str) -> Self {
        match raw.trim().to_lowercase().as_str() {
            "expense" => TransactionKind::Expense,
            "income" => TransactionKind::Income,
            _ => TransactionKind::Other,
        }
    }
}

#[derive(sqlx::FromRow, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExpenseTransaction {
    #[sqlx(rename = "kind")]
    pub kind_raw: String,
    pub amount: f64,
    /// Number of the ledger entry this transaction was booked against, if any.
    pub linked_ledger_number: Option<String>,
}

impl ExpenseTransaction {
    pub fn new(kind: impl Into<String>, amount: f64, linked_ledger_number: Option<&str>) -> Self {
        Self {
            kind_raw: kind.into(),
            amount,
            linked_ledger_number: linked_ledger_number.map(str::to_string),
        }
    }

    pub fn kind(&self) -> TransactionKind {
        TransactionKind::parse(&self.kind_raw)
    }

    pub fn is_expense(&self) -> bool {
        self.kind() == TransactionKind::Expense
    }
}
