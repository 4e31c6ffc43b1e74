use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LedgerKind {
    Quote,
    Invoice,
    Other,
}

impl LedgerKind {
    pub fn parse(raw: &str) -> Self {
        match raw.trim().to_lowercase().as_str() {
            "quote" => LedgerKind::Quote,
            "invoice" => LedgerKind::Invoice,
            _ => LedgerKind::Other,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LedgerStatus {
    Draft,
    Sent,
    Paid,
    Overdue,
    Other,
}

impl LedgerStatus {
    pub fn parse(raw: &str) -> Self {
        match raw.trim().to_lowercase().as_str() {
            "draft" => LedgerStatus::Draft,
            "sent" => LedgerStatus::Sent,
            "paid" => LedgerStatus::Paid,
            "overdue" => LedgerStatus::Overdue,
            _ => LedgerStatus::Other,
        }
    }
}

/// An invoice or quote as stored by the invoicing screens.
///
/// `kind` and `status` keep the raw text from the store; use [`LedgerEntry::kind`]
/// and [`LedgerEntry::status`] to classify them.
#[derive(sqlx::FromRow, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LedgerEntry {
    pub number: String,
    #[sqlx(rename = "kind")]
    pub kind_raw: String,
    /// Plain client name, without the company suffix.
    pub client_display_name: String,
    pub title: String,
    #[sqlx(rename = "status")]
    pub status_raw: String,
    pub total_amount: f64,
}

impl LedgerEntry {
    pub fn new(
        number: impl Into<String>,
        kind: impl Into<String>,
        client_display_name: impl Into<String>,
        title: impl Into<String>,
        status: impl Into<String>,
        total_amount: f64,
    ) -> Self {
        Self {
            number: number.into(),
            kind_raw: kind.into(),
            client_display_name: client_display_name.into(),
            title: title.into(),
            status_raw: status.into(),
            total_amount,
        }
    }

    pub fn kind(&self) -> LedgerKind {
        LedgerKind::parse(&self.kind_raw)
    }

    pub fn status(&self) -> LedgerStatus {
        LedgerStatus::parse(&self.status_raw)
    }

    /// Only paid invoices count as collected revenue; quotes never do.
    pub fn is_collected(&self) -> bool {
        self.kind() == LedgerKind::Invoice && self.status() == LedgerStatus::Paid
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classification_ignores_case_and_padding() {
        let entry = LedgerEntry::new("INV-1", " Invoice ", "Acme", "Website", "PAID", 10.0);
        assert_eq!(entry.kind(), LedgerKind::Invoice);
        assert_eq!(entry.status(), LedgerStatus::Paid);
        assert!(entry.is_collected());
    }

    #[test]
    fn paid_quote_is_not_collected() {
        let entry = LedgerEntry::new("Q-1", "quote", "Acme", "Website", "paid", 10.0);
        assert!(!entry.is_collected());
    }

    #[test]
    fn unknown_status_is_other() {
        assert_eq!(LedgerStatus::parse("void"), LedgerStatus::Other);
        assert_eq!(LedgerKind::parse(""), LedgerKind::Other);
    }
}
