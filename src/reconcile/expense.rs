use std::collections::HashMap;

use crate::models::{ExpenseTransaction, LedgerEntry};
use crate::reconcile::matcher::Matcher;
use crate::reconcile::normalize::{client_key, ClientKey};

/// An expense together with the ledger entry it was booked against.
#[derive(Debug, Clone, Copy)]
pub struct LinkedExpense<'a> {
    pub expense: &'a ExpenseTransaction,
    pub entry: &'a LedgerEntry,
}

/// Expenses resolved through their linked ledger entry and indexed by the
/// entry's client key.
#[derive(Debug, Default)]
pub struct ExpenseIndex<'a> {
    by_client: HashMap<ClientKey, Vec<LinkedExpense<'a>>>,
    unresolved: usize,
}

impl<'a> ExpenseIndex<'a> {
    pub fn new(expenses: &'a [ExpenseTransaction], entries: &'a [LedgerEntry]) -> Self {
        let mut by_number: HashMap<&str, &'a LedgerEntry> = HashMap::new();
        for entry in entries {
            // Numbers are unique; on dirty data the first entry wins.
            by_number.entry(entry.number.trim()).or_insert(entry);
        }

        let mut by_client: HashMap<ClientKey, Vec<LinkedExpense<'a>>> = HashMap::new();
        let mut unresolved = 0;
        for expense in expenses.iter().filter(|e| e.is_expense()) {
            let entry = expense
                .linked_ledger_number
                .as_deref()
                .and_then(|number| by_number.get(number.trim()).copied());
            match entry {
                Some(entry) => by_client
                    .entry(client_key(&entry.client_display_name))
                    .or_default()
                    .push(LinkedExpense { expense, entry }),
                None => unresolved += 1,
            }
        }

        Self {
            by_client,
            unresolved,
        }
    }

    pub fn expenses_for(&self, key: &ClientKey) -> &[LinkedExpense<'a>] {
        if key.is_empty() {
            return &[];
        }
        self.by_client.get(key).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Sum of the client's linked expenses whose ledger title `matcher` accepts.
    /// Never negative.
    pub fn spent_amount(&self, key: &ClientKey, matcher: &Matcher) -> f64 {
        let total: f64 = self
            .expenses_for(key)
            .iter()
            .filter(|linked| matcher.accepts(&linked.entry.title))
            .map(|linked| linked.expense.amount)
            .sum();
        total.max(0.0)
    }

    /// Expenses dropped because their ledger number did not resolve.
    pub fn unresolved_count(&self) -> usize {
        self.unresolved
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entries() -> Vec<LedgerEntry> {
        vec![
            LedgerEntry::new("INV-1", "invoice", "Acme", "Website build", "sent", 900.0),
            LedgerEntry::new("Q-7", "quote", "Acme", "Logo concepts", "draft", 300.0),
        ]
    }

    #[test]
    fn resolves_any_ledger_kind_and_status() {
        let entries = entries();
        let expenses = vec![
            ExpenseTransaction::new("expense", 40.0, Some("INV-1")),
            ExpenseTransaction::new("expense", 15.0, Some(" Q-7 ")),
        ];
        let index = ExpenseIndex::new(&expenses, &entries);
        assert_eq!(index.spent_amount(&client_key("acme"), &Matcher::Any), 55.0);
        assert_eq!(index.unresolved_count(), 0);
    }

    #[test]
    fn income_and_unlinked_transactions_are_ignored() {
        let entries = entries();
        let expenses = vec![
            ExpenseTransaction::new("income", 500.0, Some("INV-1")),
            ExpenseTransaction::new("expense", 20.0, None),
            ExpenseTransaction::new("expense", 30.0, Some("INV-404")),
        ];
        let index = ExpenseIndex::new(&expenses, &entries);
        assert_eq!(index.spent_amount(&client_key("acme"), &Matcher::Any), 0.0);
        assert_eq!(index.unresolved_count(), 2);
    }

    #[test]
    fn title_matcher_uses_ledger_title() {
        let entries = entries();
        let expenses = vec![
            ExpenseTransaction::new("expense", 40.0, Some("INV-1")),
            ExpenseTransaction::new("expense", 15.0, Some("Q-7")),
        ];
        let index = ExpenseIndex::new(&expenses, &entries);
        let matcher = Matcher::TitleContains("logo".into());
        assert_eq!(index.spent_amount(&client_key("acme"), &matcher), 15.0);
    }

    #[test]
    fn spend_is_clamped_at_zero() {
        let entries = entries();
        let expenses = vec![
            ExpenseTransaction::new("expense", 10.0, Some("INV-1")),
            ExpenseTransaction::new("expense", -60.0, Some("INV-1")),
        ];
        let index = ExpenseIndex::new(&expenses, &entries);
        assert_eq!(index.spent_amount(&client_key("acme"), &Matcher::Any), 0.0);
    }
}
