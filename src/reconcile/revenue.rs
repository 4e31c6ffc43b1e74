use std::collections::HashMap;

use crate::models::LedgerEntry;
use crate::reconcile::group::ClientGroups;
use crate::reconcile::matcher::Matcher;
use crate::reconcile::normalize::{client_key, ClientKey};

/// Paid invoices indexed by client key, built once per stats build.
#[derive(Debug, Default)]
pub struct RevenueIndex<'a> {
    by_client: HashMap<ClientKey, Vec<&'a LedgerEntry>>,
    collected: usize,
}

impl<'a> RevenueIndex<'a> {
    /// Keep only paid invoices; quotes and unpaid entries never count.
    pub fn new(entries: &'a [LedgerEntry]) -> Self {
        let mut by_client: HashMap<ClientKey, Vec<&'a LedgerEntry>> = HashMap::new();
        let mut collected = 0;
        for entry in entries.iter().filter(|e| e.is_collected()) {
            by_client
                .entry(client_key(&entry.client_display_name))
                .or_default()
                .push(entry);
            collected += 1;
        }
        Self {
            by_client,
            collected,
        }
    }

    pub fn entries_for(&self, key: &ClientKey) -> &[&'a LedgerEntry] {
        if key.is_empty() {
            return &[];
        }
        self.by_client.get(key).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Sum of the client's paid invoices accepted by `matcher`.
    pub fn paid_amount(&self, key: &ClientKey, matcher: &Matcher) -> f64 {
        self.entries_for(key)
            .iter()
            .filter(|entry| matcher.accepts(&entry.title))
            .map(|entry| entry.total_amount)
            .sum()
    }

    /// Number of paid invoices in the index.
    pub fn collected_count(&self) -> usize {
        self.collected
    }

    /// Paid invoices whose client has no project at all.
    pub fn orphaned_count(&self, groups: &ClientGroups<'_>) -> usize {
        self.by_client
            .iter()
            .filter(|(key, _)| !groups.contains_key(key))
            .map(|(_, entries)| entries.len())
            .sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn paid(number: &str, client: &str, title: &str, total: f64) -> LedgerEntry {
        LedgerEntry::new(number, "invoice", client, title, "paid", total)
    }

    #[test]
    fn only_paid_invoices_are_indexed() {
        let entries = vec![
            paid("1", "Acme", "Website", 100.0),
            LedgerEntry::new("2", "invoice", "Acme", "Website", "sent", 200.0),
            LedgerEntry::new("3", "quote", "Acme", "Website", "paid", 300.0),
            LedgerEntry::new("4", "invoice", "Acme", "Website", "overdue", 400.0),
        ];
        let index = RevenueIndex::new(&entries);
        assert_eq!(index.collected_count(), 1);
        assert_eq!(index.paid_amount(&client_key("acme"), &Matcher::Any), 100.0);
    }

    #[test]
    fn client_name_is_normalized() {
        let entries = vec![paid("1", "  ACME ", "x", 50.0), paid("2", "acme", "y", 25.0)];
        let index = RevenueIndex::new(&entries);
        assert_eq!(index.paid_amount(&client_key("Acme"), &Matcher::Any), 75.0);
    }

    #[test]
    fn title_matcher_filters_entries() {
        let entries = vec![
            paid("1", "Acme", "Website phase 1", 500.0),
            paid("2", "Acme", "Logo", 120.0),
        ];
        let index = RevenueIndex::new(&entries);
        let matcher = Matcher::TitleContains("website".into());
        assert_eq!(index.paid_amount(&client_key("acme"), &matcher), 500.0);
    }

    #[test]
    fn empty_key_matches_nothing() {
        let entries = vec![paid("1", "", "Website", 500.0)];
        let index = RevenueIndex::new(&entries);
        assert_eq!(index.paid_amount(&ClientKey::default(), &Matcher::Any), 0.0);
    }
}
