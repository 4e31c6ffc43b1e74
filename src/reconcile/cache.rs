use std::sync::Arc;

use sha2::{Digest, Sha256};

use crate::reconcile::stats::{StatsInputs, StatsReport};

/// Content hash over the five source collections.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Fingerprint([u8; 32]);

pub fn fingerprint(inputs: &StatsInputs<'_>) -> Fingerprint {
    let mut hasher = Sha256::new();

    count(&mut hasher, inputs.clients.len());
    for client in inputs.clients {
        text(&mut hasher, &client.id);
        text(&mut hasher, &client.display_name);
    }

    count(&mut hasher, inputs.projects.len());
    for project in inputs.projects {
        text(&mut hasher, &project.id);
        text(&mut hasher, &project.display_name);
        text(&mut hasher, &project.client_id);
        text(&mut hasher, &project.client_display_label);
    }

    count(&mut hasher, inputs.ledger_entries.len());
    for entry in inputs.ledger_entries {
        text(&mut hasher, &entry.number);
        text(&mut hasher, &entry.kind_raw);
        text(&mut hasher, &entry.client_display_name);
        text(&mut hasher, &entry.title);
        text(&mut hasher, &entry.status_raw);
        amount(&mut hasher, entry.total_amount);
    }

    count(&mut hasher, inputs.expenses.len());
    for expense in inputs.expenses {
        text(&mut hasher, &expense.kind_raw);
        amount(&mut hasher, expense.amount);
        optional(&mut hasher, expense.linked_ledger_number.as_deref());
    }

    count(&mut hasher, inputs.sessions.len());
    for session in inputs.sessions {
        text(&mut hasher, &session.id);
        optional(&mut hasher, session.project_id.as_deref());
        hasher.update(session.duration_seconds.to_le_bytes());
        text(&mut hasher, &session.date.to_string());
    }

    Fingerprint(hasher.finalize().into())
}

// Length prefixes keep adjacent fields from running together.
fn count(hasher: &mut Sha256, len: usize) {
    hasher.update((len as u64).to_le_bytes());
}

fn text(hasher: &mut Sha256, value: &str) {
    count(hasher, value.len());
    hasher.update(value.as_bytes());
}

fn amount(hasher: &mut Sha256, value: f64) {
    hasher.update(value.to_bits().to_le_bytes());
}

fn optional(hasher: &mut Sha256, value: Option<&str>) {
    match value {
        Some(value) => {
            hasher.update([1u8]);
            text(hasher, value);
        }
        None => hasher.update([0u8]),
    }
}

/// Memoizes [`StatsInputs::build`] on the inputs' fingerprint. A changed
/// fingerprint triggers a full rebuild; an unchanged one returns the cached report.
#[derive(Debug, Default)]
pub struct StatsCache {
    current: Option<(Fingerprint, Arc<StatsReport>)>,
    builds: u64,
}

impl StatsCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get_or_build(&mut self, inputs: &StatsInputs<'_>) -> Arc<StatsReport> {
        let key = fingerprint(inputs);
        if let Some((cached, report)) = &self.current {
            if *cached == key {
                return Arc::clone(report);
            }
        }

        let report = Arc::new(inputs.build());
        self.builds += 1;
        self.current = Some((key, Arc::clone(&report)));
        report
    }

    /// Number of full rebuilds performed so far.
    pub fn build_count(&self) -> u64 {
        self.builds
    }
}
