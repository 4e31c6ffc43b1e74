use std::collections::BTreeMap;

use serde::Serialize;
use tracing::debug;

use crate::models::{Client, ExpenseTransaction, GlobalTotals, LedgerEntry, Project, ProjectStat, WorkSession};
use crate::reconcile::expense::ExpenseIndex;
use crate::reconcile::group::group_with_clients;
use crate::reconcile::matcher::Matcher;
use crate::reconcile::revenue::RevenueIndex;
use crate::reconcile::time::aggregate;

/// The five source collections a build reads, borrowed as a snapshot.
#[derive(Debug, Clone, Copy)]
pub struct StatsInputs<'a> {
    pub clients: &'a [Client],
    pub projects: &'a [Project],
    pub ledger_entries: &'a [LedgerEntry],
    pub expenses: &'a [ExpenseTransaction],
    pub sessions: &'a [WorkSession],
}

impl StatsInputs<'_> {
    pub fn build(&self) -> StatsReport {
        build(
            self.clients,
            self.projects,
            self.ledger_entries,
            self.expenses,
            self.sessions,
        )
    }
}

/// Per-project stats keyed by project id, plus totals across all projects.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct StatsReport {
    pub projects: BTreeMap<String, ProjectStat>,
    pub totals: GlobalTotals,
}

impl StatsReport {
    pub fn stat(&self, project_id: &str) -> Option<&ProjectStat> {
        self.projects.get(project_id)
    }

    /// Stats for `project_id`, or zeroes if the project is unknown.
    pub fn stat_or_default(&self, project_id: &str) -> ProjectStat {
        self.stat(project_id).cloned().unwrap_or_else(|| ProjectStat {
            project_id: project_id.to_string(),
            ..ProjectStat::default()
        })
    }
}

/// Derive paid, spent and tracked time for every project.
///
/// Never fails: ledger entries and expenses that cannot be attributed are
/// left out of every project, and projects with nothing attributed get zeroes.
pub fn build(
    clients: &[Client],
    projects: &[Project],
    ledger_entries: &[LedgerEntry],
    expenses: &[ExpenseTransaction],
    sessions: &[WorkSession],
) -> StatsReport {
    let groups = group_with_clients(clients, projects);
    let revenue = RevenueIndex::new(ledger_entries);
    let spending = ExpenseIndex::new(expenses, ledger_entries);
    let tracked = aggregate(sessions);

    let mut stats = BTreeMap::new();
    for assignment in groups.assignments() {
        let project = assignment.project;
        let matcher = Matcher::for_project(project, assignment.mode);
        let stat = ProjectStat {
            project_id: project.id.clone(),
            paid_amount: revenue.paid_amount(&assignment.key, &matcher),
            spent_amount: spending.spent_amount(&assignment.key, &matcher),
            time_tracked_seconds: tracked.get(project.id.as_str()).copied().unwrap_or(0),
        };
        stats.insert(stat.project_id.clone(), stat);
    }

    let mut totals = GlobalTotals::default();
    for stat in stats.values() {
        totals.total_paid_amount += stat.paid_amount;
        totals.total_spent_amount += stat.spent_amount;
        totals.total_time_tracked_seconds += stat.time_tracked_seconds;
        totals.project_count += 1;
    }

    debug!(
        projects = totals.project_count,
        clients = groups.client_count(),
        paid_invoices = revenue.collected_count(),
        orphaned_invoices = revenue.orphaned_count(&groups),
        unresolved_expenses = spending.unresolved_count(),
        "rebuilt project stats"
    );

    StatsReport {
        projects: stats,
        totals,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn empty_inputs_give_empty_report() {
        let report = build(&[], &[], &[], &[], &[]);
        assert!(report.projects.is_empty());
        assert_eq!(report.totals, GlobalTotals::default());
    }

    #[test]
    fn project_without_records_has_zero_stats() {
        let projects = vec![Project::new("P1", "Website", "c1", "Acme - Acme Inc")];
        let report = build(&[], &projects, &[], &[], &[]);
        let stat = report.stat("P1").unwrap();
        assert_eq!(stat.paid_amount, 0.0);
        assert_eq!(stat.spent_amount, 0.0);
        assert_eq!(stat.time_tracked_seconds, 0);
        assert_eq!(report.totals.project_count, 1);
    }

    #[test]
    fn unknown_project_defaults_to_zero() {
        let report = build(&[], &[], &[], &[], &[]);
        let stat = report.stat_or_default("missing");
        assert_eq!(stat.project_id, "missing");
        assert_eq!(stat.paid_amount, 0.0);
    }

    #[test]
    fn sessions_for_unknown_projects_stay_out_of_totals() {
        let day = NaiveDate::from_ymd_opt(2026, 1, 5).unwrap();
        let projects = vec![Project::new("P1", "Website", "c1", "Acme")];
        let sessions = vec![
            WorkSession::new("s1", "P1", 1200, day),
            WorkSession::new("s2", "P9", 9000, day),
        ];
        let report = build(&[], &projects, &[], &[], &sessions);
        assert_eq!(report.totals.total_time_tracked_seconds, 1200);
    }

    #[test]
    fn inputs_struct_matches_free_function() {
        let projects = vec![Project::new("P1", "Website", "c1", "Acme")];
        let entries = vec![LedgerEntry::new("1", "invoice", "Acme", "", "paid", 10.0)];
        let inputs = StatsInputs {
            clients: &[],
            projects: &projects,
            ledger_entries: &entries,
            expenses: &[],
            sessions: &[],
        };
        assert_eq!(inputs.build(), build(&[], &projects, &entries, &[], &[]));
    }
}
