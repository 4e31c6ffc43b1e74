use std::collections::HashMap;

use crate::models::{Project, WorkSession};
use crate::reconcile::StatsReport;
use crate::sessions::format_duration;

const NAME_WIDTH: usize = 28;

/// Render per-project stats and the totals line as a plain-text table.
///
/// Rows follow the report's project-id order; names come from `projects`
/// and fall back to the id for projects not in the list.
pub fn render_stats(report: &StatsReport, projects: &[Project]) -> String {
    let names: HashMap<&str, &str> = projects
        .iter()
        .map(|p| (p.id.as_str(), p.display_name.as_str()))
        .collect();

    let mut content = String::new();

    // Header
    content.push_str(&format!(
        "{:<width$} {:>12} {:>12} {:>12} {:>8}\n",
        "Project",
        "Paid",
        "Spent",
        "Net",
        "Hours",
        width = NAME_WIDTH
    ));
    content.push_str(&format!("{}\n", "-".repeat(NAME_WIDTH + 48)));

    // One row per project
    for (id, stat) in &report.projects {
        let name = names.get(id.as_str()).copied().unwrap_or(id.as_str());
        content.push_str(&format!(
            "{:<width$} {:>12.2} {:>12.2} {:>12.2} {:>8}\n",
            truncate(name, NAME_WIDTH),
            stat.paid_amount,
            stat.spent_amount,
            stat.net_amount(),
            format_duration(stat.time_tracked_seconds),
            width = NAME_WIDTH
        ));
    }

    // Totals
    let totals = &report.totals;
    content.push_str(&format!("{}\n", "-".repeat(NAME_WIDTH + 48)));
    content.push_str(&format!(
        "{:<width$} {:>12.2} {:>12.2} {:>12.2} {:>8}\n",
        format!("Total ({} projects)", totals.project_count),
        totals.total_paid_amount,
        totals.total_spent_amount,
        totals.total_paid_amount - totals.total_spent_amount,
        format_duration(totals.total_time_tracked_seconds),
        width = NAME_WIDTH
    ));

    content
}

/// Render one project's figures as labelled lines.
pub fn render_project(report: &StatsReport, project: &Project) -> String {
    let stat = report.stat_or_default(&project.id);

    let mut content = String::new();
    content.push_str(&format!("{} ({})\n", project.display_name, project.id));
    content.push_str(&format!("  Client:  {}\n", project.client_display_label));
    content.push_str(&format!("  Paid:    {:.2}\n", stat.paid_amount));
    content.push_str(&format!("  Spent:   {:.2}\n", stat.spent_amount));
    content.push_str(&format!("  Net:     {:.2}\n", stat.net_amount()));
    content.push_str(&format!("  Tracked: {}\n", format_duration(stat.time_tracked_seconds)));
    if let Some(rate) = stat.effective_hourly_rate() {
        content.push_str(&format!("  Rate:    {:.2}/h\n", rate));
    }

    content
}

/// List sessions, newest first.
pub fn render_sessions(sessions: &[WorkSession]) -> String {
    let mut sorted: Vec<&WorkSession> = sessions.iter().collect();
    sorted.sort_by(|a, b| b.date.cmp(&a.date).then_with(|| a.id.cmp(&b.id)));

    let mut content = String::new();
    for session in sorted {
        content.push_str(&format!(
            "{}  {:<12} {:>8}  {}\n",
            session.date.format("%Y-%m-%d"),
            session.project_id.as_deref().unwrap_or("-"),
            format_duration(session.duration_seconds),
            session.id
        ));
    }

    content
}

fn truncate(text: &str, width: usize) -> String {
    if text.chars().count() <= width {
        return text.to_string();
    }
    let mut cut: String = text.chars().take(width.saturating_sub(1)).collect();
    cut.push('…');
    cut
}
