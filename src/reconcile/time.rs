use std::collections::HashMap;

use crate::models::WorkSession;

/// Total tracked seconds per project id. Sessions without a project id are
/// skipped; negative durations count as zero.
pub fn aggregate(sessions: &[WorkSession]) -> HashMap<String, i64> {
    let mut totals: HashMap<String, i64> = HashMap::new();
    for session in sessions {
        if let Some(project_id) = session.project_key() {
            *totals.entry(project_id.to_string()).or_insert(0) += session.duration_seconds.max(0);
        }
    }
    totals
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn day() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 3, 2).unwrap()
    }

    #[test]
    fn sums_by_project_id() {
        let sessions = vec![
            WorkSession::new("s1", "P1", 1800, day()),
            WorkSession::new("s2", "P1", 3600, day()),
            WorkSession::new("s3", "P2", 60, day()),
        ];
        let totals = aggregate(&sessions);
        assert_eq!(totals.get("P1"), Some(&5400));
        assert_eq!(totals.get("P2"), Some(&60));
    }

    #[test]
    fn missing_or_blank_project_is_skipped() {
        let mut orphan = WorkSession::new("s1", "P1", 100, day());
        orphan.project_id = None;
        let blank = WorkSession::new("s2", "  ", 200, day());
        let totals = aggregate(&[orphan, blank]);
        assert!(totals.is_empty());
    }

    #[test]
    fn negative_duration_counts_as_zero() {
        let sessions = vec![
            WorkSession::new("s1", "P1", 600, day()),
            WorkSession::new("s2", "P1", -300, day()),
        ];
        assert_eq!(aggregate(&sessions).get("P1"), Some(&600));
    }
}
