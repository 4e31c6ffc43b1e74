use serde::Serialize;

/// Derived financial figures for one project. Rebuilt on every input change.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ProjectStat {
    pub project_id: String,
    pub paid_amount: f64,
    pub spent_amount: f64,
    pub time_tracked_seconds: i64,
}

impl ProjectStat {
    pub fn net_amount(&self) -> f64 {
        self.paid_amount - self.spent_amount
    }

    pub fn hours_tracked(&self) -> f64 {
        self.time_tracked_seconds as f64 / 3600.0
    }

    /// Collected revenue per tracked hour, when any time has been tracked.
    pub fn effective_hourly_rate(&self) -> Option<f64> {
        let hours = self.hours_tracked();
        if hours > 0.0 {
            Some(self.paid_amount / hours)
        } else {
            None
        }
    }
}

/// Running sums over every project in a build.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct GlobalTotals {
    /// Sum of per-project paid amounts. Exceeds the invoiced total when an
    /// invoice title matches several projects of the same client.
    pub total_paid_amount: f64,
    pub total_spent_amount: f64,
    pub total_time_tracked_seconds: i64,
    pub project_count: usize,
}
