use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A stretch of tracked work, keyed directly by project id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkSession {
    pub id: String,
    #[serde(default)]
    pub project_id: Option<String>,
    pub duration_seconds: i64,
    pub date: NaiveDate,
}

impl WorkSession {
    pub fn new(
        id: impl Into<String>,
        project_id: impl Into<String>,
        duration_seconds: i64,
        date: NaiveDate,
    ) -> Self {
        Self {
            id: id.into(),
            project_id: Some(project_id.into()),
            duration_seconds,
            date,
        }
    }

    /// The project id, if present and not blank.
    pub fn project_key(&self) -> Option<&str> {
        self.project_id
            .as_deref()
            .filter(|id| !id.trim().is_empty())
    }
}
