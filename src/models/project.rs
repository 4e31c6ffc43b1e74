use serde::{Deserialize, Serialize};

#[derive(sqlx::FromRow, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Project {
    pub id: String,
    pub display_name: String,
    pub client_id: String,
    /// Composite `"<name> - <company>"` label copied from the client at creation time.
    pub client_display_label: String,
}

impl Project {
    pub fn new(
        id: impl Into<String>,
        display_name: impl Into<String>,
        client_id: impl Into<String>,
        client_display_label: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            display_name: display_name.into(),
            client_id: client_id.into(),
            client_display_label: client_display_label.into(),
        }
    }
}
