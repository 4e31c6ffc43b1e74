//! Project financial reconciliation.
//!
//! Invoices, expenses and work sessions are attributed to projects and summed
//! into one [`ProjectStat`](crate::models::ProjectStat) per project. Invoices
//! and expenses carry no project id, so they are joined through the client's
//! name and, when a client has several projects, through the invoice title.

pub mod normalize;
pub mod group;
pub mod matcher;
pub mod revenue;
pub mod expense;
pub mod time;
pub mod stats;
pub mod cache;

pub use cache::{fingerprint, Fingerprint, StatsCache};
pub use group::{group, group_with_clients, DisambiguationMode};
pub use matcher::Matcher;
pub use normalize::{client_key, label_key, normalize, ClientKey};
pub use stats::{build, StatsInputs, StatsReport};
