mod client;
mod project;
mod ledger_entry;
mod expense;
mod work_session;
mod project_stat;

pub use client::Client;
pub use project::Project;
pub use ledger_entry::{LedgerEntry, LedgerKind, LedgerStatus};
pub use expense::{ExpenseTransaction, TransactionKind};
pub use work_session::WorkSession;
pub use project_stat::{GlobalTotals, ProjectStat};
