#![allow(dead_code)]
use chrono::NaiveDate;
use project_ledger::models::{Client, ExpenseTransaction, LedgerEntry, Project, WorkSession};

pub fn client(id: &str, name: &str) -> Client {
    Client::new(id, name)
}

/// Project whose client label is `"<client> - <client> Inc"`.
pub fn project(id: &str, name: &str, client_id: &str, client: &str) -> Project {
    Project::new(id, name, client_id, format!("{client} - {client} Inc"))
}

pub fn paid_invoice(number: &str, client: &str, title: &str, total: f64) -> LedgerEntry {
    LedgerEntry::new(number, "invoice", client, title, "paid", total)
}

pub fn invoice(number: &str, client: &str, title: &str, status: &str, total: f64) -> LedgerEntry {
    LedgerEntry::new(number, "invoice", client, title, status, total)
}

pub fn expense(amount: f64, ledger_number: &str) -> ExpenseTransaction {
    ExpenseTransaction::new("expense", amount, Some(ledger_number))
}

pub fn day(date: &str) -> NaiveDate {
    NaiveDate::parse_from_str(date, "%Y-%m-%d").expect("valid test date")
}

pub fn session(id: &str, project_id: &str, secs: i64) -> WorkSession {
    WorkSession::new(id, project_id, secs, day("2026-05-04"))
}
