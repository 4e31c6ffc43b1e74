//! Per-project revenue, spend and tracked time for a small service business.
//!
//! [`reconcile`] holds the pure stats engine. [`db`] and [`sessions`] load its
//! inputs, and [`report`] renders its output for the command line.

pub mod config;
pub mod db;
pub mod error;
pub mod models;
pub mod reconcile;
pub mod report;
pub mod sessions;

pub use error::{StoreError, StoreResult};
pub use reconcile::{build, StatsCache, StatsInputs, StatsReport};
pub use sessions::SessionStore;
