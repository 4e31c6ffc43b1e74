use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Failures of the work-session store and of session input parsing.
///
/// The reconciliation engine itself has no error type; these only surface
/// from the adapters around it.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("session store I/O failed for {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("session store {} is not valid JSON: {source}", .path.display())]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("a session with id '{0}' already exists")]
    DuplicateSession(String),

    #[error("invalid duration '{0}' (expected seconds, H:MM or H:MM:SS)")]
    InvalidDuration(String),

    #[error("invalid date '{0}' (expected YYYY-MM-DD)")]
    InvalidDate(String),
}

pub type StoreResult<T> = Result<T, StoreError>;
