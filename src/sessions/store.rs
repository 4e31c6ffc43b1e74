use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::{debug, info, warn};

use crate::error::{StoreError, StoreResult};
use crate::models::WorkSession;

/// Fixed name the session collection is stored under.
pub const NAMESPACE_KEY: &str = "time-tracker-sessions";

/// The store's contents at one point in time.
#[derive(Debug, Clone, Default)]
pub struct SessionSnapshot {
    /// Bumped on every published change.
    pub version: u64,
    pub sessions: Arc<Vec<WorkSession>>,
}

/// Process-wide handle to the persisted work sessions.
///
/// Open it once at startup and clone it to every reader and writer. Readers
/// pull with [`SessionStore::snapshot`] or wait on [`SessionStore::subscribe`];
/// writes made by other processes show up after the next [`SessionStore::refresh`],
/// which [`SessionStore::spawn_poller`] runs on a timer.
#[derive(Debug, Clone)]
pub struct SessionStore {
    inner: Arc<Inner>,
}

#[derive(Debug)]
struct Inner {
    path: PathBuf,
    tx: watch::Sender<SessionSnapshot>,
}

impl SessionStore {
    /// Open (or create) the store in `dir`.
    pub fn open(dir: &Path) -> StoreResult<Self> {
        fs::create_dir_all(dir).map_err(|source| StoreError::Io {
            path: dir.to_path_buf(),
            source,
        })?;

        let path = dir.join(format!("{NAMESPACE_KEY}.json"));
        let sessions = read_sessions(&path)?;
        info!(path = %path.display(), sessions = sessions.len(), "opened session store");

        let (tx, _) = watch::channel(SessionSnapshot {
            version: 0,
            sessions: Arc::new(sessions),
        });

        Ok(Self {
            inner: Arc::new(Inner { path, tx }),
        })
    }

    pub fn path(&self) -> &Path {
        &self.inner.path
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        self.inner.tx.borrow().clone()
    }

    pub fn version(&self) -> u64 {
        self.inner.tx.borrow().version
    }

    /// Receiver that is notified whenever a new snapshot is published.
    pub fn subscribe(&self) -> watch::Receiver<SessionSnapshot> {
        self.inner.tx.subscribe()
    }

    /// Insert `session`, replacing any session with the same id.
    pub fn record(&self, session: WorkSession) -> StoreResult<()> {
        self.update(|sessions| {
            match sessions.iter_mut().find(|s| s.id == session.id) {
                Some(existing) => *existing = session,
                None => sessions.push(session),
            }
            Ok(true)
        })?;
        Ok(())
    }

    /// Add `session`, refusing it if a session with the same id is stored.
    pub fn insert(&self, session: WorkSession) -> StoreResult<()> {
        self.update(|sessions| {
            if sessions.iter().any(|s| s.id == session.id) {
                return Err(StoreError::DuplicateSession(session.id));
            }
            sessions.push(session);
            Ok(true)
        })?;
        Ok(())
    }

    /// Remove the session with `id`. Returns whether one was removed.
    pub fn remove(&self, id: &str) -> StoreResult<bool> {
        self.update(|sessions| {
            let before = sessions.len();
            sessions.retain(|s| s.id != id);
            Ok(sessions.len() != before)
        })
    }

    /// `base` if no known session uses it, otherwise the first free
    /// `base-2`, `base-3`, ...
    pub fn unused_id(&self, base: &str) -> String {
        let snapshot = self.snapshot();
        let taken = |id: &str| snapshot.sessions.iter().any(|s| s.id == id);

        let mut candidate = base.to_string();
        let mut suffix = 1;
        while taken(&candidate) {
            suffix += 1;
            candidate = format!("{base}-{suffix}");
        }
        candidate
    }

    /// Re-read the file and publish its contents if they differ from the
    /// current snapshot. Returns whether a new snapshot was published.
    pub fn refresh(&self) -> StoreResult<bool> {
        let sessions = read_sessions(&self.inner.path)?;
        let changed = self.inner.tx.send_if_modified(|snapshot| {
            if *snapshot.sessions == sessions {
                return false;
            }
            snapshot.version += 1;
            snapshot.sessions = Arc::new(sessions);
            true
        });
        if changed {
            debug!(version = self.version(), "session store changed on disk");
        }
        Ok(changed)
    }

    /// Run [`SessionStore::refresh`] every `period` until the handle is aborted.
    pub fn spawn_poller(&self, period: Duration) -> JoinHandle<()> {
        let store = self.clone();
        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            // The first tick completes immediately; the store was just loaded.
            ticker.tick().await;
            loop {
                ticker.tick().await;
                if let Err(err) = store.refresh() {
                    warn!(error = %err, "session poll failed, retrying next tick");
                }
            }
        })
    }

    /// Re-read the file, apply `edit` to what is on disk and, if it reports a
    /// change, persist the result and publish it as a new version. Sessions
    /// written by other processes since the last refresh are kept.
    fn update<F>(&self, edit: F) -> StoreResult<bool>
    where
        F: FnOnce(&mut Vec<WorkSession>) -> StoreResult<bool>,
    {
        let path = &self.inner.path;
        let mut outcome = Ok(false);
        self.inner.tx.send_if_modified(|snapshot| {
            let mut sessions = match read_sessions(path) {
                Ok(sessions) => sessions,
                Err(err) => {
                    outcome = Err(err);
                    return false;
                }
            };
            let stale = *snapshot.sessions != sessions;

            match edit(&mut sessions) {
                Ok(true) => {}
                Ok(false) => {
                    // Nothing to write, but the file moved on since the last read.
                    if stale {
                        snapshot.version += 1;
                        snapshot.sessions = Arc::new(sessions);
                    }
                    return stale;
                }
                Err(err) => {
                    outcome = Err(err);
                    return false;
                }
            }

            match write_sessions(path, &sessions) {
                Ok(()) => {
                    snapshot.version += 1;
                    snapshot.sessions = Arc::new(sessions);
                    outcome = Ok(true);
                    true
                }
                Err(err) => {
                    outcome = Err(err);
                    false
                }
            }
        });
        outcome
    }
}

fn read_sessions(path: &Path) -> StoreResult<Vec<WorkSession>> {
    let bytes = match fs::read(path) {
        Ok(bytes) => bytes,
        Err(err) if err.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
        Err(source) => {
            return Err(StoreError::Io {
                path: path.to_path_buf(),
                source,
            });
        }
    };

    if bytes.iter().all(u8::is_ascii_whitespace) {
        return Ok(Vec::new());
    }

    serde_json::from_slice(&bytes).map_err(|source| StoreError::Json {
        path: path.to_path_buf(),
        source,
    })
}

// Written to a sibling file and renamed so pollers never see a partial write.
fn write_sessions(path: &Path, sessions: &[WorkSession]) -> StoreResult<()> {
    let json = serde_json::to_vec_pretty(sessions).map_err(|source| StoreError::Json {
        path: path.to_path_buf(),
        source,
    })?;

    let tmp = path.with_extension("json.tmp");
    fs::write(&tmp, json).map_err(|source| StoreError::Io {
        path: tmp.clone(),
        source,
    })?;
    fs::rename(&tmp, path).map_err(|source| StoreError::Io {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn session(id: &str, project: &str, secs: i64) -> WorkSession {
        WorkSession::new(id, project, secs, NaiveDate::from_ymd_opt(2026, 4, 1).unwrap())
    }

    #[test]
    fn missing_file_opens_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = SessionStore::open(dir.path()).unwrap();
        let snapshot = store.snapshot();
        assert_eq!(snapshot.version, 0);
        assert!(snapshot.sessions.is_empty());
        assert!(store.path().ends_with("time-tracker-sessions.json"));
    }

    #[test]
    fn record_replaces_same_id() {
        let dir = tempfile::tempdir().unwrap();
        let store = SessionStore::open(dir.path()).unwrap();
        store.record(session("s1", "P1", 60)).unwrap();
        store.record(session("s1", "P1", 120)).unwrap();

        let snapshot = store.snapshot();
        assert_eq!(snapshot.version, 2);
        assert_eq!(snapshot.sessions.len(), 1);
        assert_eq!(snapshot.sessions[0].duration_seconds, 120);
    }

    #[test]
    fn remove_unknown_id_publishes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let store = SessionStore::open(dir.path()).unwrap();
        assert!(!store.remove("nope").unwrap());
        assert_eq!(store.version(), 0);
    }

    #[test]
    fn insert_refuses_a_taken_id() {
        let dir = tempfile::tempdir().unwrap();
        let store = SessionStore::open(dir.path()).unwrap();
        store.insert(session("s1", "P1", 60)).unwrap();

        let err = store.insert(session("s1", "P2", 120)).unwrap_err();
        assert!(matches!(err, StoreError::DuplicateSession(ref id) if id == "s1"));

        let snapshot = store.snapshot();
        assert_eq!(snapshot.version, 1);
        assert_eq!(snapshot.sessions[0].duration_seconds, 60);
    }

    #[test]
    fn unused_id_appends_a_counter() {
        let dir = tempfile::tempdir().unwrap();
        let store = SessionStore::open(dir.path()).unwrap();
        assert_eq!(store.unused_id("ws-1"), "ws-1");

        store.record(session("ws-1", "P1", 60)).unwrap();
        store.record(session("ws-1-2", "P1", 60)).unwrap();
        assert_eq!(store.unused_id("ws-1"), "ws-1-3");
    }

    #[test]
    fn corrupt_file_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("time-tracker-sessions.json"), b"{not json").unwrap();
        assert!(matches!(
            SessionStore::open(dir.path()),
            Err(StoreError::Json { .. })
        ));
    }
}
