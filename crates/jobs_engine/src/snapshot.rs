use std::collections::BTreeSet;

use chrono::{DateTime, Duration, Utc};
use jobs_core::{Job, Repository};
use jobs_logging::{jobs_debug, jobs_warn};
use serde::{Deserialize, Serialize};

use crate::{KeyValueStore, PersistError};

pub const SNAPSHOT_STORAGE_KEY: &str = "jobs-snapshot";

/// How long a fetched job list is served before it is fetched again.
pub const DEFAULT_REVALIDATE_SECS: i64 = 86_400;

/// The job list as of its last successful fetch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobSnapshot {
    pub fetched_at: DateTime<Utc>,
    /// `owner/name` of every repository the fetch covered, in registry order.
    #[serde(default)]
    pub repositories: Vec<String>,
    pub jobs: Vec<Job>,
}

impl JobSnapshot {
    pub fn new(fetched_at: DateTime<Utc>, registry: &[Repository], jobs: Vec<Job>) -> Self {
        Self {
            fetched_at,
            repositories: registry.iter().map(Repository::full_name).collect(),
            jobs,
        }
    }

    pub fn is_fresh(&self, now: DateTime<Utc>, revalidate: Duration) -> bool {
        now - self.fetched_at < revalidate
    }

    /// Whether this snapshot was fetched for the same repositories as
    /// `registry`, in any order.
    pub fn covers(&self, registry: &[Repository]) -> bool {
        let fetched: BTreeSet<&str> = self.repositories.iter().map(String::as_str).collect();
        let wanted: Vec<String> = registry.iter().map(Repository::full_name).collect();
        fetched == wanted.iter().map(String::as_str).collect::<BTreeSet<_>>()
    }
}

/// Loads the stored snapshot. Unreadable or corrupt snapshots are logged and
/// treated as absent.
pub fn load_snapshot(store: &dyn KeyValueStore) -> Option<JobSnapshot> {
    let raw = match store.get(SNAPSHOT_STORAGE_KEY) {
        Ok(Some(raw)) => raw,
        Ok(None) => return None,
        Err(err) => {
            jobs_warn!("Failed to read job snapshot: {}", err);
            return None;
        }
    };
    match serde_json::from_str(&raw) {
        Ok(snapshot) => Some(snapshot),
        Err(err) => {
            jobs_warn!("Discarding corrupt job snapshot: {}", err);
            None
        }
    }
}

/// Returns the stored snapshot only if it was fetched for `registry` and is
/// younger than `revalidate`.
pub fn load_fresh_snapshot(
    store: &dyn KeyValueStore,
    registry: &[Repository],
    now: DateTime<Utc>,
    revalidate: Duration,
) -> Option<JobSnapshot> {
    let snapshot = load_snapshot(store)?;
    if !snapshot.covers(registry) {
        jobs_debug!("Job snapshot was fetched for a different repository list");
        None
    } else if snapshot.is_fresh(now, revalidate) {
        jobs_debug!("Reusing job snapshot from {}", snapshot.fetched_at);
        Some(snapshot)
    } else {
        jobs_debug!("Job snapshot from {} is stale", snapshot.fetched_at);
        None
    }
}

pub fn save_snapshot(
    store: &dyn KeyValueStore,
    snapshot: &JobSnapshot,
) -> Result<(), PersistError> {
    let json =
        serde_json::to_string(snapshot).map_err(|err| PersistError::Encode(err.to_string()))?;
    store.set(SNAPSHOT_STORAGE_KEY, &json)
}
