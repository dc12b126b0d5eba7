use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use jobs_core::{update, AppState, Job, Msg, Repository, FILTERS_STORAGE_KEY};
use jobs_engine::{
    load_fresh_snapshot, load_snapshot, save_snapshot, EngineEvent, EngineHandle, IssueSource,
    JobSnapshot, KeyValueStore,
};
use jobs_logging::{jobs_info, jobs_warn};

use crate::{EffectRunner, PageLocation};

/// Owns the core state and feeds its effects to the [`EffectRunner`].
pub struct Session {
    state: AppState,
    runner: EffectRunner,
}

impl Session {
    pub fn new(registry: Vec<Repository>, runner: EffectRunner) -> Self {
        Self {
            state: AppState::with_registry(registry),
            runner,
        }
    }

    /// Reconciles the filters with the page query and the saved record.
    pub fn initialize(&mut self) -> bool {
        let query = Some(self.runner.location().query().to_string());
        let stored = match self.runner.store().get(FILTERS_STORAGE_KEY) {
            Ok(stored) => stored,
            Err(err) => {
                jobs_warn!("Failed to read stored filters: {}", err);
                None
            }
        };
        self.dispatch(Msg::Initialize { query, stored })
    }

    /// Applies `msg` and runs its effects. Returns whether a re-render is due.
    pub fn dispatch(&mut self, msg: Msg) -> bool {
        let state = std::mem::take(&mut self.state);
        let (state, effects) = update(state, msg);
        self.state = state;
        self.runner.apply(effects);
        self.state.consume_dirty()
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn location(&self) -> &PageLocation {
        self.runner.location()
    }
}

/// How the job list should be obtained.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JobsPolicy {
    /// Reuse a snapshot younger than the revalidation interval, else fetch.
    Revalidate,
    /// Always fetch.
    Refresh,
    /// Never fetch.
    Offline,
}

/// Loads jobs from the snapshot or the engine, saving fresh fetches.
///
/// When a fetch cannot complete or every repository fails, the last snapshot
/// (however old) is served instead; with no snapshot at all the list is empty.
pub fn load_jobs(
    source: Arc<dyn IssueSource>,
    registry: &[Repository],
    store: &dyn KeyValueStore,
    policy: JobsPolicy,
    revalidate: chrono::Duration,
    wait: Duration,
    now: DateTime<Utc>,
) -> Vec<Job> {
    match policy {
        JobsPolicy::Offline => {
            return load_snapshot(store)
                .map(|snapshot| snapshot.jobs)
                .unwrap_or_else(|| {
                    jobs_warn!("No saved job list available offline");
                    Vec::new()
                });
        }
        JobsPolicy::Revalidate => {
            if let Some(snapshot) = load_fresh_snapshot(store, registry, now, revalidate) {
                return snapshot.jobs;
            }
        }
        JobsPolicy::Refresh => {}
    }

    match fetch_with_engine(source, registry, wait) {
        Some(jobs) => {
            let snapshot = JobSnapshot::new(now, registry, jobs);
            if let Err(err) = save_snapshot(store, &snapshot) {
                jobs_warn!("Failed to save job snapshot: {}", err);
            }
            snapshot.jobs
        }
        None => load_snapshot(store)
            .map(|snapshot| {
                jobs_warn!("Serving job list saved at {}", snapshot.fetched_at);
                snapshot.jobs
            })
            .unwrap_or_default(),
    }
}

fn fetch_with_engine(
    source: Arc<dyn IssueSource>,
    registry: &[Repository],
    wait: Duration,
) -> Option<Vec<Job>> {
    let engine = EngineHandle::new(source);
    engine.refresh(registry.to_vec());

    let mut failed = 0usize;
    loop {
        match engine.recv_timeout(wait) {
            Some(EngineEvent::RepositoryFailed(_)) => failed += 1,
            Some(EngineEvent::JobsFetched { jobs }) => {
                if !registry.is_empty() && failed == registry.len() {
                    jobs_warn!("Every repository failed; keeping the saved job list");
                    return None;
                }
                jobs_info!(
                    "Fetched {} jobs from {} repositories ({} failed)",
                    jobs.len(),
                    registry.len(),
                    failed
                );
                return Some(jobs);
            }
            Some(EngineEvent::Unavailable { message }) => {
                jobs_warn!("Job fetch unavailable: {}", message);
                return None;
            }
            None => {
                jobs_warn!("Timed out waiting for jobs after {:?}", wait);
                return None;
            }
        }
    }
}
