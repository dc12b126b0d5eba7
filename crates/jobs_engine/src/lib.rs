//! Job board engine: GitHub fetching, background refresh and durable storage.
mod aggregate;
mod engine;
mod github;
mod snapshot;
mod storage;
mod types;

pub use aggregate::fetch_jobs;
pub use engine::EngineHandle;
pub use github::{FetchSettings, GithubIssueSource, IssueSource, GITHUB_GRAPHQL_ENDPOINT};
pub use snapshot::{
    load_fresh_snapshot, load_snapshot, save_snapshot, JobSnapshot, DEFAULT_REVALIDATE_SECS,
    SNAPSHOT_STORAGE_KEY,
};
pub use storage::{
    ensure_storage_dir, FileKeyValueStore, KeyValueStore, MemoryKeyValueStore, PersistError,
};
pub use types::{EngineEvent, FailureKind, FetchError, FetchReport, RepositoryFailure};
