use std::io::Write;
use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use jobs_engine::{FileKeyValueStore, GithubIssueSource, IssueSource, KeyValueStore};
use jobs_logging::jobs_warn;

use crate::render::{render, ColorMode};
use crate::session::{load_jobs, JobsPolicy, Session};
use crate::{query_from_link, AppConfig, Cli, EffectRunner, PageLocation};

/// Runs one invocation against GitHub and the configured storage directory.
pub fn run_app(cli: &Cli, config: &AppConfig, out: &mut dyn Write) -> anyhow::Result<()> {
    let settings = config.fetch_settings();
    if settings.token.is_none() {
        jobs_warn!("GITHUB_TOKEN is not set; fetching jobs will fail");
    }
    let source: Arc<dyn IssueSource> = Arc::new(GithubIssueSource::new(settings)?);
    let store: Arc<dyn KeyValueStore> =
        Arc::new(FileKeyValueStore::new(config.storage_dir.clone()));
    run_with(cli, config, source, store, Utc::now(), out)
}

/// Runs one invocation: initialize filters, load jobs, apply the requested
/// filter edits and print the resulting view.
pub fn run_with(
    cli: &Cli,
    config: &AppConfig,
    source: Arc<dyn IssueSource>,
    store: Arc<dyn KeyValueStore>,
    now: DateTime<Utc>,
    out: &mut dyn Write,
) -> anyhow::Result<()> {
    let query = cli.query.as_deref().map(query_from_link).unwrap_or_default();
    let location = PageLocation::new(config.page_url()?, query);
    let mut session = Session::new(
        config.repositories.clone(),
        EffectRunner::new(store.clone(), location),
    );
    session.initialize();

    let policy = if cli.offline {
        JobsPolicy::Offline
    } else if cli.refresh {
        JobsPolicy::Refresh
    } else {
        JobsPolicy::Revalidate
    };
    let jobs = load_jobs(
        source,
        &config.repositories,
        store.as_ref(),
        policy,
        config.revalidate(),
        fetch_wait(config),
        now,
    );
    session.dispatch(jobs_core::Msg::JobsLoaded(jobs));

    for msg in cli.messages() {
        session.dispatch(msg);
    }

    let color = if cli.no_color {
        ColorMode::Plain
    } else {
        ColorMode::Ansi
    };
    let text = render(&session.state().view_at(now), session.location(), color);
    out.write_all(text.as_bytes())?;
    out.flush()?;
    Ok(())
}

// Repositories are fetched one after another, each bounded by the request
// timeout.
fn fetch_wait(config: &AppConfig) -> Duration {
    let per_repo = config
        .fetch
        .request_timeout_secs
        .saturating_add(config.fetch.connect_timeout_secs);
    let repos = config.repositories.len().max(1) as u64;
    Duration::from_secs(per_repo.saturating_mul(repos).saturating_add(5))
}
