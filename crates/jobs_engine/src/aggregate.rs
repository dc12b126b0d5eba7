use jobs_core::{sort_newest_first, Repository};
use jobs_logging::{jobs_error, jobs_info};

use crate::{FetchReport, IssueSource, RepositoryFailure};

/// Fetches every repository in turn and merges the results newest first.
///
/// A repository that fails is logged and reported in
/// [`FetchReport::failures`]; it never aborts the refresh.
pub async fn fetch_jobs(source: &dyn IssueSource, registry: &[Repository]) -> FetchReport {
    let mut report = FetchReport::default();

    for repository in registry {
        let full_name = repository.full_name();
        match source.fetch_repository(repository).await {
            Ok(jobs) => {
                jobs_info!("Fetched {} jobs from {}", jobs.len(), full_name);
                report.jobs.extend(jobs);
            }
            Err(error) => {
                jobs_error!("Failed to fetch jobs from {}: {}", full_name, error);
                report.failures.push(RepositoryFailure {
                    repository: full_name,
                    error,
                });
            }
        }
    }

    sort_newest_first(&mut report.jobs);
    report
}
