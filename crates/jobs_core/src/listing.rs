use std::collections::BTreeMap;

use crate::{FilterState, Job, Repository};

/// Per-repository label counts over the visible jobs.
///
/// Repositories keep registry order; labels within a repository are sorted
/// by name.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct LabelIndex {
    entries: Vec<(String, BTreeMap<String, usize>)>,
}

impl LabelIndex {
    pub fn repositories(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(repo, _)| repo.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &BTreeMap<String, usize>)> {
        self.entries.iter().map(|(repo, counts)| (repo.as_str(), counts))
    }

    pub fn get(&self, repository: &str) -> Option<&BTreeMap<String, usize>> {
        self.entries
            .iter()
            .find(|(repo, _)| repo == repository)
            .map(|(_, counts)| counts)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// True when no visible repository has any label.
    pub fn has_no_labels(&self) -> bool {
        self.entries.iter().all(|(_, counts)| counts.is_empty())
    }

    fn get_mut(&mut self, repository: &str) -> Option<&mut BTreeMap<String, usize>> {
        self.entries
            .iter_mut()
            .find(|(repo, _)| repo == repository)
            .map(|(_, counts)| counts)
    }
}

/// Output of [`derive_listing`]: what the job list should show right now.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Derivation<'a> {
    /// Jobs passing every filter, in input order.
    pub filtered_jobs: Vec<&'a Job>,
    pub labels_by_repo: LabelIndex,
}

/// Computes the filtered job list and the label index for `filters`.
///
/// Hidden repositories contribute neither jobs nor label counts. The label
/// index is built from visible jobs before search and label filtering, so
/// the counts describe what selecting a label would offer.
pub fn derive_listing<'a>(
    jobs: &'a [Job],
    filters: &FilterState,
    registry: &[Repository],
) -> Derivation<'a> {
    let visible: Vec<&Job> = jobs
        .iter()
        .filter(|job| !filters.is_repo_hidden(&job.repository))
        .collect();

    let mut labels_by_repo = LabelIndex {
        entries: registry
            .iter()
            .map(Repository::full_name)
            .filter(|full_name| !filters.is_repo_hidden(full_name))
            .map(|full_name| (full_name, BTreeMap::new()))
            .collect(),
    };
    for job in &visible {
        // Jobs from repositories outside the registry are listed but not counted.
        if let Some(counts) = labels_by_repo.get_mut(&job.repository) {
            for label in &job.labels {
                *counts.entry(label.name.clone()).or_insert(0) += 1;
            }
        }
    }

    let needle = filters.search.to_lowercase();
    let filtered_jobs = visible
        .into_iter()
        .filter(|job| matches_search(job, &needle) && matches_labels(job, &filters.labels))
        .collect();

    Derivation {
        filtered_jobs,
        labels_by_repo,
    }
}

fn matches_search(job: &Job, needle: &str) -> bool {
    needle.is_empty()
        || job.title.to_lowercase().contains(needle)
        || job.repository.to_lowercase().contains(needle)
}

fn matches_labels(job: &Job, selected: &[String]) -> bool {
    selected.is_empty() || selected.iter().any(|name| job.has_label(name))
}
