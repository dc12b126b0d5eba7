use chrono::{DateTime, Utc};

use crate::listing::Derivation;
use crate::{AppState, FilterState, Job};

/// What the job list should render.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppViewModel {
    /// Filters are not reconciled yet; render nothing (or a skeleton) so the
    /// first real frame already reflects the user's filters.
    Loading,
    Ready(ReadyView),
}

impl AppViewModel {
    pub fn ready(&self) -> Option<&ReadyView> {
        match self {
            AppViewModel::Loading => None,
            AppViewModel::Ready(view) => Some(view),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReadyView {
    pub filters: FilterState,
    /// Every configured repository, in registry order.
    pub repositories: Vec<RepoToggleView>,
    /// Label groups for visible repositories that have at least one label.
    pub label_groups: Vec<LabelGroupView>,
    /// False when no visible repository has any label.
    pub has_labels: bool,
    pub jobs: Vec<JobCardView>,
    pub job_count: usize,
    /// Whether "Reset all filters" should be offered.
    pub has_active_filters: bool,
}

impl ReadyView {
    /// No job passes the filters; the UI offers "Clear all filters".
    pub fn is_empty_result(&self) -> bool {
        self.jobs.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepoToggleView {
    pub full_name: String,
    pub hidden: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabelGroupView {
    pub repository: String,
    pub labels: Vec<LabelChipView>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabelChipView {
    pub name: String,
    pub count: usize,
    pub selected: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobCardView {
    pub id: String,
    pub title: String,
    pub company: String,
    pub repository: String,
    pub url: String,
    pub badges: Vec<BadgeView>,
    /// Relative posting time, e.g. "3 days ago".
    pub posted: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BadgeView {
    pub name: String,
    /// `#rrggbb`, or `None` for the default badge style.
    pub color: Option<String>,
}

pub(crate) fn build_ready_view(
    state: &AppState,
    derivation: &Derivation<'_>,
    now: DateTime<Utc>,
) -> ReadyView {
    let filters = state.filters();

    let repositories = state
        .registry()
        .iter()
        .map(|repo| {
            let full_name = repo.full_name();
            let hidden = filters.is_repo_hidden(&full_name);
            RepoToggleView { full_name, hidden }
        })
        .collect();

    let label_groups = derivation
        .labels_by_repo
        .iter()
        .filter(|(_, counts)| !counts.is_empty())
        .map(|(repository, counts)| LabelGroupView {
            repository: repository.to_string(),
            labels: counts
                .iter()
                .map(|(name, count)| LabelChipView {
                    name: name.clone(),
                    count: *count,
                    selected: filters.is_label_selected(name),
                })
                .collect(),
        })
        .collect();

    let jobs: Vec<JobCardView> = derivation
        .filtered_jobs
        .iter()
        .map(|job| job_card(job, now))
        .collect();

    ReadyView {
        filters: filters.clone(),
        repositories,
        label_groups,
        has_labels: !derivation.labels_by_repo.has_no_labels(),
        job_count: jobs.len(),
        jobs,
        has_active_filters: !filters.is_default(),
    }
}

fn job_card(job: &Job, now: DateTime<Utc>) -> JobCardView {
    JobCardView {
        id: job.id.clone(),
        title: job.title.clone(),
        company: job.company.clone(),
        repository: job.repository.clone(),
        url: job.url.clone(),
        badges: job
            .labels
            .iter()
            .map(|label| BadgeView {
                name: label.name.clone(),
                color: (!label.color.is_empty()).then(|| format!("#{}", label.color)),
            })
            .collect(),
        posted: time_ago(job.created_at, now),
    }
}

const TIME_UNITS: &[(i64, &str)] = &[
    (31_536_000, "years"),
    (2_592_000, "months"),
    (86_400, "days"),
    (3_600, "hours"),
    (60, "minutes"),
];

/// Coarse relative time such as "2 days ago". A unit is used once more than
/// one whole unit has elapsed; timestamps in the future read as "0 seconds ago".
pub fn time_ago(then: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let seconds = (now - then).num_seconds().max(0);
    for (unit_secs, unit) in TIME_UNITS {
        if seconds > *unit_secs {
            return format!("{} {} ago", seconds / unit_secs, unit);
        }
    }
    format!("{} seconds ago", seconds)
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, TimeZone};

    use super::*;

    #[test]
    fn time_ago_picks_the_largest_unit_exceeded() {
        let now = Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap();
        assert_eq!(time_ago(now - Duration::seconds(30), now), "30 seconds ago");
        assert_eq!(time_ago(now - Duration::seconds(60), now), "60 seconds ago");
        assert_eq!(time_ago(now - Duration::minutes(5), now), "5 minutes ago");
        assert_eq!(time_ago(now - Duration::hours(3), now), "3 hours ago");
        assert_eq!(time_ago(now - Duration::days(40), now), "1 months ago");
        assert_eq!(time_ago(now - Duration::days(800), now), "2 years ago");
        assert_eq!(time_ago(now + Duration::hours(1), now), "0 seconds ago");
    }
}
