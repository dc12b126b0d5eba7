use chrono::{Duration, TimeZone, Utc};
use jobs_core::{
    update, AppState, BadgeView, Job, Label, LabelChipView, Msg, Repository, RepoToggleView,
};
use pretty_assertions::assert_eq;

fn ready_state(query: &str, jobs: Vec<Job>) -> AppState {
    let registry = vec![
        Repository::new("a", "a"),
        Repository::new("b", "b"),
        Repository::new("c", "c"),
    ];
    let (state, _) = update(
        AppState::with_registry(registry),
        Msg::Initialize {
            query: Some(query.to_string()),
            stored: None,
        },
    );
    let (state, _) = update(state, Msg::JobsLoaded(jobs));
    state
}

fn sample_jobs() -> Vec<Job> {
    let created = Utc.with_ymd_and_hms(2024, 5, 1, 0, 0, 0).unwrap();
    vec![
        Job {
            id: "1".into(),
            title: "Rust Engineer".into(),
            company: "a".into(),
            repository: "a/a".into(),
            url: "https://github.com/a/a/issues/1".into(),
            labels: vec![Label::new("remote", "0e8a16"), Label::new("senior", "")],
            created_at: created,
        },
        Job {
            id: "2".into(),
            title: "PHP Developer".into(),
            company: "b".into(),
            repository: "b/b".into(),
            url: "https://github.com/b/b/issues/2".into(),
            labels: vec![Label::new("remote", "0e8a16")],
            created_at: created - Duration::days(3),
        },
    ]
}

#[test]
fn repository_toggles_cover_whole_registry() {
    let state = ready_state("hiddenRepos=b/b", sample_jobs());
    let view = state.view();
    let view = view.ready().expect("ready");

    assert_eq!(
        view.repositories,
        vec![
            RepoToggleView {
                full_name: "a/a".into(),
                hidden: false
            },
            RepoToggleView {
                full_name: "b/b".into(),
                hidden: true
            },
            RepoToggleView {
                full_name: "c/c".into(),
                hidden: false
            },
        ]
    );
}

#[test]
fn label_groups_skip_empty_repositories_and_mark_selection() {
    let state = ready_state("labels=senior", sample_jobs());
    let view = state.view();
    let view = view.ready().expect("ready");

    let groups: Vec<&str> = view
        .label_groups
        .iter()
        .map(|group| group.repository.as_str())
        .collect();
    assert_eq!(groups, vec!["a/a", "b/b"]);
    assert_eq!(
        view.label_groups[0].labels,
        vec![
            LabelChipView {
                name: "remote".into(),
                count: 1,
                selected: false
            },
            LabelChipView {
                name: "senior".into(),
                count: 1,
                selected: true
            },
        ]
    );
    assert!(view.has_labels);
    assert!(view.has_active_filters);
}

#[test]
fn job_cards_carry_badges_and_relative_time() {
    let state = ready_state("search=php", sample_jobs());
    let now = Utc.with_ymd_and_hms(2024, 5, 1, 0, 0, 0).unwrap();
    let view = state.view_at(now);
    let view = view.ready().expect("ready");

    assert_eq!(view.job_count, 1);
    let card = &view.jobs[0];
    assert_eq!(card.id, "2");
    assert_eq!(card.posted, "3 days ago");
    assert_eq!(
        card.badges,
        vec![BadgeView {
            name: "remote".into(),
            color: Some("#0e8a16".into())
        }]
    );
}

#[test]
fn empty_result_is_a_ready_state() {
    let state = ready_state("search=cobol", sample_jobs());
    let view = state.view();
    let view = view.ready().expect("ready");

    assert!(view.is_empty_result());
    assert!(view.has_active_filters);
}

#[test]
fn no_labels_when_every_labelled_repository_is_hidden() {
    let state = ready_state("hiddenRepos=a/a,b/b", sample_jobs());
    let view = state.view();
    let view = view.ready().expect("ready");

    assert!(!view.has_labels);
    assert!(view.label_groups.is_empty());
    assert!(view.jobs.is_empty());
}
