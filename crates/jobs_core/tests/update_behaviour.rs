use std::sync::Once;

use jobs_core::{
    filters_to_query, update, AppState, AppViewModel, Effect, FilterPatch, FilterState,
    Lifecycle, Msg, Repository, FILTERS_STORAGE_KEY,
};
use pretty_assertions::assert_eq;

fn init_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(jobs_logging::initialize_for_tests);
}

fn registry() -> Vec<Repository> {
    vec![Repository::new("a", "a"), Repository::new("b", "b")]
}

fn initialize(query: Option<&str>, stored: Option<&str>) -> AppState {
    let (state, effects) = update(
        AppState::with_registry(registry()),
        Msg::Initialize {
            query: query.map(ToOwned::to_owned),
            stored: stored.map(ToOwned::to_owned),
        },
    );
    assert!(effects.is_empty());
    state
}

#[test]
fn view_is_loading_until_initialized() {
    init_logging();
    let state = AppState::with_registry(registry());

    assert_eq!(state.lifecycle(), Lifecycle::Uninitialized);
    assert_eq!(state.view(), AppViewModel::Loading);

    let state = initialize(None, None);
    assert_eq!(state.lifecycle(), Lifecycle::Initialized);
    assert!(state.view().ready().is_some());
}

#[test]
fn query_string_takes_precedence_over_storage() {
    init_logging();
    let stored = r#"{"search":"stored","labels":["x"],"hiddenRepos":[]}"#;

    let state = initialize(Some("?labels=go,react"), Some(stored));

    assert_eq!(
        state.filters(),
        &FilterState::new("", ["go", "react"], Vec::<String>::new())
    );
}

#[test]
fn stored_filters_are_adopted_without_query() {
    init_logging();
    let stored = r#"{"search":"x","labels":[],"hiddenRepos":[]}"#;

    let state = initialize(Some(""), Some(stored));

    assert_eq!(
        state.filters(),
        &FilterState::new("x", Vec::<String>::new(), Vec::<String>::new())
    );
}

#[test]
fn stored_filters_are_not_validated_against_registry() {
    init_logging();
    let stored = r#"{"search":"","labels":["gone"],"hiddenRepos":["old/repo"]}"#;

    let state = initialize(None, Some(stored));

    assert_eq!(state.filters().hidden_repos, vec!["old/repo"]);
    assert_eq!(state.filters().labels, vec!["gone"]);
}

#[test]
fn malformed_storage_falls_back_to_defaults() {
    init_logging();
    let state = initialize(None, Some("{\"search\": "));

    assert!(state.is_initialized());
    assert_eq!(state.filters(), &FilterState::default());
}

#[test]
fn initialization_runs_once() {
    init_logging();
    let state = initialize(Some("search=first"), None);

    let (state, effects) = update(
        state,
        Msg::Initialize {
            query: Some("search=second".to_string()),
            stored: None,
        },
    );

    assert!(effects.is_empty());
    assert_eq!(state.filters().search, "first");
}

#[test]
fn updates_before_initialization_are_ignored() {
    init_logging();
    let state = AppState::with_registry(registry());

    let (state, effects) = update(state, Msg::SetSearch("rust".to_string()));

    assert!(effects.is_empty());
    assert_eq!(state.filters(), &FilterState::default());
    assert!(!state.is_initialized());
}

#[test]
fn every_update_persists_then_replaces_query() {
    init_logging();
    let state = initialize(None, None);

    let (state, effects) = update(state, Msg::SetSearch("rust dev".to_string()));

    assert_eq!(state.filters().search, "rust dev");
    assert_eq!(
        effects,
        vec![
            Effect::PersistFilters {
                key: FILTERS_STORAGE_KEY.to_string(),
                json: r#"{"search":"rust dev","labels":[],"hiddenRepos":[]}"#.to_string(),
            },
            Effect::ReplaceQuery {
                query: "search=rust+dev".to_string(),
            },
        ]
    );
}

#[test]
fn set_filters_is_a_shallow_merge() {
    init_logging();
    let state = initialize(Some("search=go&labels=remote"), None);

    let (state, _) = update(
        state,
        Msg::SetFilters(FilterPatch::hidden_repos(vec!["b/b".to_string()])),
    );

    assert_eq!(state.filters(), &FilterState::new("go", ["remote"], ["b/b"]));
}

#[test]
fn toggling_a_label_twice_restores_selection() {
    init_logging();
    let state = initialize(Some("labels=go"), None);
    let before = state.filters().labels.clone();

    let (state, _) = update(state, Msg::ToggleLabel("react".to_string()));
    assert_eq!(state.filters().labels, vec!["go", "react"]);
    let (state, _) = update(state, Msg::ToggleLabel("react".to_string()));

    assert_eq!(state.filters().labels, before);
}

#[test]
fn toggling_a_repository_hides_and_shows_it() {
    init_logging();
    let state = initialize(None, None);

    let (state, effects) = update(state, Msg::ToggleRepo("a/a".to_string()));
    assert_eq!(state.filters().hidden_repos, vec!["a/a"]);
    assert_eq!(
        effects.last(),
        Some(&Effect::ReplaceQuery {
            query: "hiddenRepos=a%2Fa".to_string()
        })
    );

    let (state, effects) = update(state, Msg::ToggleRepo("a/a".to_string()));
    assert!(state.filters().hidden_repos.is_empty());
    assert_eq!(
        effects.last(),
        Some(&Effect::ReplaceQuery {
            query: String::new()
        })
    );
}

#[test]
fn clear_labels_keeps_other_fields() {
    init_logging();
    let state = initialize(Some("search=x&labels=go,react&hiddenRepos=b/b"), None);

    let (state, _) = update(state, Msg::ClearLabels);

    assert_eq!(state.filters(), &FilterState::new("x", Vec::<String>::new(), ["b/b"]));
}

#[test]
fn reset_restores_defaults() {
    init_logging();
    let state = initialize(Some("search=x&labels=go&hiddenRepos=b/b"), None);

    let (state, effects) = update(state, Msg::ResetFilters);

    assert_eq!(state.filters(), &FilterState::default());
    assert_eq!(
        effects.last(),
        Some(&Effect::ReplaceQuery {
            query: String::new()
        })
    );
}

#[test]
fn written_query_reproduces_filters_on_fresh_start() {
    init_logging();
    let target = FilterState::new("senior rust", ["go", "remote"], ["b/b", "a/a"]);
    let state = initialize(None, None);

    let (state, effects) = update(state, Msg::SetFilters(target.clone().into()));
    let query = effects
        .iter()
        .find_map(|effect| match effect {
            Effect::ReplaceQuery { query } => Some(query.clone()),
            _ => None,
        })
        .expect("query effect");
    assert_eq!(query, filters_to_query(state.filters()));

    let restarted = initialize(Some(query.as_str()), None);
    assert_eq!(restarted.filters(), &target);
}

#[test]
fn jobs_loaded_marks_dirty() {
    init_logging();
    let mut state = initialize(None, None);
    assert!(state.consume_dirty());
    assert!(!state.consume_dirty());

    let (mut state, effects) = update(state, Msg::JobsLoaded(Vec::new()));

    assert!(effects.is_empty());
    assert!(state.consume_dirty());
}
