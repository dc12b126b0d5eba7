use jobs_logging::{jobs_debug, jobs_info, jobs_warn};

use crate::{
    decode_filters, encode_filters, filters_from_query, filters_to_query, AppState, Effect,
    FilterPatch, FilterState, Msg, FILTERS_STORAGE_KEY,
};

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: AppState, msg: Msg) -> (AppState, Vec<Effect>) {
    let effects = match msg {
        Msg::Initialize { query, stored } => {
            if state.is_initialized() {
                jobs_debug!("Ignoring repeated filter initialization");
            } else {
                let filters = initial_filters(query.as_deref(), stored.as_deref());
                state.initialize(filters);
            }
            Vec::new()
        }
        Msg::JobsLoaded(jobs) => {
            jobs_info!("Loaded {} jobs", jobs.len());
            state.set_jobs(jobs);
            Vec::new()
        }
        Msg::SetFilters(patch) => apply_patch(&mut state, patch),
        Msg::SetSearch(search) => apply_patch(&mut state, FilterPatch::search(search)),
        Msg::ToggleLabel(name) => {
            let patch = state.filters().toggle_label_patch(&name);
            apply_patch(&mut state, patch)
        }
        Msg::ToggleRepo(full_name) => {
            let patch = state.filters().toggle_repo_patch(&full_name);
            apply_patch(&mut state, patch)
        }
        Msg::ClearLabels => apply_patch(&mut state, FilterPatch::labels(Vec::new())),
        Msg::ResetFilters => apply_patch(&mut state, FilterPatch::reset()),
        Msg::NoOp => Vec::new(),
    };

    (state, effects)
}

/// Resolves the starting filters: query string, then durable storage, then
/// defaults.
pub fn initial_filters(query: Option<&str>, stored: Option<&str>) -> FilterState {
    if let Some(filters) = query.and_then(filters_from_query) {
        jobs_debug!("Filters initialized from query string");
        return filters;
    }

    match stored {
        Some(raw) => match decode_filters(raw) {
            Ok(filters) => {
                jobs_debug!("Filters initialized from durable storage");
                filters
            }
            Err(err) => {
                jobs_warn!("Failed to parse stored filters: {}", err);
                FilterState::default()
            }
        },
        None => FilterState::default(),
    }
}

fn apply_patch(state: &mut AppState, patch: FilterPatch) -> Vec<Effect> {
    // The view is not shown before initialization, so nothing can legitimately
    // edit the filters yet.
    if !state.is_initialized() {
        jobs_warn!("Ignoring filter update before initialization: {:?}", patch);
        return Vec::new();
    }

    state.apply_patch(patch);
    let filters = state.filters();
    vec![
        Effect::PersistFilters {
            key: FILTERS_STORAGE_KEY.to_string(),
            json: encode_filters(filters),
        },
        Effect::ReplaceQuery {
            query: filters_to_query(filters),
        },
    ]
}
