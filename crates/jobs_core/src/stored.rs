use thiserror::Error;

use crate::FilterState;

/// Durable storage key under which the filter state is kept.
pub const FILTERS_STORAGE_KEY: &str = "github-jobs-filters";

#[derive(Debug, Error)]
pub enum StoredFiltersError {
    #[error("stored filters are not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Encodes filters as the JSON record `{search, labels, hiddenRepos}`.
pub fn encode_filters(filters: &FilterState) -> String {
    // Serializing plain strings and string lists cannot fail.
    serde_json::to_string(filters).unwrap_or_default()
}

/// Decodes a stored record. Missing fields take their defaults; values are
/// not checked against the live repositories.
pub fn decode_filters(raw: &str) -> Result<FilterState, StoredFiltersError> {
    let parsed: FilterState = serde_json::from_str(raw)?;
    Ok(FilterState::new(
        parsed.search,
        parsed.labels,
        parsed.hidden_repos,
    ))
}
