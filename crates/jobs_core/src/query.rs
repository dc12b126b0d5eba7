//! Query-string form of [`FilterState`].
//!
//! One parameter per non-empty field: `search`, comma-joined `labels` and
//! comma-joined `hiddenRepos`. Empty fields are omitted, so the default state
//! serializes to an empty string.

use url::form_urlencoded;

use crate::filters::{dedupe, FilterState};

pub const SEARCH_PARAM: &str = "search";
pub const LABELS_PARAM: &str = "labels";
pub const HIDDEN_REPOS_PARAM: &str = "hiddenRepos";

const LIST_SEPARATOR: &str = ",";

/// Parses filters from a query string, with or without the leading `?`.
///
/// Returns `None` when none of the recognized keys is present, which tells
/// the caller to fall back to durable storage. A key that is present with an
/// empty value still counts.
pub fn filters_from_query(query: &str) -> Option<FilterState> {
    let query = query.strip_prefix('?').unwrap_or(query);

    let mut search = None;
    let mut labels = None;
    let mut hidden_repos = None;
    for (key, value) in form_urlencoded::parse(query.as_bytes()) {
        // First occurrence wins, like URLSearchParams::get.
        match key.as_ref() {
            SEARCH_PARAM if search.is_none() => search = Some(value.into_owned()),
            LABELS_PARAM if labels.is_none() => labels = Some(split_list(&value)),
            HIDDEN_REPOS_PARAM if hidden_repos.is_none() => {
                hidden_repos = Some(split_list(&value))
            }
            _ => {}
        }
    }

    if search.is_none() && labels.is_none() && hidden_repos.is_none() {
        return None;
    }

    Some(FilterState {
        search: search.unwrap_or_default(),
        labels: labels.unwrap_or_default(),
        hidden_repos: hidden_repos.unwrap_or_default(),
    })
}

/// Serializes filters to a query string without the leading `?`.
pub fn filters_to_query(filters: &FilterState) -> String {
    let mut serializer = form_urlencoded::Serializer::new(String::new());
    if !filters.search.is_empty() {
        serializer.append_pair(SEARCH_PARAM, &filters.search);
    }
    if !filters.labels.is_empty() {
        serializer.append_pair(LABELS_PARAM, &join_list(&filters.labels));
    }
    if !filters.hidden_repos.is_empty() {
        serializer.append_pair(HIDDEN_REPOS_PARAM, &join_list(&filters.hidden_repos));
    }
    serializer.finish()
}

fn split_list(raw: &str) -> Vec<String> {
    dedupe(
        raw.split(LIST_SEPARATOR)
            .filter(|part| !part.is_empty())
            .map(ToOwned::to_owned),
    )
}

fn join_list(values: &[String]) -> String {
    values.join(LIST_SEPARATOR)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_fields_are_omitted() {
        assert_eq!(filters_to_query(&FilterState::default()), "");
        let filters = FilterState::new("", ["go"], Vec::<String>::new());
        assert_eq!(filters_to_query(&filters), "labels=go");
    }

    #[test]
    fn lists_are_comma_joined_and_encoded() {
        let filters = FilterState::new("rust dev", ["go", "remote"], ["a/a", "b/b"]);
        assert_eq!(
            filters_to_query(&filters),
            "search=rust+dev&labels=go%2Cremote&hiddenRepos=a%2Fa%2Cb%2Fb"
        );
    }

    #[test]
    fn key_presence_is_the_signal() {
        assert_eq!(filters_from_query(""), None);
        assert_eq!(filters_from_query("?page=2"), None);
        assert_eq!(filters_from_query("?search="), Some(FilterState::default()));
    }

    #[test]
    fn missing_keys_default_to_empty() {
        let parsed = filters_from_query("hiddenRepos=a/a,,b/b").expect("filters");
        assert_eq!(parsed, FilterState::new("", Vec::<String>::new(), ["a/a", "b/b"]));
    }
}
