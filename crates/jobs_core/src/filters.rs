use serde::{Deserialize, Serialize};

/// The user's current filter selection.
///
/// `labels` and `hidden_repos` never hold duplicates. Their order is the order
/// in which entries were added and is kept for stable serialization.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct FilterState {
    pub search: String,
    pub labels: Vec<String>,
    /// `owner/name` of repositories the user has hidden.
    pub hidden_repos: Vec<String>,
}

impl FilterState {
    pub fn new(
        search: impl Into<String>,
        labels: impl IntoIterator<Item = impl Into<String>>,
        hidden_repos: impl IntoIterator<Item = impl Into<String>>,
    ) -> Self {
        Self {
            search: search.into(),
            labels: dedupe(labels.into_iter().map(Into::into)),
            hidden_repos: dedupe(hidden_repos.into_iter().map(Into::into)),
        }
    }

    pub fn is_default(&self) -> bool {
        self.search.is_empty() && self.labels.is_empty() && self.hidden_repos.is_empty()
    }

    pub fn is_repo_hidden(&self, full_name: &str) -> bool {
        self.hidden_repos.iter().any(|repo| repo == full_name)
    }

    pub fn is_label_selected(&self, name: &str) -> bool {
        self.labels.iter().any(|label| label == name)
    }

    /// Shallow merge: only the fields present in `patch` change.
    pub fn apply(&mut self, patch: FilterPatch) {
        if let Some(search) = patch.search {
            self.search = search;
        }
        if let Some(labels) = patch.labels {
            self.labels = dedupe(labels);
        }
        if let Some(hidden_repos) = patch.hidden_repos {
            self.hidden_repos = dedupe(hidden_repos);
        }
    }

    /// Patch that adds `name` to the label selection, or removes it if present.
    pub fn toggle_label_patch(&self, name: &str) -> FilterPatch {
        FilterPatch::labels(toggled(&self.labels, name))
    }

    /// Patch that hides `full_name`, or shows it again if already hidden.
    pub fn toggle_repo_patch(&self, full_name: &str) -> FilterPatch {
        FilterPatch::hidden_repos(toggled(&self.hidden_repos, full_name))
    }
}

/// A partial [`FilterState`]; `None` fields are left untouched when applied.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FilterPatch {
    pub search: Option<String>,
    pub labels: Option<Vec<String>>,
    pub hidden_repos: Option<Vec<String>>,
}

impl FilterPatch {
    pub fn search(search: impl Into<String>) -> Self {
        Self {
            search: Some(search.into()),
            ..Self::default()
        }
    }

    pub fn labels(labels: Vec<String>) -> Self {
        Self {
            labels: Some(labels),
            ..Self::default()
        }
    }

    pub fn hidden_repos(hidden_repos: Vec<String>) -> Self {
        Self {
            hidden_repos: Some(hidden_repos),
            ..Self::default()
        }
    }

    /// Patch that resets every field to its default.
    pub fn reset() -> Self {
        Self {
            search: Some(String::new()),
            labels: Some(Vec::new()),
            hidden_repos: Some(Vec::new()),
        }
    }
}

impl From<FilterState> for FilterPatch {
    fn from(state: FilterState) -> Self {
        Self {
            search: Some(state.search),
            labels: Some(state.labels),
            hidden_repos: Some(state.hidden_repos),
        }
    }
}

/// Removes duplicates, keeping the first occurrence of each value.
pub(crate) fn dedupe(values: impl IntoIterator<Item = String>) -> Vec<String> {
    let mut out: Vec<String> = Vec::new();
    for value in values {
        if !out.contains(&value) {
            out.push(value);
        }
    }
    out
}

fn toggled(current: &[String], value: &str) -> Vec<String> {
    if current.iter().any(|entry| entry == value) {
        current
            .iter()
            .filter(|entry| entry.as_str() != value)
            .cloned()
            .collect()
    } else {
        let mut next = current.to_vec();
        next.push(value.to_string());
        next
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn apply_only_touches_present_fields() {
        let mut state = FilterState::new("rust", ["remote"], ["a/a"]);
        state.apply(FilterPatch::search("go"));
        assert_eq!(state, FilterState::new("go", ["remote"], ["a/a"]));
    }

    #[test]
    fn apply_drops_duplicate_entries() {
        let mut state = FilterState::default();
        state.apply(FilterPatch::labels(vec![
            "go".into(),
            "rust".into(),
            "go".into(),
        ]));
        assert_eq!(state.labels, vec!["go", "rust"]);
    }

    #[test]
    fn toggle_appends_then_removes() {
        let state = FilterState::new("", ["a"], Vec::<String>::new());
        assert_eq!(
            state.toggle_label_patch("b").labels,
            Some(vec!["a".to_string(), "b".to_string()])
        );
        assert_eq!(state.toggle_label_patch("a").labels, Some(Vec::new()));
    }
}
