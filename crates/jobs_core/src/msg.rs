use crate::{FilterPatch, Job};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// Page mounted: the current query string (if any) and the raw durable
    /// storage slot (if any). Only the first one is honoured.
    Initialize {
        query: Option<String>,
        stored: Option<String>,
    },
    /// A fresh job list arrived from the fetch adapter.
    JobsLoaded(Vec<Job>),
    /// Merge a partial filter update.
    SetFilters(FilterPatch),
    /// User edited the search box.
    SetSearch(String),
    /// User clicked a label chip.
    ToggleLabel(String),
    /// User clicked a repository toggle (`owner/name`).
    ToggleRepo(String),
    /// User clicked "Clear labels".
    ClearLabels,
    /// User clicked "Reset all filters" / "Clear all filters".
    ResetFilters,
    /// Fallback for placeholder wiring.
    NoOp,
}
