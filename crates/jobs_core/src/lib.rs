//! Job board core: domain model, filter engine and pure state machine.
mod effect;
mod filters;
mod job;
mod listing;
mod msg;
mod query;
mod registry;
mod state;
mod stored;
mod update;
mod view_model;

pub use effect::Effect;
pub use filters::{FilterPatch, FilterState};
pub use job::{sort_newest_first, Job, Label};
pub use listing::{derive_listing, Derivation, LabelIndex};
pub use msg::Msg;
pub use query::{
    filters_from_query, filters_to_query, HIDDEN_REPOS_PARAM, LABELS_PARAM, SEARCH_PARAM,
};
pub use registry::{default_repositories, Repository};
pub use state::{AppState, Lifecycle};
pub use stored::{decode_filters, encode_filters, StoredFiltersError, FILTERS_STORAGE_KEY};
pub use update::{initial_filters, update};
pub use view_model::{
    time_ago, AppViewModel, BadgeView, JobCardView, LabelChipView, LabelGroupView, ReadyView,
    RepoToggleView,
};
