use chrono::{DateTime, Utc};

use crate::listing::{derive_listing, Derivation};
use crate::view_model::{build_ready_view, AppViewModel};
use crate::{default_repositories, FilterPatch, FilterState, Job, Repository};

/// Whether the filters have been reconciled with the query string and
/// durable storage yet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Lifecycle {
    /// Nothing may be rendered: the filters are still the placeholder default.
    #[default]
    Uninitialized,
    Initialized,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppState {
    lifecycle: Lifecycle,
    filters: FilterState,
    jobs: Vec<Job>,
    registry: Vec<Repository>,
    dirty: bool,
}

impl Default for AppState {
    fn default() -> Self {
        Self::with_registry(default_repositories())
    }
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_registry(registry: Vec<Repository>) -> Self {
        Self {
            lifecycle: Lifecycle::Uninitialized,
            filters: FilterState::default(),
            jobs: Vec::new(),
            registry,
            dirty: false,
        }
    }

    pub fn lifecycle(&self) -> Lifecycle {
        self.lifecycle
    }

    pub fn is_initialized(&self) -> bool {
        self.lifecycle == Lifecycle::Initialized
    }

    pub fn filters(&self) -> &FilterState {
        &self.filters
    }

    pub fn jobs(&self) -> &[Job] {
        &self.jobs
    }

    pub fn registry(&self) -> &[Repository] {
        &self.registry
    }

    /// Recomputes the filtered jobs and label index from scratch.
    ///
    /// Before initialization the result is empty, matching what the view
    /// shows.
    pub fn listing(&self) -> Derivation<'_> {
        if !self.is_initialized() {
            return derive_listing(&[], &self.filters, &[]);
        }
        derive_listing(&self.jobs, &self.filters, &self.registry)
    }

    pub fn view(&self) -> AppViewModel {
        self.view_at(Utc::now())
    }

    /// Builds the view model, rendering relative times against `now`.
    pub fn view_at(&self, now: DateTime<Utc>) -> AppViewModel {
        if !self.is_initialized() {
            return AppViewModel::Loading;
        }
        AppViewModel::Ready(build_ready_view(self, &self.listing(), now))
    }

    /// Returns whether anything changed since the last call, and clears the flag.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    pub(crate) fn initialize(&mut self, filters: FilterState) {
        self.filters = filters;
        self.lifecycle = Lifecycle::Initialized;
        self.mark_dirty();
    }

    pub(crate) fn set_jobs(&mut self, jobs: Vec<Job>) {
        self.jobs = jobs;
        self.mark_dirty();
    }

    pub(crate) fn apply_patch(&mut self, patch: FilterPatch) {
        self.filters.apply(patch);
        self.mark_dirty();
    }

    fn mark_dirty(&mut self) {
        self.dirty = true;
    }
}
