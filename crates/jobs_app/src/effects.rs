use std::sync::Arc;

use jobs_core::Effect;
use jobs_engine::KeyValueStore;
use jobs_logging::{jobs_debug, jobs_error};

use crate::PageLocation;

/// Executes core effects against durable storage and the page location.
pub struct EffectRunner {
    store: Arc<dyn KeyValueStore>,
    location: PageLocation,
}

impl EffectRunner {
    pub fn new(store: Arc<dyn KeyValueStore>, location: PageLocation) -> Self {
        Self { store, location }
    }

    pub fn location(&self) -> &PageLocation {
        &self.location
    }

    pub fn store(&self) -> &dyn KeyValueStore {
        self.store.as_ref()
    }

    pub fn apply(&mut self, effects: Vec<Effect>) {
        for effect in effects {
            match effect {
                Effect::PersistFilters { key, json } => {
                    if let Err(err) = self.store.set(&key, &json) {
                        jobs_error!("Failed to persist filters under {}: {}", key, err);
                    }
                }
                Effect::ReplaceQuery { query } => {
                    jobs_debug!("ReplaceQuery query={:?}", query);
                    self.location.replace_query(query);
                }
            }
        }
    }
}
