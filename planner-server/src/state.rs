use std::sync::Arc;

use planner_core::PlannerStore;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    store: Arc<dyn PlannerStore>,
}

impl AppState {
    pub fn new(store: Arc<dyn PlannerStore>) -> Self {
        AppState { store }
    }

    pub fn store(&self) -> &dyn PlannerStore {
        self.store.as_ref()
    }
}
