use tokio::sync::RwLock;

use planscout_catalog::{Facets, FilterState};
use planscout_core::Plan;
use planscout_llm::FilterInterpreter;

use crate::source::PlanSource;

pub struct AppState {
    pub plans: RwLock<Vec<Plan>>,
    pub facets: RwLock<Facets>,
    /// The single logical session's filter selections.
    pub filters: RwLock<FilterState>,
    pub interpreter: Option<FilterInterpreter>,
    pub source: PlanSource,
}

impl AppState {
    /// Install a freshly loaded catalog: replace the plan list wholesale,
    /// rebuild facets, and reset the session filters over the new bounds.
    pub async fn install_catalog(&self, plans: Vec<Plan>) {
        let facets = Facets::from_plans(&plans);
        *self.filters.write().await = FilterState::unrestricted(facets.price_bounds);
        *self.facets.write().await = facets;
        *self.plans.write().await = plans;
    }
}
