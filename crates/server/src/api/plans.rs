//! Catalog browsing, facet options, and direct filter edits.

use std::sync::Arc;

use axum::extract::State;
use axum::Json;
use serde::Serialize;

use planscout_catalog::{matching_plans, Facets, FilterState};
use planscout_core::Plan;

use crate::state::AppState;

use super::MatchResponse;

// ── Catalog & facets ──────────────────────────────────────────────

pub async fn list(State(state): State<Arc<AppState>>) -> Json<Vec<Plan>> {
    Json(state.plans.read().await.clone())
}

pub async fn facets(State(state): State<Arc<AppState>>) -> Json<Facets> {
    Json(state.facets.read().await.clone())
}

// ── Filter state ──────────────────────────────────────────────────

pub async fn filters_get(State(state): State<Arc<AppState>>) -> Json<FilterState> {
    Json(state.filters.read().await.clone())
}

/// Replace the session filter state wholesale (a direct UI edit) and
/// respond with the re-matched plan list.
pub async fn filters_put(
    State(state): State<Arc<AppState>>,
    Json(mut next): Json<FilterState>,
) -> Json<MatchResponse> {
    // The UI's range sliders are bounded client-side; mirror that here so a
    // direct API edit cannot leave the catalog's price band.
    if let Some(bounds) = state.facets.read().await.price_bounds {
        next.price_range.0 = next.price_range.0.clamp(bounds.min, bounds.max);
        next.price_range.1 = next.price_range.1.clamp(bounds.min, bounds.max);
    }

    *state.filters.write().await = next.clone();

    let plans = state.plans.read().await;
    let matched = matching_plans(&plans, &next).into_iter().cloned().collect();
    Json(MatchResponse {
        filters: next,
        plans: matched,
    })
}

pub async fn matches(State(state): State<Arc<AppState>>) -> Json<Vec<Plan>> {
    let filters = state.filters.read().await.clone();
    let plans = state.plans.read().await;
    let matched = matching_plans(&plans, &filters).into_iter().cloned().collect();
    Json(matched)
}

// ── Catalog reload ────────────────────────────────────────────────

#[derive(Serialize)]
pub struct ReloadResponse {
    pub plan_count: usize,
}

/// Re-fetch the catalog wholesale. Facets are rebuilt and the session
/// filters reset over the new price bounds.
pub async fn reload(State(state): State<Arc<AppState>>) -> Json<ReloadResponse> {
    let plans = state.source.load_or_empty().await;
    let plan_count = plans.len();
    state.install_catalog(plans).await;
    Json(ReloadResponse { plan_count })
}
