//! Domain-focused API endpoint modules.
//!
//! Each sub-module owns a single responsibility area; shared response
//! shapes live here in mod.rs.

mod ask;
mod health;
mod plans;

use planscout_catalog::FilterState;
use planscout_core::Plan;
use serde::Serialize;

// ── Shared types ─────────────────────────────────────────────────

#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// Filter state plus the plans it admits; returned when a filter edit
/// changes what the user sees.
#[derive(Serialize)]
pub struct MatchResponse {
    pub filters: FilterState,
    pub plans: Vec<Plan>,
}

// ── Re-exports ───────────────────────────────────────────────────
// Preserves flat `api::foo` import paths used by the route registration.

pub use ask::ask;
pub use health::health;
pub use plans::{facets, filters_get, filters_put, list, matches, reload};
