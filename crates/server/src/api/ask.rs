//! Free-text question endpoint: interpret, merge, re-match.

use std::sync::Arc;

use axum::extract::State;
use axum::Json;
use serde::{Deserialize, Serialize};

use planscout_catalog::{matching_plans, AssistantFilterPayload, FilterState};
use planscout_core::Plan;

use crate::state::AppState;

use super::ErrorResponse;

#[derive(Deserialize)]
pub struct AskRequest {
    pub question: String,
}

#[derive(Serialize)]
pub struct AskResponse {
    pub question: String,
    /// The payload as parsed; only the fields that survived validation.
    pub applied: AssistantFilterPayload,
    pub filters: FilterState,
    pub plans: Vec<Plan>,
}

pub async fn ask(
    State(state): State<Arc<AppState>>,
    Json(req): Json<AskRequest>,
) -> Result<Json<AskResponse>, (axum::http::StatusCode, Json<ErrorResponse>)> {
    let interpreter = state.interpreter.as_ref().ok_or_else(|| {
        (
            axum::http::StatusCode::SERVICE_UNAVAILABLE,
            Json(ErrorResponse {
                error: "Filter interpreter not configured. Set LLM_PROVIDER and API keys.".into(),
            }),
        )
    })?;

    let facets = state.facets.read().await.clone();

    // Interpreter failure leaves the session filters untouched.
    let payload = interpreter
        .interpret(&req.question, &facets)
        .await
        .map_err(|e| {
            (
                axum::http::StatusCode::BAD_GATEWAY,
                Json(ErrorResponse { error: e.to_string() }),
            )
        })?;

    let merged = {
        let mut filters = state.filters.write().await;
        *filters = filters.merged(&payload);
        filters.clone()
    };

    let plans = state.plans.read().await;
    let matched = matching_plans(&plans, &merged).into_iter().cloned().collect();

    Ok(Json(AskResponse {
        question: req.question,
        applied: payload,
        filters: merged,
        plans: matched,
    }))
}
