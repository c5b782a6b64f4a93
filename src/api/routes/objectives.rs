//! Objective Routes
//!
//! Endpoints that read and mutate the objective list.
//!
//! - GET /api/v1/objectives - List all objectives in display order
//! - POST /api/v1/objectives - Append an objective (omitted fields default)
//! - PUT /api/v1/objectives/:id - Change fields of one objective
//! - DELETE /api/v1/objectives/:id - Delete one objective
//! - POST /api/v1/objectives/:id/move - Move one objective to a position
//! - POST /api/v1/objectives/form - Rebuild the list from `{field}{index}` form fields
//!
//! Axis values outside [0, 1] are clamped. Every mutation is persisted, the
//! charts are redrawn and WebSocket clients are notified before the response
//! is sent.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Form, Json,
};
use std::sync::Arc;

use crate::api::dto::{MoveRequest, MutationResponse, ObjectiveListResponse};
use crate::api::error::{ApiError, ApiResult};
use crate::api::state::AppState;
use crate::objective::{FormSnapshot, ObjectiveId, ObjectivePatch};

/// GET /api/v1/objectives
pub async fn list_objectives(State(state): State<Arc<AppState>>) -> Json<ObjectiveListResponse> {
    let session = state.session.lock().await;
    Json(ObjectiveListResponse::new(session.entries()))
}

/// POST /api/v1/objectives
///
/// Body is an objective patch; `{}` appends `"Objective {n}"` with every axis
/// at 0.5.
pub async fn create_objective(
    State(state): State<Arc<AppState>>,
    Json(patch): Json<ObjectivePatch>,
) -> ApiResult<(StatusCode, Json<MutationResponse>)> {
    validate_name(&patch)?;

    let response = {
        let mut session = state.session.lock().await;
        let update = session.add(&patch);
        let response = MutationResponse::new(&update, session.entries());
        state.announce(&update).await;
        response
    };

    if let Some(id) = response.created {
        tracing::info!(objective_id = %id, "Created objective");
    }

    Ok((StatusCode::CREATED, Json(response)))
}

/// PUT /api/v1/objectives/:id
pub async fn update_objective(
    State(state): State<Arc<AppState>>,
    Path(id): Path<u64>,
    Json(patch): Json<ObjectivePatch>,
) -> ApiResult<Json<MutationResponse>> {
    if patch.is_empty() {
        return Err(ApiError::Validation("Nothing to update".to_string()));
    }
    validate_name(&patch)?;

    let response = {
        let mut session = state.session.lock().await;
        let update = session.update(ObjectiveId(id), &patch)?;
        let response = MutationResponse::new(&update, session.entries());
        state.announce(&update).await;
        response
    };

    Ok(Json(response))
}

/// DELETE /api/v1/objectives/:id
///
/// Deleting the last objective is allowed; the list stays empty until the
/// next restart or import.
pub async fn delete_objective(
    State(state): State<Arc<AppState>>,
    Path(id): Path<u64>,
) -> ApiResult<Json<MutationResponse>> {
    let response = {
        let mut session = state.session.lock().await;
        let update = session.remove(ObjectiveId(id))?;
        let response = MutationResponse::new(&update, session.entries());
        state.announce(&update).await;
        response
    };

    tracing::info!(objective_id = id, "Deleted objective");
    Ok(Json(response))
}

/// POST /api/v1/objectives/:id/move
pub async fn move_objective(
    State(state): State<Arc<AppState>>,
    Path(id): Path<u64>,
    Json(req): Json<MoveRequest>,
) -> ApiResult<Json<MutationResponse>> {
    let response = {
        let mut session = state.session.lock().await;
        let update = session.move_to(ObjectiveId(id), req.position)?;
        let response = MutationResponse::new(&update, session.entries());
        state.announce(&update).await;
        response
    };

    Ok(Json(response))
}

/// POST /api/v1/objectives/form
///
/// Accepts `application/x-www-form-urlencoded` with fields named
/// `name0`, `fun0`, `achievement0`, ... The list is rebuilt from the form;
/// positions that already existed keep their ids.
pub async fn submit_form(
    State(state): State<Arc<AppState>>,
    Form(fields): Form<Vec<(String, String)>>,
) -> Json<MutationResponse> {
    let snapshot: FormSnapshot = fields.into_iter().collect();

    let response = {
        let mut session = state.session.lock().await;
        let update = session.apply_form(&snapshot);
        let response = MutationResponse::new(&update, session.entries());
        state.announce(&update).await;
        response
    };

    tracing::debug!(fields = snapshot.len(), objectives = response.objectives.len(), "Applied form");
    Json(response)
}

/// Names must not contain control characters
fn validate_name(patch: &ObjectivePatch) -> ApiResult<()> {
    match &patch.name {
        Some(name) if name.chars().any(char::is_control) => Err(ApiError::Validation(
            "Objective name must not contain control characters".to_string(),
        )),
        _ => Ok(()),
    }
}
