//! Transfer Routes
//!
//! CSV download and upload of the whole objective list.
//!
//! - GET /api/v1/export - Download the list as a CSV attachment
//! - POST /api/v1/import - Replace the list with a CSV body

use axum::{
    body::Body,
    extract::State,
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use std::sync::Arc;

use crate::api::dto::ImportResponse;
use crate::api::error::ApiResult;
use crate::api::state::AppState;

/// GET /api/v1/export
pub async fn export_csv(State(state): State<Arc<AppState>>) -> ApiResult<Response> {
    let body = state.session.lock().await.export_csv()?;

    let disposition = format!(
        "attachment; filename=\"{}\"",
        state.csv.export_filename.replace('"', "")
    );

    Ok((
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, "text/csv; charset=utf-8".to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        Body::from(body),
    )
        .into_response())
}

/// POST /api/v1/import
///
/// The body is the CSV text. The import always succeeds: unreadable rows are
/// skipped and counted, bad values become 0, and an import that yields
/// nothing leaves one default objective.
pub async fn import_csv(
    State(state): State<Arc<AppState>>,
    body: String,
) -> Json<ImportResponse> {
    let response = {
        let mut session = state.session.lock().await;
        let (summary, update) = session.import_csv(&body);
        let response = ImportResponse::new(summary, &update, session.entries());
        state.announce(&update).await;
        response
    };

    tracing::info!(
        imported = response.imported,
        skipped = response.rows_skipped,
        bytes = body.len(),
        "CSV import via API"
    );
    Json(response)
}
