//! Chart Routes
//!
//! - GET /api/v1/charts - All three chart configurations and the current frame
//! - GET /api/v1/charts/:kind - One Chart.js configuration (`personal`,
//!   `collective` or `combined`)

use axum::{
    extract::{Path, State},
    Json,
};
use std::sync::Arc;

use crate::api::dto::ChartsResponse;
use crate::api::error::{ApiError, ApiResult};
use crate::api::state::AppState;
use crate::chart::{ChartConfig, ChartKind};

/// GET /api/v1/charts
pub async fn get_charts(State(state): State<Arc<AppState>>) -> Json<ChartsResponse> {
    let frame = state.current_frame().await;
    let session = state.session.lock().await;
    let view = session.view();

    Json(ChartsResponse {
        projection: view.projection().to_string(),
        frame,
        charts: ChartKind::all()
            .into_iter()
            .filter_map(|kind| view.chart(kind).cloned())
            .collect(),
    })
}

/// GET /api/v1/charts/:kind
pub async fn get_chart(
    State(state): State<Arc<AppState>>,
    Path(kind): Path<ChartKind>,
) -> ApiResult<Json<ChartConfig>> {
    let session = state.session.lock().await;
    session
        .view()
        .chart(kind)
        .map(|chart| Json(chart.config().clone()))
        .ok_or_else(|| ApiError::NotFound(format!("Chart {} has not been drawn yet", kind)))
}
