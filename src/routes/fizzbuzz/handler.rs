use axum::extract::{Json, State, rejection::JsonRejection};

use crate::{AppState, error::AppError, models::ParameterSet};

use super::model::{GenerateRequest, GenerateResponse};

#[axum::debug_handler]
pub async fn generate(
    State(state): State<AppState>,
    payload: Result<Json<GenerateRequest>, JsonRejection>,
) -> Result<Json<GenerateResponse>, AppError> {
    let Json(req) = payload?;
    let params = ParameterSet::try_from(req)?.within_limit(state.config.max_limit)?;

    let result = params.sequence();
    record_hit(&state, &params).await;

    Ok(Json(GenerateResponse { result }))
}

// 计数失败只记录日志，不影响本次响应
async fn record_hit(state: &AppState, params: &ParameterSet) {
    let timeout = state.config.store_timeout();
    match tokio::time::timeout(timeout, state.tracker.record_hit(params)).await {
        Ok(Ok(_)) => {}
        Ok(Err(e)) => tracing::warn!("Failed to record hit for {:?}: {}", params, e),
        Err(_) => tracing::warn!(
            "Recording hit for {:?} timed out after {:?}",
            params,
            timeout
        ),
    }
}
