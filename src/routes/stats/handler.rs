use axum::extract::{Json, State};

use crate::{AppState, error::AppError};

use super::model::StatsResponse;

#[axum::debug_handler]
pub async fn stats(State(state): State<AppState>) -> Result<Json<StatsResponse>, AppError> {
    let most = state
        .tracker
        .most_frequent()
        .await?
        .ok_or(AppError::NotFound)?;
    Ok(Json(most.into()))
}
