use axum::{
    extract::State,
    http::header,
    response::{IntoResponse, Response},
};

use crate::error::AppError;
use crate::state::AppState;

/// GET /api/cruises
/// Upstream cruise feed, forwarded unmodified
pub async fn get_cruises(State(state): State<AppState>) -> Result<Response, AppError> {
    let body = state.proxy.fetch().await?;
    Ok(([(header::CONTENT_TYPE, "application/json")], body).into_response())
}
