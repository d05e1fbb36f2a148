use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
    response::{IntoResponse, Response},
};
use serde::Deserialize;

use crate::modules::attendance::core::record::AttendanceRecord;
use crate::shared::core::errors::ApplicationError;
use crate::shell::http::unprocessable;
use crate::shell::state::AppState;

#[derive(Deserialize)]
pub struct MarkAbsentBody {
    pub employee_id: String,
    pub day: String,
}

pub async fn handle(
    State(state): State<AppState>,
    body: Result<Json<MarkAbsentBody>, JsonRejection>,
) -> Response {
    match body {
        Ok(Json(body)) => mark_absent(&state, body).await.map(Json).into_response(),
        Err(_) => unprocessable(),
    }
}

async fn mark_absent(
    state: &AppState,
    body: MarkAbsentBody,
) -> Result<AttendanceRecord, ApplicationError> {
    let day = state.clock.parse_day(&body.day)?;
    state.store.mark_absent(&body.employee_id, day).await
}
