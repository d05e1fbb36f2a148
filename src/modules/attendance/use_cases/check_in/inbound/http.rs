use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use chrono::Utc;
use serde::Deserialize;

use crate::modules::attendance::core::record::LocationMeta;
use crate::modules::attendance::use_cases::check_in::command::CheckIn;
use crate::shared::core::errors::ApplicationError;
use crate::shell::http::unprocessable;
use crate::shell::state::AppState;

#[derive(Deserialize)]
pub struct CheckInBody {
    pub employee_id: String,
    /// Defaults to the time the request is received.
    pub at: Option<String>,
    pub location: Option<LocationMeta>,
}

pub async fn handle(
    State(state): State<AppState>,
    body: Result<Json<CheckInBody>, JsonRejection>,
) -> Response {
    let Json(body) = match body {
        Ok(b) => b,
        Err(_) => return unprocessable(),
    };

    let at = match body.at.as_deref().map(|raw| state.clock.parse_instant(raw)) {
        None => Utc::now(),
        Some(Ok(at)) => at,
        Some(Err(err)) => return ApplicationError::from(err).into_response(),
    };

    let command = CheckIn {
        employee_id: body.employee_id,
        at,
        location: body.location,
    };

    match state.check_in.handle(command).await {
        Ok(record) => (StatusCode::CREATED, Json(record)).into_response(),
        Err(err) => err.into_response(),
    }
}
