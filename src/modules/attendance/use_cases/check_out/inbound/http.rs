use axum::{
    Json,
    extract::{Path, State, rejection::JsonRejection},
    response::{IntoResponse, Response},
};
use chrono::Utc;
use serde::Deserialize;
use uuid::Uuid;

use crate::modules::attendance::use_cases::check_out::command::CheckOut;
use crate::shared::core::errors::ApplicationError;
use crate::shell::http::unprocessable;
use crate::shell::state::AppState;

#[derive(Deserialize)]
pub struct CheckOutBody {
    /// Defaults to the time the request is received.
    pub at: Option<String>,
}

pub async fn handle(
    State(state): State<AppState>,
    Path(record_id): Path<Uuid>,
    body: Result<Json<CheckOutBody>, JsonRejection>,
) -> Response {
    let Json(body) = match body {
        Ok(b) => b,
        Err(_) => return unprocessable(),
    };

    let at = match body.at {
        Some(raw) => match state.clock.parse_instant(&raw) {
            Ok(at) => at,
            Err(err) => return ApplicationError::from(err).into_response(),
        },
        None => Utc::now(),
    };

    state
        .check_out
        .handle(CheckOut { record_id, at })
        .await
        .map(Json)
        .into_response()
}
