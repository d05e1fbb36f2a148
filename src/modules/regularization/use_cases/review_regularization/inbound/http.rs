use axum::{
    Json,
    extract::{Path, State, rejection::JsonRejection},
    response::{IntoResponse, Response},
};
use serde::Deserialize;
use uuid::Uuid;

use crate::modules::regularization::use_cases::review_regularization::command::ReviewRegularization;
use crate::shared::core::review::ReviewDecision;
use crate::shell::http::unprocessable;
use crate::shell::state::AppState;

#[derive(Deserialize)]
pub struct ReviewBody {
    /// `approved` or `rejected`; anything else fails to deserialize.
    pub status: ReviewDecision,
    pub reviewer_id: String,
    pub review_comment: Option<String>,
}

pub async fn handle(
    State(state): State<AppState>,
    Path(request_id): Path<Uuid>,
    body: Result<Json<ReviewBody>, JsonRejection>,
) -> Response {
    let Json(body) = match body {
        Ok(b) => b,
        Err(_) => return unprocessable(),
    };

    let command = ReviewRegularization {
        request_id,
        decision: body.status,
        reviewer_id: body.reviewer_id,
        comment: body.review_comment,
    };

    state
        .review_regularization
        .handle(command)
        .await
        .map(Json)
        .into_response()
}
