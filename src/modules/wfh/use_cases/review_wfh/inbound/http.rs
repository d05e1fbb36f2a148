use axum::{
    Json,
    extract::{Path, State, rejection::JsonRejection},
    response::{IntoResponse, Response},
};
use serde::Deserialize;
use uuid::Uuid;

use crate::modules::wfh::use_cases::review_wfh::command::ReviewWfh;
use crate::shared::core::review::ReviewDecision;
use crate::shell::http::unprocessable;
use crate::shell::state::AppState;

#[derive(Deserialize)]
pub struct ReviewWfhBody {
    pub status: ReviewDecision,
    pub reviewer_id: String,
    pub review_comment: Option<String>,
}

pub async fn handle(
    State(state): State<AppState>,
    Path(request_id): Path<Uuid>,
    body: Result<Json<ReviewWfhBody>, JsonRejection>,
) -> Response {
    let Ok(Json(body)) = body else {
        return unprocessable();
    };

    state
        .review_wfh
        .handle(ReviewWfh {
            request_id,
            decision: body.status,
            reviewer_id: body.reviewer_id,
            comment: body.review_comment,
        })
        .await
        .map(Json)
        .into_response()
}
