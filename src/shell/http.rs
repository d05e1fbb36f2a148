use axum::{
    Json, Router,
    extract::{Query, rejection::QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post, put},
};
use serde_json::json;
use tower_http::trace::TraceLayer;

use crate::modules::attendance::use_cases::check_in::inbound::http as check_in_http;
use crate::modules::attendance::use_cases::check_out::inbound::http as check_out_http;
use crate::modules::attendance::use_cases::list_attendance::inbound::http as list_attendance_http;
use crate::modules::attendance::use_cases::mark_absent::inbound::http as mark_absent_http;
use crate::modules::attendance::use_cases::resolve_settings::inbound::http as settings_http;
use crate::modules::regularization::use_cases::list_regularizations::inbound::http as list_regularizations_http;
use crate::modules::regularization::use_cases::review_regularization::inbound::http as review_regularization_http;
use crate::modules::regularization::use_cases::submit_regularization::inbound::http as submit_regularization_http;
use crate::modules::wfh::use_cases::list_wfh::inbound::http as list_wfh_http;
use crate::modules::wfh::use_cases::review_wfh::inbound::http as review_wfh_http;
use crate::modules::wfh::use_cases::submit_wfh::inbound::http as submit_wfh_http;
use crate::shared::core::errors::ApplicationError;
use crate::shell::state::AppState;

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/attendance", get(list_attendance_http::by_employee))
        .route("/attendance/all", get(list_attendance_http::between))
        .route("/attendance/today", get(list_attendance_http::today))
        .route(
            "/attendance/missing-checkouts",
            get(list_attendance_http::missing_checkouts),
        )
        .route("/attendance/day-plan", get(list_attendance_http::day_plan))
        .route("/attendance/check-in", post(check_in_http::handle))
        .route("/attendance/{record_id}/check-out", post(check_out_http::handle))
        .route("/attendance/mark-absent", post(mark_absent_http::handle))
        .route("/settings/effective", get(settings_http::effective))
        .route("/settings/global", put(settings_http::update_global))
        .route(
            "/settings/departments/{department}",
            put(settings_http::update_department),
        )
        .route(
            "/regularizations",
            post(submit_regularization_http::handle).get(list_regularizations_http::handle),
        )
        .route(
            "/regularizations/{request_id}/review",
            post(review_regularization_http::handle),
        )
        .route(
            "/wfh",
            post(submit_wfh_http::handle).get(list_wfh_http::handle),
        )
        .route("/wfh/{request_id}/review", post(review_wfh_http::handle))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

pub fn status_of(error: &ApplicationError) -> StatusCode {
    match error {
        ApplicationError::Validation(_) => StatusCode::BAD_REQUEST,
        ApplicationError::NotFound(_) => StatusCode::NOT_FOUND,
        ApplicationError::Conflict(_) | ApplicationError::InvalidState(_) => StatusCode::CONFLICT,
        ApplicationError::BusinessLogic(_) => StatusCode::UNPROCESSABLE_ENTITY,
        ApplicationError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

impl IntoResponse for ApplicationError {
    fn into_response(self) -> Response {
        let status = status_of(&self);
        if status.is_server_error() {
            tracing::error!(error = %self, "request failed");
        }
        (
            status,
            Json(json!({ "kind": self.kind(), "message": self.to_string() })),
        )
            .into_response()
    }
}

/// Malformed JSON bodies are rejected the same way everywhere.
pub fn unprocessable() -> Response {
    (
        StatusCode::UNPROCESSABLE_ENTITY,
        Json(json!({ "kind": "validation_error", "message": "malformed request body" })),
    )
        .into_response()
}

/// Query strings that do not deserialize are validation failures with the usual JSON body.
pub fn query_or_invalid<T>(query: Result<Query<T>, QueryRejection>) -> Result<T, ApplicationError> {
    query
        .map(|Query(inner)| inner)
        .map_err(|rejection| ApplicationError::Validation(rejection.body_text()))
}

#[cfg(test)]
mod http_error_mapping_tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(ApplicationError::Validation("x".into()), StatusCode::BAD_REQUEST)]
    #[case(ApplicationError::NotFound("x".into()), StatusCode::NOT_FOUND)]
    #[case(ApplicationError::Conflict("x".into()), StatusCode::CONFLICT)]
    #[case(ApplicationError::InvalidState("x".into()), StatusCode::CONFLICT)]
    #[case(ApplicationError::BusinessLogic("x".into()), StatusCode::UNPROCESSABLE_ENTITY)]
    #[case(ApplicationError::Storage("x".into()), StatusCode::INTERNAL_SERVER_ERROR)]
    fn it_should_map_error_kinds_to_status_codes(
        #[case] error: ApplicationError,
        #[case] status: StatusCode,
    ) {
        assert_eq!(error.into_response().status(), status);
    }
}
