use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use chrono::{DateTime, Utc};
use serde::Deserialize;

use crate::modules::regularization::core::request::RegularizationRequest;
use crate::modules::regularization::use_cases::submit_regularization::command::SubmitRegularization;
use crate::shared::core::business_time::BusinessClock;
use crate::shared::core::errors::ApplicationError;
use crate::shell::http::unprocessable;
use crate::shell::state::AppState;

#[derive(Deserialize)]
pub struct SubmitRegularizationBody {
    pub employee_id: String,
    pub day: String,
    pub requested_check_in: Option<String>,
    pub requested_check_out: Option<String>,
    pub reason: String,
}

pub async fn handle(
    State(state): State<AppState>,
    body: Result<Json<SubmitRegularizationBody>, JsonRejection>,
) -> Response {
    let Json(body) = match body {
        Ok(b) => b,
        Err(_) => return unprocessable(),
    };

    match submit(&state, body).await {
        Ok(request) => (StatusCode::CREATED, Json(request)).into_response(),
        Err(err) => err.into_response(),
    }
}

async fn submit(
    state: &AppState,
    body: SubmitRegularizationBody,
) -> Result<RegularizationRequest, ApplicationError> {
    let command = SubmitRegularization {
        employee_id: body.employee_id,
        business_day: state.clock.parse_day(&body.day)?,
        requested_check_in: optional_instant(&state.clock, body.requested_check_in)?,
        requested_check_out: optional_instant(&state.clock, body.requested_check_out)?,
        reason: body.reason,
    };
    state.submit_regularization.handle(command).await
}

fn optional_instant(
    clock: &BusinessClock,
    raw: Option<String>,
) -> Result<Option<DateTime<Utc>>, ApplicationError> {
    Ok(raw.map(|raw| clock.parse_instant(&raw)).transpose()?)
}

#[cfg(test)]
mod submit_regularization_http_inbound_tests {
    use axum::{
        Router,
        http::{Method, StatusCode},
        routing::post,
    };
    use rstest::{fixture, rstest};

    use crate::tests::fixtures::engine::{EMPLOYEE, TestEngine};
    use crate::tests::fixtures::http::send;

    use super::handle;

    #[fixture]
    async fn before_each() -> TestEngine {
        TestEngine::new().await
    }

    fn app(engine: &TestEngine) -> Router {
        Router::new()
            .route("/regularizations", post(handle))
            .with_state(engine.state.clone())
    }

    #[rstest]
    #[tokio::test]
    async fn it_should_return_201_with_a_pending_request(#[future] before_each: TestEngine) {
        let engine = before_each.await;
        let body = format!(
            r#"{{"employee_id":"{EMPLOYEE}","day":"2024-03-04","requested_check_in":"2024-03-04T09:30","requested_check_out":"2024-03-04T18:30","reason":"Badge reader was down"}}"#
        );

        let (status, json) = send(app(&engine), Method::POST, "/regularizations", Some(&body)).await;

        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(json["status"], "pending");
        assert_eq!(json["business_day"], "2024-03-04");
        assert_eq!(json["requested_check_in"], "2024-03-04T04:00:00Z");
    }

    #[rstest]
    #[case(r#""requested_check_in":"2024-03-05T09:30","reason":"wrong day""#)]
    #[case(r#""requested_check_in":"2024-03-04T18:30","requested_check_out":"2024-03-04T09:30","reason":"backwards""#)]
    #[case(r#""reason":"   ""#)]
    #[tokio::test]
    async fn it_should_return_400_for_invalid_submissions(
        #[future] before_each: TestEngine,
        #[case] fields: &str,
    ) {
        let engine = before_each.await;
        let body = format!(r#"{{"employee_id":"{EMPLOYEE}","day":"2024-03-04",{fields}}}"#);

        let (status, json) = send(app(&engine), Method::POST, "/regularizations", Some(&body)).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["kind"], "validation_error");
    }

    #[rstest]
    #[tokio::test]
    async fn it_should_return_422_when_the_reason_is_missing(#[future] before_each: TestEngine) {
        let engine = before_each.await;
        let body = format!(r#"{{"employee_id":"{EMPLOYEE}","day":"2024-03-04"}}"#);

        let (status, _) = send(app(&engine), Method::POST, "/regularizations", Some(&body)).await;

        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    }
}
