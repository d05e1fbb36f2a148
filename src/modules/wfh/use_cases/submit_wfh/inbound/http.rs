use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use chrono::Utc;
use serde::Deserialize;

use crate::modules::wfh::core::geo::Coordinates;
use crate::modules::wfh::core::request::WfhRequest;
use crate::modules::wfh::use_cases::submit_wfh::command::SubmitWfh;
use crate::shared::core::errors::ApplicationError;
use crate::shell::http::unprocessable;
use crate::shell::state::AppState;

#[derive(Deserialize)]
pub struct SubmitWfhBody {
    pub employee_id: String,
    pub reason: String,
    pub requested_check_in_time: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

pub async fn handle(
    State(state): State<AppState>,
    body: Result<Json<SubmitWfhBody>, JsonRejection>,
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

async fn submit(state: &AppState, body: SubmitWfhBody) -> Result<WfhRequest, ApplicationError> {
    let location = match (body.latitude, body.longitude) {
        (Some(latitude), Some(longitude)) => Some(Coordinates {
            latitude,
            longitude,
        }),
        (None, None) => None,
        _ => {
            return Err(ApplicationError::Validation(
                "latitude and longitude must be supplied together".into(),
            ));
        }
    };
    let requested_check_in_time = body
        .requested_check_in_time
        .map(|raw| state.clock.parse_instant(&raw))
        .transpose()?;

    state
        .submit_wfh
        .handle(SubmitWfh {
            employee_id: body.employee_id,
            submitted_at: Utc::now(),
            requested_check_in_time,
            reason: body.reason,
            location,
        })
        .await
}

#[cfg(test)]
mod submit_wfh_http_inbound_tests {
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
            .route("/wfh", post(handle))
            .with_state(engine.state.clone())
    }

    #[rstest]
    #[tokio::test]
    async fn it_should_return_201_with_the_nearest_office(#[future] before_each: TestEngine) {
        let engine = before_each.await;
        let body = format!(
            r#"{{"employee_id":"{EMPLOYEE}","reason":"Plumber visiting at home","latitude":12.93,"longitude":77.62}}"#
        );

        let (status, json) = send(app(&engine), Method::POST, "/wfh", Some(&body)).await;

        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(json["status"], "pending");
        assert_eq!(json["nearest_office"], "Bengaluru HQ");
        assert_eq!(json["request_date"], engine.clock.today().to_string());
    }

    #[rstest]
    #[tokio::test]
    async fn it_should_return_409_for_a_second_request_on_the_same_day(
        #[future] before_each: TestEngine,
    ) {
        let engine = before_each.await;
        let body = format!(r#"{{"employee_id":"{EMPLOYEE}","reason":"Plumber visiting at home"}}"#);
        send(app(&engine), Method::POST, "/wfh", Some(&body)).await;

        let (status, json) = send(app(&engine), Method::POST, "/wfh", Some(&body)).await;

        assert_eq!(status, StatusCode::CONFLICT);
        assert_eq!(json["kind"], "conflict_error");
    }

    #[rstest]
    #[case(r#""reason":"too short""#)]
    #[case(r#""reason":"Plumber visiting at home","latitude":12.9"#)]
    #[case(r#""reason":"Plumber visiting at home","latitude":120.0,"longitude":77.6"#)]
    #[case(r#""reason":"Plumber visiting at home","requested_check_in_time":"1999-01-01T09:00""#)]
    #[tokio::test]
    async fn it_should_return_400_for_invalid_requests(
        #[future] before_each: TestEngine,
        #[case] fields: &str,
    ) {
        let engine = before_each.await;
        let body = format!(r#"{{"employee_id":"{EMPLOYEE}",{fields}}}"#);

        let (status, json) = send(app(&engine), Method::POST, "/wfh", Some(&body)).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["kind"], "validation_error");
    }
}
