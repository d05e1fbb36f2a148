// The composed router end to end: a regularized day read back through the list endpoint.

use axum::http::{Method, StatusCode};
use rstest::{fixture, rstest};

use crate::shell::http::router;
use crate::tests::fixtures::engine::{EMPLOYEE, TestEngine};
use crate::tests::fixtures::http::send;

#[fixture]
async fn before_each() -> TestEngine {
    TestEngine::new().await
}

#[rstest]
#[tokio::test]
async fn it_should_serve_a_check_in_then_check_out_day(#[future] before_each: TestEngine) {
    let engine = before_each.await;
    let app = || router(engine.state.clone());

    let (status, record) = send(
        app(),
        Method::POST,
        "/attendance/check-in",
        Some(&format!(r#"{{"employee_id":"{EMPLOYEE}","at":"2024-03-05T09:56:00+05:30"}}"#)),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(record["is_late"], true);

    let id = record["id"].as_str().unwrap();
    let (status, closed) = send(
        app(),
        Method::POST,
        &format!("/attendance/{id}/check-out"),
        Some(r#"{"at":"2024-03-05T11:56"}"#),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(closed["status"], "half-day");
    assert_eq!(closed["work_hours"], 2.0);
}

#[rstest]
#[tokio::test]
async fn it_should_reconcile_an_approved_regularization_into_the_attendance_list(
    #[future] before_each: TestEngine,
) {
    let engine = before_each.await;
    let app = || router(engine.state.clone());

    let (status, request) = send(
        app(),
        Method::POST,
        "/regularizations",
        Some(&format!(
            r#"{{"employee_id":"{EMPLOYEE}","day":"2024-03-05","requested_check_in":"2024-03-05T09:30","reason":"Forgot to punch in"}}"#
        )),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let request_id = request["id"].as_str().unwrap();
    let (status, _) = send(
        app(),
        Method::POST,
        &format!("/regularizations/{request_id}/review"),
        Some(r#"{"status":"approved","reviewer_id":"hr-01"}"#),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (_, days) = send(
        app(),
        Method::GET,
        &format!("/attendance?employee_id={EMPLOYEE}&from=2024-03-01&to=2024-03-31"),
        None,
    )
    .await;
    let days = days.as_array().unwrap();
    assert_eq!(days.len(), 1);
    assert_eq!(days[0]["status"], "present");
    assert_eq!(days[0]["check_out"], serde_json::Value::Null);
    assert_eq!(days[0]["reason"], "regularized");

    let (_, approved) = send(app(), Method::GET, "/regularizations?status=approved", None).await;
    assert_eq!(approved[0]["attendance_id"], days[0]["id"]);
}

#[rstest]
#[tokio::test]
async fn it_should_answer_unknown_routes_with_404(#[future] before_each: TestEngine) {
    let engine = before_each.await;
    let (status, _) = send(router(engine.state.clone()), Method::GET, "/time-entries", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}
