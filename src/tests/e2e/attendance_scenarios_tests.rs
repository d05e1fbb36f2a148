// End-to-end scenarios over the fully wired engine: check-in and check-out, the two approval
// workflows and department settings, observed through the attendance store.

use chrono::Duration;
use rstest::{fixture, rstest};

use crate::modules::attendance::core::record::{GeofenceStatus, ReconciliationPatch};
use crate::modules::attendance::core::settings::SettingsOverride;
use crate::modules::attendance::core::status::AttendanceStatus;
use crate::modules::attendance::use_cases::check_in::command::CheckIn;
use crate::modules::attendance::use_cases::check_out::command::CheckOut;
use crate::modules::regularization::use_cases::review_regularization::command::ReviewRegularization;
use crate::modules::regularization::use_cases::submit_regularization::command::SubmitRegularization;
use crate::modules::wfh::use_cases::review_wfh::command::ReviewWfh;
use crate::modules::wfh::use_cases::submit_wfh::command::SubmitWfh;
use crate::shared::core::errors::ApplicationError;
use crate::shared::core::review::{ReviewDecision, ReviewStatus};
use crate::shared::infrastructure::notification_outbox::NotificationKind;
use crate::tests::fixtures::engine::{EMPLOYEE, SUPPORT_ENGINEER, TestEngine, day, ist};

#[fixture]
async fn before_each() -> TestEngine {
    TestEngine::new().await
}

fn regularization(
    requested_check_in: Option<chrono::DateTime<chrono::Utc>>,
    requested_check_out: Option<chrono::DateTime<chrono::Utc>>,
    reason: &str,
) -> SubmitRegularization {
    SubmitRegularization {
        employee_id: EMPLOYEE.into(),
        business_day: day(2024, 3, 5),
        requested_check_in,
        requested_check_out,
        reason: reason.into(),
    }
}

fn review(request_id: uuid::Uuid, decision: ReviewDecision) -> ReviewRegularization {
    ReviewRegularization {
        request_id,
        decision,
        reviewer_id: "hr-01".into(),
        comment: None,
    }
}

#[rstest]
#[tokio::test]
async fn it_should_create_an_open_present_record_when_approving_a_check_in_only_request(
    #[future] before_each: TestEngine,
) {
    let engine = before_each.await;
    let request = engine
        .submit_regularization
        .handle(regularization(Some(ist(2024, 3, 5, 9, 30)), None, "Forgot to punch in"))
        .await
        .unwrap();

    let reviewed = engine
        .review_regularization
        .handle(review(request.id, ReviewDecision::Approved))
        .await
        .unwrap();

    let record = engine
        .store
        .find_by_day(EMPLOYEE, day(2024, 3, 5))
        .await
        .unwrap()
        .unwrap();
    assert_eq!(record.check_in, Some(ist(2024, 3, 5, 9, 30)));
    assert_eq!(record.check_out, None);
    assert_eq!(record.status, AttendanceStatus::Present);
    assert_eq!(record.work_hours, 0.0);
    assert_eq!(record.reason.as_deref(), Some("regularized"));
    assert_eq!(reviewed.request.attendance_id, Some(record.id));
}

#[rstest]
#[tokio::test]
async fn it_should_update_a_pending_request_in_place_on_resubmission(
    #[future] before_each: TestEngine,
) {
    let engine = before_each.await;
    let first = engine
        .submit_regularization
        .handle(regularization(Some(ist(2024, 3, 5, 9, 30)), None, "Forgot to punch in"))
        .await
        .unwrap();

    let second = engine
        .submit_regularization
        .handle(regularization(
            Some(ist(2024, 3, 5, 9, 20)),
            Some(ist(2024, 3, 5, 18, 0)),
            "Forgot to punch in and out",
        ))
        .await
        .unwrap();

    let mine = engine
        .list_regularizations
        .by_employee(EMPLOYEE, None)
        .await
        .unwrap();
    assert_eq!(second.id, first.id);
    assert_eq!(mine.len(), 1);
    assert_eq!(mine[0].requested_check_out, Some(ist(2024, 3, 5, 18, 0)));
    assert_eq!(mine[0].reason, "Forgot to punch in and out");
    assert_eq!(mine[0].status, ReviewStatus::Pending);
}

#[rstest]
#[tokio::test]
async fn it_should_create_a_geofence_exception_record_when_approving_wfh(
    #[future] before_each: TestEngine,
) {
    let engine = before_each.await;
    let request = engine
        .submit_wfh
        .handle(SubmitWfh {
            employee_id: EMPLOYEE.into(),
            submitted_at: ist(2024, 4, 1, 8, 0),
            requested_check_in_time: Some(ist(2024, 4, 1, 9, 15)),
            reason: "Water supply repair at home".into(),
            location: None,
        })
        .await
        .unwrap();
    assert_eq!(request.request_date, day(2024, 4, 1));

    let reviewed = engine
        .review_wfh
        .handle(ReviewWfh {
            request_id: request.id,
            decision: ReviewDecision::Approved,
            reviewer_id: "hr-01".into(),
            comment: Some("Approved".into()),
        })
        .await
        .unwrap();

    let record = reviewed.attendance.unwrap();
    assert_eq!(record.business_day, day(2024, 4, 1));
    assert_eq!(record.check_in, Some(ist(2024, 4, 1, 9, 15)));
    assert_eq!(record.check_out, None);
    assert_eq!(record.status, AttendanceStatus::Present);
    assert_eq!(
        record.location.map(|l| l.geofence_status),
        Some(GeofenceStatus::Wfh)
    );
    assert_eq!(reviewed.request.consumed_attendance, Some(record.id));
}

#[rstest]
#[tokio::test]
async fn it_should_refuse_to_approve_a_rejected_request_without_touching_attendance(
    #[future] before_each: TestEngine,
) {
    let engine = before_each.await;
    let request = engine
        .submit_regularization
        .handle(regularization(Some(ist(2024, 3, 5, 9, 30)), None, "Forgot to punch in"))
        .await
        .unwrap();
    engine
        .review_regularization
        .handle(review(request.id, ReviewDecision::Rejected))
        .await
        .unwrap();

    let result = engine
        .review_regularization
        .handle(review(request.id, ReviewDecision::Approved))
        .await;

    assert!(matches!(result, Err(ApplicationError::InvalidState(_))));
    assert_eq!(engine.attendance.count().await, 0);
}

#[rstest]
#[tokio::test]
async fn it_should_yield_the_same_record_when_a_patch_is_applied_twice(
    #[future] before_each: TestEngine,
) {
    let engine = before_each.await;
    let patch = ReconciliationPatch {
        check_in: Some(ist(2024, 3, 5, 9, 30)),
        check_out: Some(ist(2024, 3, 5, 18, 0)),
        reason: Some("regularized".into()),
        comments: Some("regularized".into()),
        ..Default::default()
    };

    let once = engine
        .store
        .apply_reconciliation(EMPLOYEE, day(2024, 3, 5), patch.clone())
        .await
        .unwrap();
    let twice = engine
        .store
        .apply_reconciliation(EMPLOYEE, day(2024, 3, 5), patch)
        .await
        .unwrap();

    assert_eq!(twice, once);
    assert_eq!(twice.work_hours, 8.5);
}

#[rstest]
#[tokio::test]
async fn it_should_classify_against_the_employees_department_settings(
    #[future] before_each: TestEngine,
) {
    let engine = before_each.await;
    engine
        .settings
        .update_department(
            "support",
            SettingsOverride {
                minimum_work_hours: Some(6.0),
                ..Default::default()
            },
        )
        .await
        .unwrap();

    let mut statuses = Vec::new();
    for employee_id in [EMPLOYEE, SUPPORT_ENGINEER] {
        let record = engine
            .check_in
            .handle(CheckIn {
                employee_id: employee_id.into(),
                at: ist(2024, 3, 5, 9, 30),
                location: None,
            })
            .await
            .unwrap();
        let closed = engine
            .check_out
            .handle(CheckOut {
                record_id: record.id,
                at: ist(2024, 3, 5, 9, 30) + Duration::hours(5),
            })
            .await
            .unwrap();
        statuses.push(closed.status);
    }

    assert_eq!(statuses, vec![AttendanceStatus::Present, AttendanceStatus::HalfDay]);
}

#[rstest]
#[tokio::test]
async fn it_should_close_the_day_when_a_check_out_correction_is_approved(
    #[future] before_each: TestEngine,
) {
    let engine = before_each.await;
    let record = engine
        .check_in
        .handle(CheckIn {
            employee_id: EMPLOYEE.into(),
            at: ist(2024, 3, 5, 10, 0),
            location: None,
        })
        .await
        .unwrap();
    assert!(record.is_late);

    let request = engine
        .submit_regularization
        .handle(regularization(None, Some(ist(2024, 3, 5, 19, 0)), "Left without punching out"))
        .await
        .unwrap();
    let reviewed = engine
        .review_regularization
        .handle(review(request.id, ReviewDecision::Approved))
        .await
        .unwrap();

    let closed = reviewed.attendance.unwrap();
    assert_eq!(closed.id, record.id);
    assert_eq!(closed.check_in, record.check_in);
    assert_eq!(closed.work_hours, 9.0);
    assert_eq!(closed.status, AttendanceStatus::Present);
    assert!(closed.is_late);

    let notifications = engine.wait_for_notifications(2).await;
    let kinds: Vec<_> = notifications.iter().map(|n| n.kind).collect();
    assert_eq!(
        kinds,
        vec![
            NotificationKind::RegularizationRequest,
            NotificationKind::RegularizationStatusUpdate
        ]
    );
}
