// Races on the two contended resources: the (employee, day) attendance record and a pending
// request's review transition.

use rstest::{fixture, rstest};
use tokio::join;
use tokio::task::JoinSet;

use crate::modules::attendance::core::record::GeofenceStatus;
use crate::modules::attendance::use_cases::check_in::command::CheckIn;
use crate::modules::regularization::adapters::outbound::regularization_repository::RegularizationRepository;
use crate::modules::regularization::use_cases::review_regularization::command::ReviewRegularization;
use crate::modules::regularization::use_cases::submit_regularization::command::SubmitRegularization;
use crate::modules::wfh::use_cases::review_wfh::command::ReviewWfh;
use crate::modules::wfh::use_cases::submit_wfh::command::SubmitWfh;
use crate::shared::core::errors::ApplicationError;
use crate::shared::core::review::{ReviewDecision, ReviewStatus};
use crate::tests::fixtures::engine::{EMPLOYEE, TestEngine, day, ist};

#[fixture]
async fn before_each() -> TestEngine {
    let engine = TestEngine::new().await;
    engine.attendance.set_delay_write_ms(10);
    engine
}

#[rstest]
#[tokio::test]
async fn it_should_keep_one_record_when_check_in_and_both_approvals_race(
    #[future] before_each: TestEngine,
) {
    let engine = before_each.await;
    let regularization = engine
        .submit_regularization
        .handle(SubmitRegularization {
            employee_id: EMPLOYEE.into(),
            business_day: day(2024, 4, 1),
            requested_check_in: Some(ist(2024, 4, 1, 9, 20)),
            requested_check_out: None,
            reason: "Badge reader was down".into(),
        })
        .await
        .unwrap();
    let wfh = engine
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

    let (checked_in, regularized, wfh_reviewed) = join!(
        engine.check_in.handle(CheckIn {
            employee_id: EMPLOYEE.into(),
            at: ist(2024, 4, 1, 9, 40),
            location: None,
        }),
        engine.review_regularization.handle(ReviewRegularization {
            request_id: regularization.id,
            decision: ReviewDecision::Approved,
            reviewer_id: "hr-01".into(),
            comment: None,
        }),
        engine.review_wfh.handle(ReviewWfh {
            request_id: wfh.id,
            decision: ReviewDecision::Approved,
            reviewer_id: "hr-02".into(),
            comment: None,
        }),
    );

    assert!(matches!(checked_in, Ok(_) | Err(ApplicationError::Conflict(_))));
    let regularized = regularized.unwrap();
    let wfh_reviewed = wfh_reviewed.unwrap();
    assert_eq!(engine.attendance.count().await, 1);

    let record = engine
        .store
        .find_by_day(EMPLOYEE, day(2024, 4, 1))
        .await
        .unwrap()
        .unwrap();
    assert!(record.check_in.is_some());
    assert_eq!(
        record.location.map(|l| l.geofence_status),
        Some(GeofenceStatus::Wfh)
    );
    assert_eq!(regularized.request.attendance_id, Some(record.id));
    assert_eq!(wfh_reviewed.request.consumed_attendance, Some(record.id));
}

#[rstest]
#[tokio::test]
async fn it_should_let_exactly_one_of_many_concurrent_check_ins_win(
    #[future] before_each: TestEngine,
) {
    let engine = before_each.await;
    let mut attempts = JoinSet::new();
    for minute in 0..8 {
        let check_in = engine.check_in.clone();
        attempts.spawn(async move {
            check_in
                .handle(CheckIn {
                    employee_id: EMPLOYEE.into(),
                    at: ist(2024, 3, 5, 9, minute),
                    location: None,
                })
                .await
        });
    }

    let mut won = 0;
    while let Some(outcome) = attempts.join_next().await {
        match outcome.unwrap() {
            Ok(_) => won += 1,
            Err(err) => assert!(matches!(err, ApplicationError::Conflict(_)), "{err}"),
        }
    }

    assert_eq!(won, 1);
    assert_eq!(engine.attendance.count().await, 1);
}

#[rstest]
#[tokio::test]
async fn it_should_let_exactly_one_concurrent_reviewer_win(#[future] before_each: TestEngine) {
    let engine = before_each.await;
    engine.regularizations.set_delay_write_ms(10);
    let request = engine
        .submit_regularization
        .handle(SubmitRegularization {
            employee_id: EMPLOYEE.into(),
            business_day: day(2024, 3, 5),
            requested_check_in: Some(ist(2024, 3, 5, 9, 30)),
            requested_check_out: Some(ist(2024, 3, 5, 18, 30)),
            reason: "Forgot to punch".into(),
        })
        .await
        .unwrap();

    let (approve, reject) = join!(
        engine.review_regularization.handle(ReviewRegularization {
            request_id: request.id,
            decision: ReviewDecision::Approved,
            reviewer_id: "hr-01".into(),
            comment: None,
        }),
        engine.review_regularization.handle(ReviewRegularization {
            request_id: request.id,
            decision: ReviewDecision::Rejected,
            reviewer_id: "hr-02".into(),
            comment: Some("Duplicate".into()),
        }),
    );

    let stored = engine
        .regularizations
        .get(request.id)
        .await
        .unwrap()
        .unwrap()
        .status;
    match (approve, reject) {
        (Ok(_), Err(ApplicationError::InvalidState(_))) => {
            assert_eq!(stored, ReviewStatus::Approved);
            assert_eq!(engine.attendance.count().await, 1);
        }
        (Err(ApplicationError::InvalidState(_)), Ok(_)) => {
            assert_eq!(stored, ReviewStatus::Rejected);
            assert_eq!(engine.attendance.count().await, 0);
        }
        other => panic!("expected exactly one winner, got {other:?}"),
    }
}
