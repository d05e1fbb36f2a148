use crate::modules::attendance::core::record::{
    CheckInPolicy, GeofenceStatus, LocationMeta, ReconciliationPatch,
};
use crate::modules::wfh::core::request::WfhRequest;
use crate::modules::wfh::use_cases::review_wfh::decision::{DecideError, Decision};
use crate::shared::core::review::ReviewDecision;

pub const WFH_REASON: &str = "wfh";

/// An approval marks the day as a geofence exception. An existing check-in and check-out are
/// kept; the requested check-in only seeds a day without one.
pub fn decide_review(request: &WfhRequest, decision: ReviewDecision) -> Result<Decision, DecideError> {
    if !request.is_pending() {
        return Err(DecideError::NotPending(request.status));
    }
    if decision == ReviewDecision::Rejected {
        return Ok(Decision::Reject);
    }

    Ok(Decision::Approve {
        patch: ReconciliationPatch {
            check_in: Some(request.requested_check_in_time),
            check_in_policy: CheckInPolicy::FillIfMissing,
            check_out: None,
            reason: Some(WFH_REASON.to_string()),
            comments: Some(request.reason.clone()),
            location: Some(LocationMeta {
                geofence_status: GeofenceStatus::Wfh,
                latitude: request.attempted_location.map(|l| l.latitude),
                longitude: request.attempted_location.map(|l| l.longitude),
                office: request.nearest_office.clone(),
                distance_from_office_m: request.distance_from_office_m,
            }),
        },
    })
}
