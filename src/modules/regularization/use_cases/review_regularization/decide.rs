use crate::modules::attendance::core::record::ReconciliationPatch;
use crate::modules::regularization::core::request::RegularizationRequest;
use crate::modules::regularization::use_cases::review_regularization::decision::{
    DecideError, Decision,
};
use crate::shared::core::review::ReviewDecision;

pub const REGULARIZED: &str = "regularized";

pub fn decide_review(
    request: &RegularizationRequest,
    decision: ReviewDecision,
) -> Result<Decision, DecideError> {
    if !request.is_pending() {
        return Err(DecideError::NotPending(request.status));
    }
    if decision == ReviewDecision::Rejected {
        return Ok(Decision::Reject);
    }

    match (request.requested_check_in, request.requested_check_out) {
        (None, None) => return Err(DecideError::NothingToApply),
        (Some(check_in), Some(check_out)) if check_in >= check_out => {
            return Err(DecideError::InvalidInterval);
        }
        _ => {}
    }

    Ok(Decision::Approve {
        patch: ReconciliationPatch {
            check_in: request.requested_check_in,
            check_out: request.requested_check_out,
            reason: Some(REGULARIZED.to_string()),
            comments: Some(REGULARIZED.to_string()),
            ..Default::default()
        },
    })
}
