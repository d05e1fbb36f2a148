use crate::modules::wfh::core::request::WfhDraft;
use crate::modules::wfh::use_cases::submit_wfh::command::SubmitWfh;
use crate::modules::wfh::use_cases::submit_wfh::decision::{DecideError, MIN_REASON_CHARS};
use crate::shared::core::business_time::BusinessClock;

/// The request is for the business day of submission.
pub fn decide_submit(command: SubmitWfh, clock: &BusinessClock) -> Result<WfhDraft, DecideError> {
    let reason = command.reason.trim();
    if reason.chars().count() < MIN_REASON_CHARS {
        return Err(DecideError::ReasonTooShort {
            min: MIN_REASON_CHARS,
        });
    }
    if command.location.is_some_and(|l| !l.is_valid()) {
        return Err(DecideError::InvalidLocation);
    }

    let request_date = clock.day_key(command.submitted_at);
    let requested_check_in_time = command
        .requested_check_in_time
        .unwrap_or(command.submitted_at);
    if !clock.falls_on(requested_check_in_time, request_date) {
        return Err(DecideError::OutsideDay(request_date));
    }

    Ok(WfhDraft {
        employee_id: command.employee_id,
        request_date,
        requested_check_in_time,
        reason: reason.to_string(),
        attempted_location: command.location,
    })
}
