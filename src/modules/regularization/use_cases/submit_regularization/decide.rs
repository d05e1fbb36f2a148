use crate::modules::regularization::core::request::RegularizationDraft;
use crate::modules::regularization::use_cases::submit_regularization::command::SubmitRegularization;
use crate::modules::regularization::use_cases::submit_regularization::decision::DecideError;
use crate::shared::core::business_time::BusinessClock;

/// Validates a submission. Both times are optional here; approval demands at least one.
pub fn decide_submit(
    command: SubmitRegularization,
    clock: &BusinessClock,
) -> Result<RegularizationDraft, DecideError> {
    let reason = command.reason.trim();
    if reason.is_empty() {
        return Err(DecideError::MissingReason);
    }

    let day = command.business_day;
    for (field, instant) in [
        ("check-in", command.requested_check_in),
        ("check-out", command.requested_check_out),
    ] {
        if instant.is_some_and(|i| !clock.falls_on(i, day)) {
            return Err(DecideError::OutsideDay { field, day });
        }
    }

    if let (Some(check_in), Some(check_out)) = (command.requested_check_in, command.requested_check_out) {
        if check_in >= check_out {
            return Err(DecideError::InvalidInterval);
        }
    }

    Ok(RegularizationDraft {
        employee_id: command.employee_id,
        business_day: day,
        requested_check_in: command.requested_check_in,
        requested_check_out: command.requested_check_out,
        reason: reason.to_string(),
    })
}
