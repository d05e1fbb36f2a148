use axum::{
    Json,
    extract::{Query, State, rejection::QueryRejection},
};
use chrono::NaiveDate;
use serde::Deserialize;

use crate::modules::attendance::core::record::AttendanceRecord;
use crate::modules::attendance::use_cases::list_attendance::handler::DayPlan;
use crate::shared::core::errors::ApplicationError;
use crate::shell::http::query_or_invalid;
use crate::shell::state::AppState;

#[derive(Deserialize)]
pub struct EmployeeRangeQuery {
    pub employee_id: String,
    pub from: String,
    pub to: String,
}

#[derive(Deserialize)]
pub struct RangeQuery {
    pub from: String,
    pub to: String,
}

#[derive(Deserialize)]
pub struct DayQuery {
    /// Defaults to the current business day.
    pub day: Option<String>,
}

#[derive(Deserialize)]
pub struct DayPlanQuery {
    pub employee_id: String,
    pub day: Option<String>,
}

fn day_or_today(state: &AppState, raw: Option<&str>) -> Result<NaiveDate, ApplicationError> {
    match raw {
        Some(raw) => Ok(state.clock.parse_day(raw)?),
        None => Ok(state.clock.today()),
    }
}

pub async fn by_employee(
    State(state): State<AppState>,
    query: Result<Query<EmployeeRangeQuery>, QueryRejection>,
) -> Result<Json<Vec<AttendanceRecord>>, ApplicationError> {
    let query = query_or_invalid(query)?;
    let from = state.clock.parse_day(&query.from)?;
    let to = state.clock.parse_day(&query.to)?;
    let records = state
        .list_attendance
        .by_employee(&query.employee_id, from, to)
        .await?;
    Ok(Json(records))
}

pub async fn between(
    State(state): State<AppState>,
    query: Result<Query<RangeQuery>, QueryRejection>,
) -> Result<Json<Vec<AttendanceRecord>>, ApplicationError> {
    let query = query_or_invalid(query)?;
    let from = state.clock.parse_day(&query.from)?;
    let to = state.clock.parse_day(&query.to)?;
    Ok(Json(state.list_attendance.between(from, to).await?))
}

pub async fn today(
    State(state): State<AppState>,
) -> Result<Json<Vec<AttendanceRecord>>, ApplicationError> {
    Ok(Json(state.list_attendance.today().await?))
}

pub async fn missing_checkouts(
    State(state): State<AppState>,
    query: Result<Query<DayQuery>, QueryRejection>,
) -> Result<Json<Vec<AttendanceRecord>>, ApplicationError> {
    let query = query_or_invalid(query)?;
    let day = day_or_today(&state, query.day.as_deref())?;
    Ok(Json(state.list_attendance.missing_checkouts(day).await?))
}

pub async fn day_plan(
    State(state): State<AppState>,
    query: Result<Query<DayPlanQuery>, QueryRejection>,
) -> Result<Json<DayPlan>, ApplicationError> {
    let query = query_or_invalid(query)?;
    let day = day_or_today(&state, query.day.as_deref())?;
    Ok(Json(
        state.list_attendance.day_plan(&query.employee_id, day).await?,
    ))
}
