use axum::{
    Json,
    extract::{Query, State, rejection::QueryRejection},
};
use serde::Deserialize;

use crate::modules::wfh::core::request::WfhRequest;
use crate::shared::core::errors::ApplicationError;
use crate::shared::core::review::ReviewStatus;
use crate::shell::http::query_or_invalid;
use crate::shell::state::AppState;

#[derive(Deserialize)]
pub struct ListWfhQuery {
    pub employee_id: Option<String>,
    pub status: Option<ReviewStatus>,
}

pub async fn handle(
    State(state): State<AppState>,
    query: Result<Query<ListWfhQuery>, QueryRejection>,
) -> Result<Json<Vec<WfhRequest>>, ApplicationError> {
    let query = query_or_invalid(query)?;
    let requests = match query.employee_id {
        Some(employee_id) => state.list_wfh.by_employee(&employee_id, query.status).await?,
        None => state.list_wfh.all(query.status).await?,
    };
    Ok(Json(requests))
}
