use axum::{
    Json,
    extract::{Query, State, rejection::QueryRejection},
};
use serde::Deserialize;

use crate::modules::regularization::core::request::RegularizationRequest;
use crate::shared::core::errors::ApplicationError;
use crate::shared::core::review::ReviewStatus;
use crate::shell::http::query_or_invalid;
use crate::shell::state::AppState;

#[derive(Deserialize)]
pub struct ListQuery {
    /// Every employee's requests when absent.
    pub employee_id: Option<String>,
    pub status: Option<ReviewStatus>,
}

pub async fn handle(
    State(state): State<AppState>,
    query: Result<Query<ListQuery>, QueryRejection>,
) -> Result<Json<Vec<RegularizationRequest>>, ApplicationError> {
    let query = query_or_invalid(query)?;
    let requests = match query.employee_id.as_deref() {
        Some(employee_id) => {
            state
                .list_regularizations
                .by_employee(employee_id, query.status)
                .await?
        }
        None => state.list_regularizations.all(query.status).await?,
    };
    Ok(Json(requests))
}
