use axum::{
    Json,
    extract::{Path, Query, State, rejection::{JsonRejection, QueryRejection}},
    response::{IntoResponse, Response},
};
use serde::Deserialize;

use crate::modules::attendance::core::settings::{EffectiveSettings, SettingsOverride};
use crate::shared::core::errors::ApplicationError;
use crate::shell::http::{query_or_invalid, unprocessable};
use crate::shell::state::AppState;

#[derive(Deserialize)]
pub struct EffectiveQuery {
    pub department: Option<String>,
}

pub async fn effective(
    State(state): State<AppState>,
    query: Result<Query<EffectiveQuery>, QueryRejection>,
) -> Result<Json<EffectiveSettings>, ApplicationError> {
    let query = query_or_invalid(query)?;
    let settings = state
        .settings
        .effective_settings(query.department.as_deref())
        .await?;
    Ok(Json(EffectiveSettings::clone(&settings)))
}

pub async fn update_global(
    State(state): State<AppState>,
    body: Result<Json<SettingsOverride>, JsonRejection>,
) -> Response {
    let Ok(Json(overrides)) = body else {
        return unprocessable();
    };
    state
        .settings
        .update_global(overrides)
        .await
        .map(Json)
        .into_response()
}

pub async fn update_department(
    State(state): State<AppState>,
    Path(department): Path<String>,
    body: Result<Json<SettingsOverride>, JsonRejection>,
) -> Response {
    let Ok(Json(overrides)) = body else {
        return unprocessable();
    };
    state
        .settings
        .update_department(&department, overrides)
        .await
        .map(Json)
        .into_response()
}
