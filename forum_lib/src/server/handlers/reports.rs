use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use forum_api::types::{Page, Report, ReportCreate, ReportID, ReportSummary, ReportUpdate};
use forum_api::ReportQuery;

use crate::server::error::HttpError;
use crate::server::extract::{Authenticated, ValidJson, ValidPath, ValidQuery};
use crate::server::state::AppState;

pub async fn create(
    State(state): State<AppState>,
    auth: Authenticated,
    ValidJson(body): ValidJson<ReportCreate>,
) -> Result<(StatusCode, Json<Report>), HttpError> {
    let report = state.create_report(&auth.member, &body)?;
    Ok((StatusCode::CREATED, Json(report)))
}

pub async fn list(
    State(state): State<AppState>,
    auth: Authenticated,
    ValidQuery(query): ValidQuery<ReportQuery>,
) -> Result<Json<Page<ReportSummary>>, HttpError> {
    Ok(Json(state.list_reports(&auth.member, &query)?))
}

pub async fn get(
    State(state): State<AppState>,
    auth: Authenticated,
    ValidPath(id): ValidPath<ReportID>,
) -> Result<Json<Report>, HttpError> {
    Ok(Json(state.get_report(&auth.member, id)?))
}

pub async fn update(
    State(state): State<AppState>,
    auth: Authenticated,
    ValidPath(id): ValidPath<ReportID>,
    ValidJson(body): ValidJson<ReportUpdate>,
) -> Result<Json<Report>, HttpError> {
    Ok(Json(state.update_report(&auth.member, id, &body)?))
}
