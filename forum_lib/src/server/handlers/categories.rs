use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use forum_api::types::{Category, CategoryCreate, CategoryID, CategorySummary, CategoryUpdate, Page};
use forum_api::CategoryQuery;

use crate::server::error::HttpError;
use crate::server::extract::{Authenticated, ValidJson, ValidPath, ValidQuery};
use crate::server::state::AppState;

pub async fn list(
    State(state): State<AppState>,
    ValidQuery(query): ValidQuery<CategoryQuery>,
) -> Result<Json<Page<CategorySummary>>, HttpError> {
    Ok(Json(state.list_categories(&query)?))
}

pub async fn get(
    State(state): State<AppState>,
    ValidPath(id): ValidPath<CategoryID>,
) -> Result<Json<Category>, HttpError> {
    Ok(Json(state.get_category(id)?))
}

pub async fn create(
    State(state): State<AppState>,
    auth: Authenticated,
    ValidJson(body): ValidJson<CategoryCreate>,
) -> Result<(StatusCode, Json<Category>), HttpError> {
    let category = state.create_category(&auth.member, &body)?;
    Ok((StatusCode::CREATED, Json(category)))
}

pub async fn update(
    State(state): State<AppState>,
    auth: Authenticated,
    ValidPath(id): ValidPath<CategoryID>,
    ValidJson(body): ValidJson<CategoryUpdate>,
) -> Result<Json<Category>, HttpError> {
    Ok(Json(state.update_category(&auth.member, id, &body)?))
}

pub async fn erase(
    State(state): State<AppState>,
    auth: Authenticated,
    ValidPath(id): ValidPath<CategoryID>,
) -> Result<Json<Category>, HttpError> {
    Ok(Json(state.erase_category(&auth.member, id)?))
}
