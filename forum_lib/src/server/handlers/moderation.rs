use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use forum_api::types::{ModerationAction, ModerationActionCreate, ModerationActionID, Page};
use forum_api::ModerationActionQuery;

use crate::server::error::HttpError;
use crate::server::extract::{Authenticated, ValidJson, ValidPath, ValidQuery};
use crate::server::state::AppState;

pub async fn create(
    State(state): State<AppState>,
    auth: Authenticated,
    ValidJson(body): ValidJson<ModerationActionCreate>,
) -> Result<(StatusCode, Json<ModerationAction>), HttpError> {
    let action = state.create_moderation_action(&auth.member, &body)?;
    Ok((StatusCode::CREATED, Json(action)))
}

pub async fn list(
    State(state): State<AppState>,
    auth: Authenticated,
    ValidQuery(query): ValidQuery<ModerationActionQuery>,
) -> Result<Json<Page<ModerationAction>>, HttpError> {
    Ok(Json(state.list_moderation_actions(&auth.member, &query)?))
}

pub async fn get(
    State(state): State<AppState>,
    auth: Authenticated,
    ValidPath(id): ValidPath<ModerationActionID>,
) -> Result<Json<ModerationAction>, HttpError> {
    Ok(Json(state.get_moderation_action(&auth.member, id)?))
}
