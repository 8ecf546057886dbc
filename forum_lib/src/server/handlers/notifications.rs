use axum::extract::State;
use axum::Json;
use forum_api::types::{Notification, NotificationID, Page};
use forum_api::NotificationQuery;

use crate::server::error::HttpError;
use crate::server::extract::{Authenticated, ValidPath, ValidQuery};
use crate::server::state::AppState;

pub async fn list(
    State(state): State<AppState>,
    auth: Authenticated,
    ValidQuery(query): ValidQuery<NotificationQuery>,
) -> Result<Json<Page<Notification>>, HttpError> {
    Ok(Json(state.list_notifications(&auth.member, &query)?))
}

pub async fn read(
    State(state): State<AppState>,
    auth: Authenticated,
    ValidPath(id): ValidPath<NotificationID>,
) -> Result<Json<Notification>, HttpError> {
    Ok(Json(state.read_notification(&auth.member, id)?))
}

pub async fn erase(
    State(state): State<AppState>,
    auth: Authenticated,
    ValidPath(id): ValidPath<NotificationID>,
) -> Result<Json<Notification>, HttpError> {
    Ok(Json(state.erase_notification(&auth.member, id)?))
}
