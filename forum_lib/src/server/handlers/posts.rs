use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use forum_api::types::{Page, Post, PostCreate, PostID, PostSummary, PostTagsUpdate, PostUpdate};
use forum_api::PostQuery;

use crate::server::error::HttpError;
use crate::server::extract::{Authenticated, ValidJson, ValidPath, ValidQuery};
use crate::server::state::AppState;

pub async fn list(
    State(state): State<AppState>,
    ValidQuery(query): ValidQuery<PostQuery>,
) -> Result<Json<Page<PostSummary>>, HttpError> {
    Ok(Json(state.list_posts(&query)?))
}

pub async fn get(
    State(state): State<AppState>,
    ValidPath(id): ValidPath<PostID>,
) -> Result<Json<Post>, HttpError> {
    Ok(Json(state.get_post(id)?))
}

pub async fn create(
    State(state): State<AppState>,
    auth: Authenticated,
    ValidJson(body): ValidJson<PostCreate>,
) -> Result<(StatusCode, Json<Post>), HttpError> {
    let post = state.create_post(&auth.member, &body)?;
    Ok((StatusCode::CREATED, Json(post)))
}

pub async fn update(
    State(state): State<AppState>,
    auth: Authenticated,
    ValidPath(id): ValidPath<PostID>,
    ValidJson(body): ValidJson<PostUpdate>,
) -> Result<Json<Post>, HttpError> {
    Ok(Json(state.update_post(&auth.member, id, &body)?))
}

pub async fn set_tags(
    State(state): State<AppState>,
    auth: Authenticated,
    ValidPath(id): ValidPath<PostID>,
    ValidJson(body): ValidJson<PostTagsUpdate>,
) -> Result<Json<Post>, HttpError> {
    Ok(Json(state.set_post_tags(&auth.member, id, &body)?))
}

pub async fn erase(
    State(state): State<AppState>,
    auth: Authenticated,
    ValidPath(id): ValidPath<PostID>,
) -> Result<Json<Post>, HttpError> {
    Ok(Json(state.erase_post(&auth.member, id)?))
}
