use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use forum_api::types::{
    Comment, CommentCreate, CommentID, CommentSummary, CommentUpdate, Page, PostID,
};
use forum_api::CommentQuery;

use crate::server::error::HttpError;
use crate::server::extract::{Authenticated, ValidJson, ValidPath, ValidQuery};
use crate::server::state::AppState;

pub async fn list(
    State(state): State<AppState>,
    ValidPath(post_id): ValidPath<PostID>,
    ValidQuery(query): ValidQuery<CommentQuery>,
) -> Result<Json<Page<CommentSummary>>, HttpError> {
    Ok(Json(state.list_comments(post_id, &query)?))
}

pub async fn get(
    State(state): State<AppState>,
    ValidPath((post_id, id)): ValidPath<(PostID, CommentID)>,
) -> Result<Json<Comment>, HttpError> {
    Ok(Json(state.get_comment(post_id, id)?))
}

pub async fn create(
    State(state): State<AppState>,
    auth: Authenticated,
    ValidPath(post_id): ValidPath<PostID>,
    ValidJson(body): ValidJson<CommentCreate>,
) -> Result<(StatusCode, Json<Comment>), HttpError> {
    let comment = state.create_comment(&auth.member, post_id, &body)?;
    Ok((StatusCode::CREATED, Json(comment)))
}

pub async fn update(
    State(state): State<AppState>,
    auth: Authenticated,
    ValidPath((post_id, id)): ValidPath<(PostID, CommentID)>,
    ValidJson(body): ValidJson<CommentUpdate>,
) -> Result<Json<Comment>, HttpError> {
    Ok(Json(state.update_comment(&auth.member, post_id, id, &body)?))
}

pub async fn erase(
    State(state): State<AppState>,
    auth: Authenticated,
    ValidPath((post_id, id)): ValidPath<(PostID, CommentID)>,
) -> Result<Json<Comment>, HttpError> {
    Ok(Json(state.erase_comment(&auth.member, post_id, id)?))
}
