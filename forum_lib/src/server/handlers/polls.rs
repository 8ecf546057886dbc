use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use forum_api::types::{Poll, PollCreate, PollID, PollVote, PollVoteCreate, PostID};

use crate::server::error::HttpError;
use crate::server::extract::{Authenticated, ValidJson, ValidPath};
use crate::server::state::AppState;

pub async fn create(
    State(state): State<AppState>,
    auth: Authenticated,
    ValidPath(post_id): ValidPath<PostID>,
    ValidJson(body): ValidJson<PollCreate>,
) -> Result<(StatusCode, Json<Poll>), HttpError> {
    let poll = state.create_poll(&auth.member, post_id, &body)?;
    Ok((StatusCode::CREATED, Json(poll)))
}

pub async fn get(
    State(state): State<AppState>,
    ValidPath(post_id): ValidPath<PostID>,
) -> Result<Json<Poll>, HttpError> {
    Ok(Json(state.get_poll(post_id)?))
}

pub async fn erase(
    State(state): State<AppState>,
    auth: Authenticated,
    ValidPath(post_id): ValidPath<PostID>,
) -> Result<Json<Poll>, HttpError> {
    Ok(Json(state.erase_poll(&auth.member, post_id)?))
}

pub async fn vote(
    State(state): State<AppState>,
    auth: Authenticated,
    ValidPath(poll_id): ValidPath<PollID>,
    ValidJson(body): ValidJson<PollVoteCreate>,
) -> Result<(StatusCode, Json<PollVote>), HttpError> {
    let vote = state.vote(&auth.member, poll_id, &body)?;
    Ok((StatusCode::CREATED, Json(vote)))
}
