use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use forum_api::types::{Authorized, Member, MemberJoin, MemberLogin};

use super::blocking;
use crate::server::error::HttpError;
use crate::server::extract::{Authenticated, ValidJson};
use crate::server::state::AppState;

pub async fn join(
    State(state): State<AppState>,
    ValidJson(body): ValidJson<MemberJoin>,
) -> Result<(StatusCode, Json<Authorized>), HttpError> {
    let authorized = blocking(move || state.join(&body)).await?;
    Ok((StatusCode::CREATED, Json(authorized)))
}

pub async fn login(
    State(state): State<AppState>,
    ValidJson(body): ValidJson<MemberLogin>,
) -> Result<Json<Authorized>, HttpError> {
    let authorized = blocking(move || state.login(&body)).await?;
    Ok(Json(authorized))
}

pub async fn logout(
    State(state): State<AppState>,
    auth: Authenticated,
) -> Result<StatusCode, HttpError> {
    state.logout(&auth.token)?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn me(auth: Authenticated) -> Json<Member> {
    Json(auth.member)
}
