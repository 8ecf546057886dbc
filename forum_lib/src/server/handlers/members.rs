use axum::extract::State;
use axum::Json;
use forum_api::types::{Member, MemberID, MemberRoleUpdate, MemberSummary, MemberUpdate, Page};
use forum_api::MemberQuery;

use crate::server::error::HttpError;
use crate::server::extract::{Authenticated, ValidJson, ValidPath, ValidQuery};
use crate::server::state::AppState;

pub async fn list(
    State(state): State<AppState>,
    ValidQuery(query): ValidQuery<MemberQuery>,
) -> Result<Json<Page<MemberSummary>>, HttpError> {
    Ok(Json(state.list_members(&query)?))
}

pub async fn get(
    State(state): State<AppState>,
    ValidPath(id): ValidPath<MemberID>,
) -> Result<Json<Member>, HttpError> {
    Ok(Json(state.get_member(id)?))
}

pub async fn update(
    State(state): State<AppState>,
    auth: Authenticated,
    ValidPath(id): ValidPath<MemberID>,
    ValidJson(body): ValidJson<MemberUpdate>,
) -> Result<Json<Member>, HttpError> {
    Ok(Json(state.update_member(&auth.member, id, &body)?))
}

pub async fn set_role(
    State(state): State<AppState>,
    auth: Authenticated,
    ValidPath(id): ValidPath<MemberID>,
    ValidJson(body): ValidJson<MemberRoleUpdate>,
) -> Result<Json<Member>, HttpError> {
    Ok(Json(state.set_member_role(&auth.member, id, &body)?))
}

pub async fn erase(
    State(state): State<AppState>,
    auth: Authenticated,
    ValidPath(id): ValidPath<MemberID>,
) -> Result<Json<Member>, HttpError> {
    Ok(Json(state.erase_member(&auth.member, id)?))
}
