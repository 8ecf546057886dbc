use forum_api::types::{
    Member, MemberID, MemberRoleUpdate, MemberSummary, MemberUpdate, Page, Role,
};
use forum_api::MemberQuery;

use super::{require_role, require_self_or_admin, Forum};
use crate::db::{now, DbMemberFilter};
use crate::error::ForumError;
use crate::pagination::PageWindow;
use crate::validation::{
    validate_bio, validate_display_name, validate_search, validate_username,
};

impl Forum {
    pub fn list_members(&self, query: &MemberQuery) -> Result<Page<MemberSummary>, ForumError> {
        let window = PageWindow::resolve(&query.common)?;
        let filter = DbMemberFilter {
            search: query.search.as_deref().map(validate_search).transpose()?,
            role: query.role,
            sort_by: query.sort_by,
        };
        let (records, members) = self.db().query_members(&filter, &window)?;
        Ok(window.into_page(records, members.into_iter().map(Into::into).collect()))
    }

    pub fn get_member(&self, id: MemberID) -> Result<Member, ForumError> {
        self.db()
            .get_member(id)?
            .ok_or_else(|| ForumError::not_found("member", id))
    }

    pub fn update_member(
        &self,
        actor: &Member,
        id: MemberID,
        body: &MemberUpdate,
    ) -> Result<Member, ForumError> {
        require_self_or_admin(actor, id)?;
        let display_name = body
            .display_name
            .as_deref()
            .map(validate_display_name)
            .transpose()?;
        let bio = body.bio.as_deref().map(validate_bio).transpose()?;

        let db = self.db();
        let mut member = db
            .get_member(id)?
            .ok_or_else(|| ForumError::not_found("member", id))?;
        if display_name.is_some() {
            member.display_name = display_name;
        }
        if bio.is_some() {
            member.bio = bio;
        }
        member.updated_at = now();
        db.update_member(&member)?;
        Ok(member)
    }

    /// Soft-deletes the account and revokes all of its sessions.
    pub fn erase_member(&self, actor: &Member, id: MemberID) -> Result<Member, ForumError> {
        require_self_or_admin(actor, id)?;
        let member = {
            let db = self.db();
            let member = db
                .get_member(id)?
                .ok_or_else(|| ForumError::not_found("member", id))?;
            let at = now();
            db.erase_member(id, at)?;
            Member {
                updated_at: at,
                deleted_at: Some(at),
                ..member
            }
        };
        self.sessions.revoke_member(id);
        tracing::info!("Member {} erased", member.username);
        Ok(member)
    }

    pub fn set_member_role(
        &self,
        actor: &Member,
        id: MemberID,
        body: &MemberRoleUpdate,
    ) -> Result<Member, ForumError> {
        require_role(actor, Role::Administrator)?;
        if actor.id == id && body.role < Role::Administrator {
            return Err(ForumError::Forbidden(
                "administrators cannot demote themselves".to_string(),
            ));
        }
        self.change_role(id, body.role)
    }

    /// Grants `role` to the member with `username`, bypassing session checks.
    /// Used by the operator command line.
    pub fn promote(&self, username: &str, role: Role) -> Result<Member, ForumError> {
        let username = validate_username(username)?;
        let member = self
            .db()
            .find_member_by_username(&username)?
            .ok_or_else(|| ForumError::not_found("member", &username))?;
        self.change_role(member.id, role)
    }

    fn change_role(&self, id: MemberID, role: Role) -> Result<Member, ForumError> {
        let db = self.db();
        let mut member = db
            .get_member(id)?
            .ok_or_else(|| ForumError::not_found("member", id))?;
        member.role = role;
        member.updated_at = now();
        db.update_member(&member)?;
        tracing::info!("Member {} is now {}", member.username, role);
        Ok(member)
    }
}
