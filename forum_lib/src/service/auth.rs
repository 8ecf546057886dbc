use forum_api::types::{Authorized, Member, MemberJoin, MemberLogin, Role};
use uuid::Uuid;

use super::Forum;
use crate::db::now;
use crate::error::ForumError;
use crate::session::{hash_password, verify_password};
use crate::validation::{
    validate_display_name, validate_email, validate_password, validate_username,
};

impl Forum {
    /// Registers a member and signs them in. The first member of a board
    /// becomes its administrator.
    pub fn join(&self, body: &MemberJoin) -> Result<Authorized, ForumError> {
        let email = validate_email(&body.email)?;
        let username = validate_username(&body.username)?;
        validate_password(&body.password)?;
        let display_name = body
            .display_name
            .as_deref()
            .map(validate_display_name)
            .transpose()?;

        let password_hash = hash_password(&body.password, self.bcrypt_cost)?;

        let member = {
            let db = self.db();
            if let Some(field) = db.member_identity_taken(&email, &username)? {
                return Err(ForumError::Conflict(format!("{} is already registered", field)));
            }
            let role = if db.count_members()? == 0 {
                Role::Administrator
            } else {
                Role::Member
            };
            let at = now();
            let member = Member {
                id: Uuid::new_v4(),
                email,
                username,
                display_name,
                bio: None,
                role,
                suspended: false,
                created_at: at,
                updated_at: at,
                deleted_at: None,
            };
            db.insert_member(&member, &password_hash)?;
            member
        };

        tracing::info!("Member {} joined as {}", member.username, member.role);
        self.authorize(member)
    }

    pub fn login(&self, body: &MemberLogin) -> Result<Authorized, ForumError> {
        let email = body.email.trim().to_lowercase();
        let credentials = self.db().member_credentials(&email)?;
        let Some((member, password_hash)) = credentials else {
            tracing::warn!("Rejected login for unknown email");
            return Err(invalid_credentials());
        };
        if !verify_password(&body.password, &password_hash)? {
            tracing::warn!("Rejected login for {}", member.username);
            return Err(invalid_credentials());
        }
        self.authorize(member)
    }

    /// Revokes one session token.
    pub fn logout(&self, token: &str) -> Result<(), ForumError> {
        if !self.sessions.revoke(token) {
            return Err(ForumError::Unauthorized("invalid or expired session".to_string()));
        }
        Ok(())
    }

    fn authorize(&self, member: Member) -> Result<Authorized, ForumError> {
        let (token, session) = self.sessions.issue(member.id)?;
        Ok(Authorized {
            member,
            token,
            expires_at: session.expires_at,
        })
    }
}

fn invalid_credentials() -> ForumError {
    ForumError::Unauthorized("invalid email or password".to_string())
}
