//! Member accounts and roles.

use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier of a member.
pub type MemberID = Uuid;

/// Full member record, returned by single-member endpoints.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Member {
    pub id: MemberID,

    /// Login email, stored lowercase.
    pub email: String,

    /// Public handle, unique across the board.
    pub username: String,

    pub display_name: Option<String>,

    pub bio: Option<String>,

    pub role: Role,

    /// Suspended members can read but cannot create content.
    pub suspended: bool,

    pub created_at: DateTime<Utc>,

    pub updated_at: DateTime<Utc>,

    /// Set when the account has been erased.
    pub deleted_at: Option<DateTime<Utc>>,
}

/// Member representation used by list endpoints.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct MemberSummary {
    pub id: MemberID,
    pub username: String,
    pub display_name: Option<String>,
    pub role: Role,
    pub suspended: bool,
    pub created_at: DateTime<Utc>,
}
impl From<Member> for MemberSummary {
    fn from(val: Member) -> Self {
        MemberSummary {
            id: val.id,
            username: val.username,
            display_name: val.display_name,
            role: val.role,
            suspended: val.suspended,
            created_at: val.created_at,
        }
    }
}

/// Profile changes a member can make to their own account.
#[derive(Serialize, Deserialize, Debug, Clone, Default)]
pub struct MemberUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bio: Option<String>,
}

/// Role assignment, administrator only.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct MemberRoleUpdate {
    pub role: Role,
}

/// Authorization level of a member. Ordered from least to most privileged.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Member,
    Moderator,
    Administrator,
}
impl Role {
    /// Moderators and administrators.
    pub fn is_staff(&self) -> bool {
        *self >= Role::Moderator
    }
}
impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}",
            match self {
                Role::Member => "member",
                Role::Moderator => "moderator",
                Role::Administrator => "administrator",
            }
        )
    }
}
impl FromStr for Role {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "member" => Ok(Role::Member),
            "moderator" => Ok(Role::Moderator),
            "administrator" => Ok(Role::Administrator),
            _ => Err(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn roles_are_ordered_by_privilege() {
        assert!(Role::Member < Role::Moderator);
        assert!(Role::Moderator < Role::Administrator);
        assert!(!Role::Member.is_staff());
        assert!(Role::Moderator.is_staff());
        assert!(Role::Administrator.is_staff());
    }

    #[test]
    fn role_string_forms_agree() {
        for role in [Role::Member, Role::Moderator, Role::Administrator] {
            let json = serde_json::to_value(role).unwrap();
            assert_eq!(json.as_str().unwrap(), role.to_string());
            assert_eq!(role.to_string().parse::<Role>(), Ok(role));
        }
        assert!("root".parse::<Role>().is_err());
    }
}
