//! Join/login payloads and the authorized session returned by both.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::Member;

/// Registration payload.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct MemberJoin {
    pub email: String,
    pub username: String,
    pub password: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
}

/// Credentials for an existing account.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct MemberLogin {
    pub email: String,
    pub password: String,
}

/// A member together with a bearer token for subsequent requests.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct Authorized {
    pub member: Member,
    pub token: String,
    pub expires_at: DateTime<Utc>,
}
