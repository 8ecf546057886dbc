use serde::{Deserialize, Serialize};
use url::Url;

use crate::types::{MemberID, ModerationActionType};

use super::{common::QueryCommon, Query};

/// Filters for `GET /moderation/actions`. Results are ordered by creation time.
#[derive(Serialize, Deserialize, Default, Clone, Debug)]
pub struct ModerationActionQuery {
    #[serde(flatten)]
    pub common: QueryCommon,
    #[serde(default)]
    pub action_type: Option<ModerationActionType>,
    #[serde(default)]
    pub moderator_id: Option<String>,
    #[serde(default)]
    pub member_id: Option<String>,
}

impl Query for ModerationActionQuery {
    fn get_common(&mut self) -> &mut QueryCommon {
        &mut self.common
    }
    fn add_to_url(&self, url: &Url) -> Url {
        let mut url = self.common.add_to_url(url);
        if let Some(action_type) = &self.action_type {
            url.query_pairs_mut()
                .append_pair("action_type", action_type.to_string().as_str());
        };
        if let Some(moderator_id) = &self.moderator_id {
            url.query_pairs_mut()
                .append_pair("moderator_id", moderator_id.as_str());
        };
        if let Some(member_id) = &self.member_id {
            url.query_pairs_mut()
                .append_pair("member_id", member_id.as_str());
        };
        url
    }
}

impl ModerationActionQuery {
    pub fn with_action_type(mut self, action_type: ModerationActionType) -> Self {
        self.action_type = Some(action_type);
        self
    }

    pub fn with_moderator_id(mut self, moderator_id: MemberID) -> Self {
        self.moderator_id = Some(moderator_id.to_string());
        self
    }

    pub fn with_member_id(mut self, member_id: MemberID) -> Self {
        self.member_id = Some(member_id.to_string());
        self
    }
}
