use std::str::FromStr;

use serde::{Deserialize, Serialize};
use url::Url;

use crate::types::Role;

use super::{common::QueryCommon, Query};

/// Filters for `GET /members`.
#[derive(Serialize, Deserialize, Default, Clone, Debug)]
pub struct MemberQuery {
    #[serde(flatten)]
    pub common: QueryCommon,
    /// Substring match against username and email.
    #[serde(default)]
    pub search: Option<String>,
    #[serde(default)]
    pub role: Option<Role>,
    #[serde(default)]
    pub sort_by: MemberSortBy,
}

impl Query for MemberQuery {
    fn get_common(&mut self) -> &mut QueryCommon {
        &mut self.common
    }
    fn add_to_url(&self, url: &Url) -> Url {
        let mut url = self.common.add_to_url(url);
        if let Some(search) = &self.search {
            url.query_pairs_mut().append_pair("search", search.as_str());
        };
        if let Some(role) = &self.role {
            url.query_pairs_mut()
                .append_pair("role", role.to_string().as_str());
        };
        url.query_pairs_mut()
            .append_pair("sort_by", self.sort_by.to_string().as_str());
        url
    }
}

impl MemberQuery {
    pub fn with_search(mut self, search: &str) -> Self {
        self.search = Some(search.to_string());
        self
    }

    pub fn with_role(mut self, role: Role) -> Self {
        self.role = Some(role);
        self
    }

    pub fn with_sort_by(mut self, sort_by: MemberSortBy) -> Self {
        self.sort_by = sort_by;
        self
    }
}

#[derive(Serialize, Deserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum MemberSortBy {
    #[default]
    CreatedAt,
    Username,
}
impl std::fmt::Display for MemberSortBy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}",
            match self {
                MemberSortBy::CreatedAt => "created_at",
                MemberSortBy::Username => "username",
            }
        )
    }
}
impl FromStr for MemberSortBy {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "created_at" => Ok(MemberSortBy::CreatedAt),
            "username" => Ok(MemberSortBy::Username),
            _ => Err(()),
        }
    }
}
