use std::str::FromStr;

use serde::{Deserialize, Serialize};
use url::Url;

use crate::types::MemberID;

use super::{common::QueryCommon, Query};

/// Filters for `GET /posts/{post_id}/comments`.
#[derive(Serialize, Deserialize, Default, Clone, Debug)]
pub struct CommentQuery {
    #[serde(flatten)]
    pub common: QueryCommon,
    #[serde(default)]
    pub author_id: Option<String>,
    #[serde(default)]
    pub search: Option<String>,
    #[serde(default)]
    pub sort_by: CommentSortBy,
}

impl Query for CommentQuery {
    fn get_common(&mut self) -> &mut QueryCommon {
        &mut self.common
    }
    fn add_to_url(&self, url: &Url) -> Url {
        let mut url = self.common.add_to_url(url);
        if let Some(author_id) = &self.author_id {
            url.query_pairs_mut()
                .append_pair("author_id", author_id.as_str());
        };
        if let Some(search) = &self.search {
            url.query_pairs_mut().append_pair("search", search.as_str());
        };
        url.query_pairs_mut()
            .append_pair("sort_by", self.sort_by.to_string().as_str());
        url
    }
}

impl CommentQuery {
    pub fn with_author_id(mut self, author_id: MemberID) -> Self {
        self.author_id = Some(author_id.to_string());
        self
    }

    pub fn with_search(mut self, search: &str) -> Self {
        self.search = Some(search.to_string());
        self
    }

    pub fn with_sort_by(mut self, sort_by: CommentSortBy) -> Self {
        self.sort_by = sort_by;
        self
    }
}

#[derive(Serialize, Deserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum CommentSortBy {
    #[default]
    CreatedAt,
    UpdatedAt,
}
impl std::fmt::Display for CommentSortBy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}",
            match self {
                CommentSortBy::CreatedAt => "created_at",
                CommentSortBy::UpdatedAt => "updated_at",
            }
        )
    }
}
impl FromStr for CommentSortBy {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "created_at" => Ok(CommentSortBy::CreatedAt),
            "updated_at" => Ok(CommentSortBy::UpdatedAt),
            _ => Err(()),
        }
    }
}
