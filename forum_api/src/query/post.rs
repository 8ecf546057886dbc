use std::str::FromStr;

use serde::{Deserialize, Serialize};
use url::Url;

use crate::types::{CategoryID, MemberID};

use super::{common::QueryCommon, Query};

/// Filters for `GET /posts`.
///
/// Identifier filters travel as strings so the server can reject malformed
/// UUIDs with a validation error instead of a generic parse failure.
#[derive(Serialize, Deserialize, Default, Clone, Debug)]
pub struct PostQuery {
    #[serde(flatten)]
    pub common: QueryCommon,
    #[serde(default)]
    pub category_id: Option<String>,
    #[serde(default)]
    pub author_id: Option<String>,
    /// Substring match against title and body.
    #[serde(default)]
    pub search: Option<String>,
    #[serde(default)]
    pub tag: Option<String>,
    #[serde(default)]
    pub sort_by: PostSortBy,
}

impl Query for PostQuery {
    fn get_common(&mut self) -> &mut QueryCommon {
        &mut self.common
    }
    fn add_to_url(&self, url: &Url) -> Url {
        let mut url = self.common.add_to_url(url);
        if let Some(category_id) = &self.category_id {
            url.query_pairs_mut()
                .append_pair("category_id", category_id.as_str());
        };
        if let Some(author_id) = &self.author_id {
            url.query_pairs_mut()
                .append_pair("author_id", author_id.as_str());
        };
        if let Some(search) = &self.search {
            url.query_pairs_mut().append_pair("search", search.as_str());
        };
        if let Some(tag) = &self.tag {
            url.query_pairs_mut().append_pair("tag", tag.as_str());
        };
        url.query_pairs_mut()
            .append_pair("sort_by", self.sort_by.to_string().as_str());
        url
    }
}

impl PostQuery {
    pub fn with_category_id(mut self, category_id: CategoryID) -> Self {
        self.category_id = Some(category_id.to_string());
        self
    }

    pub fn with_author_id(mut self, author_id: MemberID) -> Self {
        self.author_id = Some(author_id.to_string());
        self
    }

    pub fn with_search(mut self, search: &str) -> Self {
        self.search = Some(search.to_string());
        self
    }

    pub fn with_tag(mut self, tag: &str) -> Self {
        self.tag = Some(tag.to_string());
        self
    }

    pub fn with_sort_by(mut self, sort_by: PostSortBy) -> Self {
        self.sort_by = sort_by;
        self
    }
}

#[derive(Serialize, Deserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum PostSortBy {
    #[default]
    CreatedAt,
    UpdatedAt,
    Title,
}
impl std::fmt::Display for PostSortBy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}",
            match self {
                PostSortBy::CreatedAt => "created_at",
                PostSortBy::UpdatedAt => "updated_at",
                PostSortBy::Title => "title",
            }
        )?;
        Ok(())
    }
}
impl FromStr for PostSortBy {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "created_at" => Ok(PostSortBy::CreatedAt),
            "updated_at" => Ok(PostSortBy::UpdatedAt),
            "title" => Ok(PostSortBy::Title),
            _ => Err(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use url::Url;
    use uuid::Uuid;

    use crate::query::{common::SortDirection, post::PostSortBy, PostQuery, Query};

    #[test]
    fn test_post_query() {
        let url = Url::parse("https://example.com").unwrap();

        insta::assert_snapshot!(
            PostQuery::default().add_to_url(&url).to_string(),
            @"https://example.com/?page=1&sort_direction=desc&sort_by=created_at"
        );

        let category = Uuid::nil();
        insta::assert_snapshot!(
            PostQuery::default()
                .with_category_id(category)
                .with_tag("rust")
                .with_page(2)
                .with_limit(10)
                .add_to_url(&url)
                .to_string(),
            @"https://example.com/?page=2&limit=10&sort_direction=desc&category_id=00000000-0000-0000-0000-000000000000&tag=rust&sort_by=created_at"
        );

        insta::assert_snapshot!(
            PostQuery::default()
                .with_search("hello world")
                .with_sort_by(PostSortBy::Title)
                .with_sort_direction(SortDirection::Asc)
                .add_to_url(&url)
                .to_string(),
            @"https://example.com/?page=1&sort_direction=asc&search=hello+world&sort_by=title"
        );
    }
}
