use std::str::FromStr;

use serde::{Deserialize, Serialize};
use url::Url;

use super::{common::QueryCommon, Query};

/// Filters for `GET /categories`.
#[derive(Serialize, Deserialize, Default, Clone, Debug)]
pub struct CategoryQuery {
    #[serde(flatten)]
    pub common: QueryCommon,
    #[serde(default)]
    pub search: Option<String>,
    #[serde(default)]
    pub sort_by: CategorySortBy,
}

impl Query for CategoryQuery {
    fn get_common(&mut self) -> &mut QueryCommon {
        &mut self.common
    }
    fn add_to_url(&self, url: &Url) -> Url {
        let mut url = self.common.add_to_url(url);
        if let Some(search) = &self.search {
            url.query_pairs_mut().append_pair("search", search.as_str());
        };
        url.query_pairs_mut()
            .append_pair("sort_by", self.sort_by.to_string().as_str());
        url
    }
}

impl CategoryQuery {
    pub fn with_search(mut self, search: &str) -> Self {
        self.search = Some(search.to_string());
        self
    }

    pub fn with_sort_by(mut self, sort_by: CategorySortBy) -> Self {
        self.sort_by = sort_by;
        self
    }
}

#[derive(Serialize, Deserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum CategorySortBy {
    #[default]
    Name,
    CreatedAt,
}
impl std::fmt::Display for CategorySortBy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}",
            match self {
                CategorySortBy::Name => "name",
                CategorySortBy::CreatedAt => "created_at",
            }
        )
    }
}
impl FromStr for CategorySortBy {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "name" => Ok(CategorySortBy::Name),
            "created_at" => Ok(CategorySortBy::CreatedAt),
            _ => Err(()),
        }
    }
}
