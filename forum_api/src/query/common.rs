//! Shared query infrastructure: the [`Query`] trait, [`QueryCommon`] fields, and [`SortDirection`].

use std::str::FromStr;

use serde::{Deserialize, Serialize};
use url::Url;

use super::lenient;

/// Page size the server applies when a request does not name one.
pub const DEFAULT_LIMIT: i64 = 100;

/// Largest page size the server accepts.
pub const MAX_LIMIT: i64 = 1000;

/// Trait implemented by all list-query builders. Provides URL serialization and
/// shared builder methods for pagination and sort direction.
pub trait Query {
    /// Appends this query's parameters to the given URL, returning the modified URL.
    fn add_to_url(&self, url: &Url) -> Url;

    /// Returns a mutable reference to the common query fields.
    fn get_common(&mut self) -> &mut QueryCommon;

    /// Sets the page number (1-indexed).
    fn with_page(mut self, page: i64) -> Self
    where
        Self: Sized,
    {
        self.get_common().page = page;
        self
    }

    /// Sets the number of results per page.
    fn with_limit(mut self, limit: i64) -> Self
    where
        Self: Sized,
    {
        self.get_common().limit = Some(limit);
        self
    }

    /// Sets the sort direction (ascending or descending).
    fn with_sort_direction(mut self, sort_direction: SortDirection) -> Self
    where
        Self: Sized,
    {
        self.get_common().sort_direction = sort_direction;
        self
    }
}

/// Sort order for list results.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    /// Ascending order (oldest/smallest first).
    Asc,
    /// Descending order (newest/largest first). This is the default.
    #[default]
    Desc,
}
impl SortDirection {
    /// The SQL keyword for this direction.
    pub fn as_sql(&self) -> &'static str {
        match self {
            SortDirection::Asc => "ASC",
            SortDirection::Desc => "DESC",
        }
    }
}
impl std::fmt::Display for SortDirection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}",
            match self {
                SortDirection::Asc => "asc",
                SortDirection::Desc => "desc",
            }
        )
    }
}
impl FromStr for SortDirection {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "asc" => Ok(SortDirection::Asc),
            "desc" => Ok(SortDirection::Desc),
            _ => Err(()),
        }
    }
}

/// Fields shared by all query types: pagination and sort direction.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub struct QueryCommon {
    /// Page number (1-indexed). Defaults to 1.
    #[serde(default = "default_page", deserialize_with = "lenient::i64")]
    pub page: i64,
    /// Results per page. `None` uses the server default of [`DEFAULT_LIMIT`].
    #[serde(default, deserialize_with = "lenient::option_i64")]
    pub limit: Option<i64>,
    /// Sort direction. Defaults to descending.
    #[serde(default)]
    pub sort_direction: SortDirection,
}

fn default_page() -> i64 {
    1
}

impl Default for QueryCommon {
    fn default() -> QueryCommon {
        QueryCommon {
            page: 1,
            limit: None,
            sort_direction: SortDirection::Desc,
        }
    }
}

impl QueryCommon {
    /// Appends the common pagination parameters to the URL.
    pub fn add_to_url(&self, url: &Url) -> Url {
        let mut url = url.clone();
        url.query_pairs_mut()
            .append_pair("page", &self.page.to_string());
        if let Some(limit) = self.limit {
            url.query_pairs_mut()
                .append_pair("limit", &limit.to_string());
        };
        url.query_pairs_mut()
            .append_pair("sort_direction", &self.sort_direction.to_string());
        url
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn common_defaults_from_empty_query_string() {
        let common: QueryCommon = serde_json::from_str("{}").unwrap();
        assert_eq!(common, QueryCommon::default());
    }

    #[test]
    fn common_accepts_numbers_as_strings() {
        let common: QueryCommon =
            serde_json::from_str(r#"{"page":"3","limit":"25","sort_direction":"asc"}"#).unwrap();
        assert_eq!(common.page, 3);
        assert_eq!(common.limit, Some(25));
        assert_eq!(common.sort_direction, SortDirection::Asc);
    }

    #[test]
    fn common_rejects_garbage_page() {
        let result = serde_json::from_str::<QueryCommon>(r#"{"page":"two"}"#);
        assert!(result.is_err());
    }
}
