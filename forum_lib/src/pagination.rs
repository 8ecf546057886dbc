//! Resolution of list-query pagination into a concrete window.

use forum_api::types::{Page, Pagination};
use forum_api::{QueryCommon, SortDirection, DEFAULT_LIMIT};

use crate::error::ForumError;
use crate::validation::{validate_limit, validate_page};

/// A validated page request: which slice of the result set to return and in
/// which direction to sort it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageWindow {
    pub page: i64,
    pub limit: i64,
    pub sort_direction: SortDirection,
}

impl PageWindow {
    /// Validates `page` and `limit`, applying [`DEFAULT_LIMIT`] when no limit was given.
    pub fn resolve(common: &QueryCommon) -> Result<Self, ForumError> {
        Ok(Self {
            page: validate_page(common.page)?,
            limit: validate_limit(common.limit.unwrap_or(DEFAULT_LIMIT))?,
            sort_direction: common.sort_direction,
        })
    }

    pub fn offset(&self) -> i64 {
        (self.page.max(1) - 1).saturating_mul(self.limit)
    }

    /// Wraps one page of rows together with the total row count.
    pub fn into_page<T>(self, records: i64, data: Vec<T>) -> Page<T> {
        Page::new(Pagination::new(self.page, self.limit, records), data)
    }
}

impl Default for PageWindow {
    fn default() -> Self {
        Self {
            page: 1,
            limit: DEFAULT_LIMIT,
            sort_direction: SortDirection::Desc,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_limit_applies() {
        let window = PageWindow::resolve(&QueryCommon::default()).unwrap();
        assert_eq!(window.limit, DEFAULT_LIMIT);
        assert_eq!(window.page, 1);
        assert_eq!(window.offset(), 0);
    }

    #[test]
    fn out_of_range_values_rejected() {
        let common = QueryCommon {
            page: 0,
            ..QueryCommon::default()
        };
        assert!(PageWindow::resolve(&common).is_err());

        let common = QueryCommon {
            limit: Some(5000),
            ..QueryCommon::default()
        };
        assert!(PageWindow::resolve(&common).is_err());
    }

    #[test]
    fn huge_page_rejected_before_offset() {
        let common = QueryCommon {
            page: i64::MAX,
            limit: Some(10),
            ..QueryCommon::default()
        };
        assert!(PageWindow::resolve(&common).is_err());
    }

    #[test]
    fn last_page_offset_fits() {
        let window = PageWindow {
            page: crate::validation::MAX_PAGE,
            limit: forum_api::MAX_LIMIT,
            sort_direction: SortDirection::Desc,
        };
        assert!(window.offset() > 0);

        let runaway = PageWindow {
            page: i64::MAX,
            ..window
        };
        assert_eq!(runaway.offset(), i64::MAX);
    }

    #[test]
    fn into_page_computes_pages() {
        let window = PageWindow {
            page: 2,
            limit: 3,
            sort_direction: SortDirection::Asc,
        };
        assert_eq!(window.offset(), 3);
        let page = window.into_page(7, vec!["d", "e", "f"]);
        assert_eq!(page.pagination.pages, 3);
        assert_eq!(page.pagination.current, 2);
        assert_eq!(page.pagination.records, 7);
        assert!(page.data.len() as i64 <= page.pagination.limit);
    }
}
