use serde::{Deserialize, Serialize};
use url::Url;

use super::{common::QueryCommon, lenient, Query};

/// Filters for `GET /notifications`. Always scoped to the caller.
#[derive(Serialize, Deserialize, Default, Clone, Debug)]
pub struct NotificationQuery {
    #[serde(flatten)]
    pub common: QueryCommon,
    #[serde(default, deserialize_with = "lenient::bool")]
    pub unread_only: bool,
}

impl Query for NotificationQuery {
    fn get_common(&mut self) -> &mut QueryCommon {
        &mut self.common
    }
    fn add_to_url(&self, url: &Url) -> Url {
        let mut url = self.common.add_to_url(url);
        if self.unread_only {
            url.query_pairs_mut().append_pair("unread_only", "true");
        }
        url
    }
}

impl NotificationQuery {
    pub fn with_unread_only(mut self, unread_only: bool) -> Self {
        self.unread_only = unread_only;
        self
    }
}
