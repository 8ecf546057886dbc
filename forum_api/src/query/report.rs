use serde::{Deserialize, Serialize};
use url::Url;

use crate::types::{MemberID, ReportStatus};

use super::{common::QueryCommon, Query};

/// Filters for `GET /reports`. Results are ordered by creation time.
#[derive(Serialize, Deserialize, Default, Clone, Debug)]
pub struct ReportQuery {
    #[serde(flatten)]
    pub common: QueryCommon,
    #[serde(default)]
    pub status: Option<ReportStatus>,
    #[serde(default)]
    pub reporter_id: Option<String>,
}

impl Query for ReportQuery {
    fn get_common(&mut self) -> &mut QueryCommon {
        &mut self.common
    }
    fn add_to_url(&self, url: &Url) -> Url {
        let mut url = self.common.add_to_url(url);
        if let Some(status) = &self.status {
            url.query_pairs_mut()
                .append_pair("status", status.to_string().as_str());
        };
        if let Some(reporter_id) = &self.reporter_id {
            url.query_pairs_mut()
                .append_pair("reporter_id", reporter_id.as_str());
        };
        url
    }
}

impl ReportQuery {
    pub fn with_status(mut self, status: ReportStatus) -> Self {
        self.status = Some(status);
        self
    }

    pub fn with_reporter_id(mut self, reporter_id: MemberID) -> Self {
        self.reporter_id = Some(reporter_id.to_string());
        self
    }
}
