//! Board categories that posts are filed under.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub type CategoryID = Uuid;

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Category {
    pub id: CategoryID,
    /// Unique among active categories.
    pub name: String,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub deleted_at: Option<DateTime<Utc>>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct CategorySummary {
    pub id: CategoryID,
    pub name: String,
    pub description: Option<String>,
}
impl From<Category> for CategorySummary {
    fn from(val: Category) -> Self {
        CategorySummary {
            id: val.id,
            name: val.name,
            description: val.description,
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct CategoryCreate {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default)]
pub struct CategoryUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}
