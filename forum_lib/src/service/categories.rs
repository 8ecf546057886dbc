use forum_api::types::{
    Category, CategoryCreate, CategoryID, CategorySummary, CategoryUpdate, Member, Page, Role,
};
use forum_api::CategoryQuery;
use uuid::Uuid;

use super::{require_role, Forum};
use crate::db::{now, DbCategoryFilter};
use crate::error::ForumError;
use crate::pagination::PageWindow;
use crate::validation::{validate_category_name, validate_description, validate_search};

impl Forum {
    pub fn list_categories(
        &self,
        query: &CategoryQuery,
    ) -> Result<Page<CategorySummary>, ForumError> {
        let window = PageWindow::resolve(&query.common)?;
        let filter = DbCategoryFilter {
            search: query.search.as_deref().map(validate_search).transpose()?,
            sort_by: query.sort_by,
        };
        let (records, categories) = self.db().query_categories(&filter, &window)?;
        Ok(window.into_page(records, categories.into_iter().map(Into::into).collect()))
    }

    pub fn get_category(&self, id: CategoryID) -> Result<Category, ForumError> {
        self.db()
            .get_category(id)?
            .ok_or_else(|| ForumError::not_found("category", id))
    }

    pub fn create_category(
        &self,
        actor: &Member,
        body: &CategoryCreate,
    ) -> Result<Category, ForumError> {
        require_role(actor, Role::Administrator)?;
        let name = validate_category_name(&body.name)?;
        let description = body
            .description
            .as_deref()
            .map(validate_description)
            .transpose()?;

        let db = self.db();
        if db.category_name_taken(&name, None)? {
            return Err(ForumError::Conflict(format!(
                "category '{}' already exists",
                name
            )));
        }
        let at = now();
        let category = Category {
            id: Uuid::new_v4(),
            name,
            description,
            created_at: at,
            updated_at: at,
            deleted_at: None,
        };
        db.insert_category(&category)?;
        Ok(category)
    }

    pub fn update_category(
        &self,
        actor: &Member,
        id: CategoryID,
        body: &CategoryUpdate,
    ) -> Result<Category, ForumError> {
        require_role(actor, Role::Administrator)?;
        let name = body
            .name
            .as_deref()
            .map(validate_category_name)
            .transpose()?;
        let description = body
            .description
            .as_deref()
            .map(validate_description)
            .transpose()?;

        let db = self.db();
        let mut category = db
            .get_category(id)?
            .ok_or_else(|| ForumError::not_found("category", id))?;
        if let Some(name) = name {
            if db.category_name_taken(&name, Some(id))? {
                return Err(ForumError::Conflict(format!(
                    "category '{}' already exists",
                    name
                )));
            }
            category.name = name;
        }
        if description.is_some() {
            category.description = description;
        }
        category.updated_at = now();
        db.update_category(&category)?;
        Ok(category)
    }

    /// Soft-deletes an empty category.
    pub fn erase_category(&self, actor: &Member, id: CategoryID) -> Result<Category, ForumError> {
        require_role(actor, Role::Administrator)?;
        let db = self.db();
        let category = db
            .get_category(id)?
            .ok_or_else(|| ForumError::not_found("category", id))?;
        let posts = db.count_category_posts(id)?;
        if posts > 0 {
            return Err(ForumError::Conflict(format!(
                "category '{}' still has {} active posts",
                category.name, posts
            )));
        }
        let at = now();
        db.erase_category(id, at)?;
        Ok(Category {
            updated_at: at,
            deleted_at: Some(at),
            ..category
        })
    }
}
