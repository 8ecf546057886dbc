use forum_api::types::{
    Member, Page, Post, PostCreate, PostID, PostSummary, PostTagsUpdate, PostUpdate,
};
use forum_api::PostQuery;
use uuid::Uuid;

use super::{require_active, require_owner_or_staff, require_staff, Forum};
use crate::db::{now, DbPostFilter};
use crate::error::ForumError;
use crate::pagination::PageWindow;
use crate::validation::{
    validate_body, validate_optional_uuid, validate_search, validate_tag, validate_tags,
    validate_title,
};

impl Forum {
    pub fn list_posts(&self, query: &PostQuery) -> Result<Page<PostSummary>, ForumError> {
        let window = PageWindow::resolve(&query.common)?;
        let filter = DbPostFilter {
            category_id: validate_optional_uuid(query.category_id.as_deref(), "category_id")?,
            author_id: validate_optional_uuid(query.author_id.as_deref(), "author_id")?,
            search: query.search.as_deref().map(validate_search).transpose()?,
            tag: query.tag.as_deref().map(validate_tag).transpose()?,
            sort_by: query.sort_by,
        };
        let (records, posts) = self.db().query_posts(&filter, &window)?;
        Ok(window.into_page(records, posts))
    }

    pub fn get_post(&self, id: PostID) -> Result<Post, ForumError> {
        self.db()
            .get_post(id)?
            .ok_or_else(|| ForumError::not_found("post", id))
    }

    pub fn create_post(&self, actor: &Member, body: &PostCreate) -> Result<Post, ForumError> {
        require_active(actor)?;
        let title = validate_title(&body.title)?;
        let text = validate_body(&body.body)?;
        let tags = validate_tags(&body.tags)?;

        let mut db = self.db();
        if db.get_category(body.category_id)?.is_none() {
            return Err(ForumError::not_found("category", body.category_id));
        }
        let at = now();
        let post = Post {
            id: Uuid::new_v4(),
            category_id: body.category_id,
            author_id: actor.id,
            title,
            body: text,
            tags,
            created_at: at,
            updated_at: at,
            deleted_at: None,
        };
        db.insert_post(&post)?;
        Ok(post)
    }

    pub fn update_post(
        &self,
        actor: &Member,
        id: PostID,
        body: &PostUpdate,
    ) -> Result<Post, ForumError> {
        let title = body.title.as_deref().map(validate_title).transpose()?;
        let text = body.body.as_deref().map(validate_body).transpose()?;

        let db = self.db();
        let mut post = db
            .get_post(id)?
            .ok_or_else(|| ForumError::not_found("post", id))?;
        require_owner_or_staff(actor, post.author_id, "post")?;
        if let Some(category_id) = body.category_id {
            if db.get_category(category_id)?.is_none() {
                return Err(ForumError::not_found("category", category_id));
            }
            post.category_id = category_id;
        }
        if let Some(title) = title {
            post.title = title;
        }
        if let Some(text) = text {
            post.body = text;
        }
        post.updated_at = now();
        db.update_post(&post)?;
        Ok(post)
    }

    /// Replaces a post's tags. Staff only; at most five distinct tags.
    pub fn set_post_tags(
        &self,
        actor: &Member,
        id: PostID,
        body: &PostTagsUpdate,
    ) -> Result<Post, ForumError> {
        require_staff(actor)?;
        let tags = validate_tags(&body.tags)?;

        let mut db = self.db();
        let at = now();
        if !db.set_post_tags(id, &tags, at)? {
            return Err(ForumError::not_found("post", id));
        }
        db.get_post(id)?
            .ok_or_else(|| ForumError::not_found("post", id))
    }

    pub fn erase_post(&self, actor: &Member, id: PostID) -> Result<Post, ForumError> {
        let db = self.db();
        let post = db
            .get_post(id)?
            .ok_or_else(|| ForumError::not_found("post", id))?;
        require_owner_or_staff(actor, post.author_id, "post")?;
        let at = now();
        db.erase_post(id, at)?;
        Ok(Post {
            updated_at: at,
            deleted_at: Some(at),
            ..post
        })
    }
}
