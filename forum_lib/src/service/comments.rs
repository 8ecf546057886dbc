use forum_api::types::{
    Comment, CommentCreate, CommentID, CommentSummary, CommentUpdate, Member, NotificationKind,
    Page, Post, PostID,
};
use forum_api::CommentQuery;
use uuid::Uuid;

use super::{notification, require_active, require_owner_or_staff, Forum};
use crate::db::{now, Db, DbCommentFilter};
use crate::error::ForumError;
use crate::pagination::PageWindow;
use crate::validation::{validate_comment_body, validate_optional_uuid, validate_search};

/// A live comment that belongs to `post_id`.
fn comment_of_post(db: &Db, post_id: PostID, id: CommentID) -> Result<Comment, ForumError> {
    match db.get_comment(id)? {
        Some(comment) if comment.post_id == post_id => Ok(comment),
        _ => Err(ForumError::not_found("comment", id)),
    }
}

fn require_post(db: &Db, post_id: PostID) -> Result<Post, ForumError> {
    db.get_post(post_id)?
        .ok_or_else(|| ForumError::not_found("post", post_id))
}

impl Forum {
    pub fn list_comments(
        &self,
        post_id: PostID,
        query: &CommentQuery,
    ) -> Result<Page<CommentSummary>, ForumError> {
        let window = PageWindow::resolve(&query.common)?;
        let filter = DbCommentFilter {
            post_id,
            author_id: validate_optional_uuid(query.author_id.as_deref(), "author_id")?,
            search: query.search.as_deref().map(validate_search).transpose()?,
            sort_by: query.sort_by,
        };
        let db = self.db();
        require_post(&db, post_id)?;
        let (records, comments) = db.query_comments(&filter, &window)?;
        Ok(window.into_page(records, comments.into_iter().map(Into::into).collect()))
    }

    pub fn get_comment(&self, post_id: PostID, id: CommentID) -> Result<Comment, ForumError> {
        let db = self.db();
        require_post(&db, post_id)?;
        comment_of_post(&db, post_id, id)
    }

    /// Adds a comment and notifies the post author and, for replies, the
    /// parent comment's author. Nobody is notified about their own comment.
    pub fn create_comment(
        &self,
        actor: &Member,
        post_id: PostID,
        body: &CommentCreate,
    ) -> Result<Comment, ForumError> {
        require_active(actor)?;
        let text = validate_comment_body(&body.body)?;

        let db = self.db();
        let post = require_post(&db, post_id)?;
        let parent = match body.parent_id {
            Some(parent_id) => match db.get_comment(parent_id)? {
                Some(parent) if parent.post_id == post_id => Some(parent),
                Some(_) => {
                    return Err(ForumError::InvalidInput(format!(
                        "parent comment {} belongs to another post",
                        parent_id
                    )))
                }
                None => return Err(ForumError::not_found("comment", parent_id)),
            },
            None => None,
        };

        let at = now();
        let comment = Comment {
            id: Uuid::new_v4(),
            post_id,
            author_id: actor.id,
            parent_id: parent.as_ref().map(|p| p.id),
            body: text,
            created_at: at,
            updated_at: at,
            deleted_at: None,
        };
        db.insert_comment(&comment)?;

        let mut notified = vec![actor.id];
        if let Some(parent) = &parent {
            if !notified.contains(&parent.author_id) {
                let mut n = notification(
                    parent.author_id,
                    NotificationKind::ReplyToComment,
                    format!("{} replied to your comment on '{}'", actor.username, post.title),
                );
                n.post_id = Some(post_id);
                n.comment_id = Some(comment.id);
                db.insert_notification(&n)?;
                notified.push(parent.author_id);
            }
        }
        if !notified.contains(&post.author_id) {
            let mut n = notification(
                post.author_id,
                NotificationKind::CommentOnPost,
                format!("{} commented on '{}'", actor.username, post.title),
            );
            n.post_id = Some(post_id);
            n.comment_id = Some(comment.id);
            db.insert_notification(&n)?;
        }
        Ok(comment)
    }

    pub fn update_comment(
        &self,
        actor: &Member,
        post_id: PostID,
        id: CommentID,
        body: &CommentUpdate,
    ) -> Result<Comment, ForumError> {
        let text = validate_comment_body(&body.body)?;
        let db = self.db();
        require_post(&db, post_id)?;
        let mut comment = comment_of_post(&db, post_id, id)?;
        require_owner_or_staff(actor, comment.author_id, "comment")?;
        comment.body = text;
        comment.updated_at = now();
        db.update_comment(&comment)?;
        Ok(comment)
    }

    /// Soft-deletes one comment. Replies and sibling comments stay visible.
    pub fn erase_comment(
        &self,
        actor: &Member,
        post_id: PostID,
        id: CommentID,
    ) -> Result<Comment, ForumError> {
        let db = self.db();
        require_post(&db, post_id)?;
        let comment = comment_of_post(&db, post_id, id)?;
        require_owner_or_staff(actor, comment.author_id, "comment")?;
        let at = now();
        db.erase_comment(id, at)?;
        Ok(Comment {
            updated_at: at,
            deleted_at: Some(at),
            ..comment
        })
    }
}
