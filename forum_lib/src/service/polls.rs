use forum_api::types::{
    Member, Poll, PollCreate, PollID, PollOption, PollVote, PollVoteCreate, PostID,
};
use uuid::Uuid;

use super::{require_active, require_owner_or_staff, Forum};
use crate::db::{now, Db};
use crate::error::ForumError;
use crate::validation::{validate_poll_options, validate_poll_question};

fn post_poll(db: &Db, post_id: PostID) -> Result<Poll, ForumError> {
    if db.get_post(post_id)?.is_none() {
        return Err(ForumError::not_found("post", post_id));
    }
    db.get_post_poll(post_id)?
        .ok_or_else(|| ForumError::NotFound(format!("post {} has no poll", post_id)))
}

impl Forum {
    /// Attaches a poll to the caller's own post. A post carries at most one
    /// active poll.
    pub fn create_poll(
        &self,
        actor: &Member,
        post_id: PostID,
        body: &PollCreate,
    ) -> Result<Poll, ForumError> {
        require_active(actor)?;
        let question = validate_poll_question(&body.question)?;
        let labels = validate_poll_options(&body.options)?;
        let at = now();
        if let Some(closes_at) = body.closes_at {
            if closes_at <= at {
                return Err(ForumError::InvalidInput(
                    "closes_at must be in the future".to_string(),
                ));
            }
        }

        let mut db = self.db();
        let post = db
            .get_post(post_id)?
            .ok_or_else(|| ForumError::not_found("post", post_id))?;
        if post.author_id != actor.id {
            return Err(ForumError::Forbidden(
                "only the post author can attach a poll".to_string(),
            ));
        }
        if db.get_post_poll(post_id)?.is_some() {
            return Err(ForumError::Conflict(format!(
                "post {} already has a poll",
                post_id
            )));
        }

        let poll = Poll {
            id: Uuid::new_v4(),
            post_id,
            question,
            options: labels
                .into_iter()
                .enumerate()
                .map(|(position, label)| PollOption {
                    id: Uuid::new_v4(),
                    label,
                    position: position as i64,
                    votes: 0,
                })
                .collect(),
            total_votes: 0,
            closes_at: body.closes_at,
            created_at: at,
            deleted_at: None,
        };
        db.insert_poll(&poll)?;
        Ok(poll)
    }

    pub fn get_poll(&self, post_id: PostID) -> Result<Poll, ForumError> {
        post_poll(&self.db(), post_id)
    }

    pub fn erase_poll(&self, actor: &Member, post_id: PostID) -> Result<Poll, ForumError> {
        let db = self.db();
        let post = db
            .get_post(post_id)?
            .ok_or_else(|| ForumError::not_found("post", post_id))?;
        require_owner_or_staff(actor, post.author_id, "poll")?;
        let poll = post_poll(&db, post_id)?;
        let at = now();
        db.erase_poll(poll.id, at)?;
        Ok(Poll {
            deleted_at: Some(at),
            ..poll
        })
    }

    /// Casts the caller's single vote on an open poll.
    pub fn vote(
        &self,
        actor: &Member,
        poll_id: PollID,
        body: &PollVoteCreate,
    ) -> Result<PollVote, ForumError> {
        require_active(actor)?;
        let db = self.db();
        let poll = db
            .get_poll(poll_id)?
            .ok_or_else(|| ForumError::not_found("poll", poll_id))?;
        if db.get_post(poll.post_id)?.is_none() {
            return Err(ForumError::not_found("poll", poll_id));
        }
        let at = now();
        if poll.closes_at.is_some_and(|closes_at| closes_at <= at) {
            return Err(ForumError::Conflict(format!("poll {} is closed", poll_id)));
        }
        if !poll.options.iter().any(|o| o.id == body.option_id) {
            return Err(ForumError::InvalidInput(format!(
                "option {} does not belong to poll {}",
                body.option_id, poll_id
            )));
        }
        if db.has_voted(poll_id, actor.id)? {
            return Err(ForumError::Conflict(
                "you have already voted in this poll".to_string(),
            ));
        }

        let vote = PollVote {
            id: Uuid::new_v4(),
            poll_id,
            option_id: body.option_id,
            member_id: actor.id,
            created_at: at,
        };
        db.insert_vote(&vote)?;
        Ok(vote)
    }
}
