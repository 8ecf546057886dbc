//! HTTP client for the forum REST API.

use std::time::Duration;

use reqwest::{Method, RequestBuilder};
use serde::{de::DeserializeOwned, Serialize};
use url::Url;
use uuid::Uuid;

use crate::{
    query::{
        CategoryQuery, CommentQuery, MemberQuery, ModerationActionQuery, NotificationQuery,
        PostQuery, Query, ReportQuery,
    },
    types::{
        Authorized, Category, CategoryCreate, CategorySummary, CategoryUpdate, Comment,
        CommentCreate, CommentSummary, CommentUpdate, Member, MemberJoin, MemberLogin,
        MemberRoleUpdate, MemberSummary, MemberUpdate, ModerationAction, ModerationActionCreate,
        Notification, Page, Poll, PollCreate, PollVote, PollVoteCreate, Post, PostCreate,
        PostSummary, PostTagsUpdate, PostUpdate, Report, ReportCreate, ReportSummary,
        ReportUpdate,
    },
    Error,
};

const USER_AGENT: &str = concat!("forum-sdk/", env!("CARGO_PKG_VERSION"));

/// HTTP client for the forum REST API.
///
/// Holds the bearer token of the signed-in member. `join` and `login` store
/// the token they receive, so a scenario can chain calls without passing
/// credentials around. Each request builds a fresh `reqwest::Client` with a
/// 30-second timeout.
#[derive(Clone, Debug)]
pub struct Client {
    /// Base URL for the API. Defaults to `http://127.0.0.1:37001`.
    base_api_url: String,
    token: Option<String>,
}

impl Default for Client {
    fn default() -> Self {
        Self::new()
    }
}

impl Client {
    /// Creates a new client pointing at a server on the default local address.
    pub fn new() -> Self {
        Self::with_base_url("http://127.0.0.1:37001")
    }

    /// Creates a new client with a custom base URL.
    pub fn with_base_url(base_url: &str) -> Self {
        Self {
            base_api_url: base_url.trim_end_matches('/').to_string(),
            token: None,
        }
    }

    /// Returns a copy of this client authenticated with `token`.
    pub fn with_token(mut self, token: &str) -> Self {
        self.token = Some(token.to_string());
        self
    }

    pub fn set_token(&mut self, token: Option<String>) {
        self.token = token;
    }

    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    /// Same server, no credentials.
    pub fn anonymous(&self) -> Self {
        Self::with_base_url(&self.base_api_url)
    }

    fn get_url(&self, path: &str, query: Option<&impl Query>) -> Result<Url, Error> {
        let url = Url::parse(format!("{}{}", &self.base_api_url, path).as_str()).map_err(|e| {
            tracing::error!("Invalid URL constructed: {}", e);
            Error::RequestFailed
        })?;
        Ok(match query {
            Some(query) => query.add_to_url(&url),
            None => url,
        })
    }

    fn request(&self, method: Method, url: Url) -> Result<RequestBuilder, Error> {
        let client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(Duration::from_secs(30))
            .build()
            .map_err(|e| {
                tracing::error!("Failed to build HTTP client: {}", e);
                Error::RequestFailed
            })?;
        let mut builder = client
            .request(method, url)
            .header("accept", "application/json");
        if let Some(token) = &self.token {
            builder = builder.bearer_auth(token);
        }
        Ok(builder)
    }

    async fn send_raw(&self, builder: RequestBuilder) -> Result<String, Error> {
        let resp = builder.send().await.map_err(|e| {
            tracing::error!("Failed to send request: {}", e);
            Error::RequestFailed
        })?;

        let status = resp.status();
        let body = resp.text().await.map_err(|e| {
            tracing::error!("Failed to read response body: {}", e);
            Error::RequestFailed
        })?;

        if !status.is_success() {
            let snippet = truncate_body(&body);
            tracing::debug!("Request failed with status {}: {}", status, snippet);
            return Err(Error::HttpStatus {
                status: status.as_u16(),
                body: snippet,
            });
        }
        Ok(body)
    }

    async fn send<T>(&self, builder: RequestBuilder) -> Result<T, Error>
    where
        T: DeserializeOwned,
    {
        let body = self.send_raw(builder).await?;
        serde_json::from_str::<T>(&body).map_err(|e| {
            tracing::error!(
                "Failed to parse resource: {} | body: {}",
                e,
                truncate_body(&body)
            );
            Error::Serialization(e)
        })
    }

    async fn get<T, Q>(&self, path: &str, query: Option<&Q>) -> Result<T, Error>
    where
        T: DeserializeOwned,
        Q: Query,
    {
        let url = self.get_url(path, query)?;
        self.send(self.request(Method::GET, url)?).await
    }

    async fn with_body<T, B>(&self, method: Method, path: &str, body: &B) -> Result<T, Error>
    where
        T: DeserializeOwned,
        B: Serialize,
    {
        let url = self.get_url(path, None::<&PostQuery>)?;
        self.send(self.request(method, url)?.json(body)).await
    }

    async fn delete<T>(&self, path: &str) -> Result<T, Error>
    where
        T: DeserializeOwned,
    {
        let url = self.get_url(path, None::<&PostQuery>)?;
        self.send(self.request(Method::DELETE, url)?).await
    }

    // -- Authentication --

    /// Registers a new member and keeps the returned token.
    pub async fn join(&mut self, body: &MemberJoin) -> Result<Authorized, Error> {
        let authorized: Authorized = self.with_body(Method::POST, "/auth/join", body).await?;
        self.token = Some(authorized.token.clone());
        Ok(authorized)
    }

    /// Signs in and keeps the returned token.
    pub async fn login(&mut self, body: &MemberLogin) -> Result<Authorized, Error> {
        let authorized: Authorized = self.with_body(Method::POST, "/auth/login", body).await?;
        self.token = Some(authorized.token.clone());
        Ok(authorized)
    }

    /// Revokes the current token and forgets it.
    pub async fn logout(&mut self) -> Result<(), Error> {
        let url = self.get_url("/auth/session", None::<&PostQuery>)?;
        self.send_raw(self.request(Method::DELETE, url)?).await?;
        self.token = None;
        Ok(())
    }

    /// Fetches the signed-in member.
    pub async fn me(&self) -> Result<Member, Error> {
        self.get::<Member, PostQuery>("/auth/me", None).await
    }

    // -- Members --

    pub async fn get_members(&self, query: &MemberQuery) -> Result<Page<MemberSummary>, Error> {
        self.get::<Page<MemberSummary>, MemberQuery>("/members", Some(query))
            .await
    }

    pub async fn get_member(&self, member_id: Uuid) -> Result<Member, Error> {
        self.get::<Member, MemberQuery>(format!("/members/{}", member_id).as_str(), None)
            .await
    }

    pub async fn update_member(
        &self,
        member_id: Uuid,
        body: &MemberUpdate,
    ) -> Result<Member, Error> {
        self.with_body(Method::PUT, format!("/members/{}", member_id).as_str(), body)
            .await
    }

    pub async fn set_member_role(
        &self,
        member_id: Uuid,
        body: &MemberRoleUpdate,
    ) -> Result<Member, Error> {
        self.with_body(
            Method::PUT,
            format!("/members/{}/role", member_id).as_str(),
            body,
        )
        .await
    }

    /// Soft-deletes a member. The returned record carries `deleted_at`.
    pub async fn erase_member(&self, member_id: Uuid) -> Result<Member, Error> {
        self.delete(format!("/members/{}", member_id).as_str()).await
    }

    // -- Categories --

    pub async fn get_categories(
        &self,
        query: &CategoryQuery,
    ) -> Result<Page<CategorySummary>, Error> {
        self.get::<Page<CategorySummary>, CategoryQuery>("/categories", Some(query))
            .await
    }

    pub async fn get_category(&self, category_id: Uuid) -> Result<Category, Error> {
        self.get::<Category, CategoryQuery>(format!("/categories/{}", category_id).as_str(), None)
            .await
    }

    pub async fn create_category(&self, body: &CategoryCreate) -> Result<Category, Error> {
        self.with_body(Method::POST, "/categories", body).await
    }

    pub async fn update_category(
        &self,
        category_id: Uuid,
        body: &CategoryUpdate,
    ) -> Result<Category, Error> {
        self.with_body(
            Method::PUT,
            format!("/categories/{}", category_id).as_str(),
            body,
        )
        .await
    }

    pub async fn erase_category(&self, category_id: Uuid) -> Result<Category, Error> {
        self.delete(format!("/categories/{}", category_id).as_str())
            .await
    }

    // -- Posts --

    pub async fn get_posts(&self, query: &PostQuery) -> Result<Page<PostSummary>, Error> {
        self.get::<Page<PostSummary>, PostQuery>("/posts", Some(query))
            .await
    }

    pub async fn get_post(&self, post_id: Uuid) -> Result<Post, Error> {
        self.get::<Post, PostQuery>(format!("/posts/{}", post_id).as_str(), None)
            .await
    }

    pub async fn create_post(&self, body: &PostCreate) -> Result<Post, Error> {
        self.with_body(Method::POST, "/posts", body).await
    }

    pub async fn update_post(&self, post_id: Uuid, body: &PostUpdate) -> Result<Post, Error> {
        self.with_body(Method::PUT, format!("/posts/{}", post_id).as_str(), body)
            .await
    }

    pub async fn set_post_tags(
        &self,
        post_id: Uuid,
        body: &PostTagsUpdate,
    ) -> Result<Post, Error> {
        self.with_body(
            Method::PUT,
            format!("/posts/{}/tags", post_id).as_str(),
            body,
        )
        .await
    }

    pub async fn erase_post(&self, post_id: Uuid) -> Result<Post, Error> {
        self.delete(format!("/posts/{}", post_id).as_str()).await
    }

    // -- Comments --

    pub async fn get_comments(
        &self,
        post_id: Uuid,
        query: &CommentQuery,
    ) -> Result<Page<CommentSummary>, Error> {
        self.get::<Page<CommentSummary>, CommentQuery>(
            format!("/posts/{}/comments", post_id).as_str(),
            Some(query),
        )
        .await
    }

    pub async fn get_comment(&self, post_id: Uuid, comment_id: Uuid) -> Result<Comment, Error> {
        self.get::<Comment, CommentQuery>(
            format!("/posts/{}/comments/{}", post_id, comment_id).as_str(),
            None,
        )
        .await
    }

    pub async fn create_comment(
        &self,
        post_id: Uuid,
        body: &CommentCreate,
    ) -> Result<Comment, Error> {
        self.with_body(
            Method::POST,
            format!("/posts/{}/comments", post_id).as_str(),
            body,
        )
        .await
    }

    pub async fn update_comment(
        &self,
        post_id: Uuid,
        comment_id: Uuid,
        body: &CommentUpdate,
    ) -> Result<Comment, Error> {
        self.with_body(
            Method::PUT,
            format!("/posts/{}/comments/{}", post_id, comment_id).as_str(),
            body,
        )
        .await
    }

    pub async fn erase_comment(&self, post_id: Uuid, comment_id: Uuid) -> Result<Comment, Error> {
        self.delete(format!("/posts/{}/comments/{}", post_id, comment_id).as_str())
            .await
    }

    // -- Reports --

    pub async fn create_report(&self, body: &ReportCreate) -> Result<Report, Error> {
        self.with_body(Method::POST, "/reports", body).await
    }

    pub async fn get_reports(&self, query: &ReportQuery) -> Result<Page<ReportSummary>, Error> {
        self.get::<Page<ReportSummary>, ReportQuery>("/reports", Some(query))
            .await
    }

    pub async fn get_report(&self, report_id: Uuid) -> Result<Report, Error> {
        self.get::<Report, ReportQuery>(format!("/reports/{}", report_id).as_str(), None)
            .await
    }

    pub async fn update_report(
        &self,
        report_id: Uuid,
        body: &ReportUpdate,
    ) -> Result<Report, Error> {
        self.with_body(Method::PUT, format!("/reports/{}", report_id).as_str(), body)
            .await
    }

    // -- Moderation --

    pub async fn create_moderation_action(
        &self,
        body: &ModerationActionCreate,
    ) -> Result<ModerationAction, Error> {
        self.with_body(Method::POST, "/moderation/actions", body)
            .await
    }

    pub async fn get_moderation_actions(
        &self,
        query: &ModerationActionQuery,
    ) -> Result<Page<ModerationAction>, Error> {
        self.get::<Page<ModerationAction>, ModerationActionQuery>(
            "/moderation/actions",
            Some(query),
        )
        .await
    }

    pub async fn get_moderation_action(&self, action_id: Uuid) -> Result<ModerationAction, Error> {
        self.get::<ModerationAction, ModerationActionQuery>(
            format!("/moderation/actions/{}", action_id).as_str(),
            None,
        )
        .await
    }

    // -- Notifications --

    pub async fn get_notifications(
        &self,
        query: &NotificationQuery,
    ) -> Result<Page<Notification>, Error> {
        self.get::<Page<Notification>, NotificationQuery>("/notifications", Some(query))
            .await
    }

    pub async fn read_notification(&self, notification_id: Uuid) -> Result<Notification, Error> {
        self.with_body(
            Method::PUT,
            format!("/notifications/{}/read", notification_id).as_str(),
            &serde_json::json!({}),
        )
        .await
    }

    pub async fn erase_notification(&self, notification_id: Uuid) -> Result<Notification, Error> {
        self.delete(format!("/notifications/{}", notification_id).as_str())
            .await
    }

    // -- Polls --

    pub async fn create_poll(&self, post_id: Uuid, body: &PollCreate) -> Result<Poll, Error> {
        self.with_body(
            Method::POST,
            format!("/posts/{}/poll", post_id).as_str(),
            body,
        )
        .await
    }

    pub async fn get_poll(&self, post_id: Uuid) -> Result<Poll, Error> {
        self.get::<Poll, PostQuery>(format!("/posts/{}/poll", post_id).as_str(), None)
            .await
    }

    pub async fn erase_poll(&self, post_id: Uuid) -> Result<Poll, Error> {
        self.delete(format!("/posts/{}/poll", post_id).as_str()).await
    }

    pub async fn vote(&self, poll_id: Uuid, body: &PollVoteCreate) -> Result<PollVote, Error> {
        self.with_body(
            Method::POST,
            format!("/polls/{}/votes", poll_id).as_str(),
            body,
        )
        .await
    }
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 2000;
    if body.len() <= MAX {
        body.to_string()
    } else {
        let mut end = MAX;
        while !body.is_char_boundary(end) {
            end -= 1;
        }
        format!("{}...[truncated]", &body[..end])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_url_trailing_slash_is_trimmed() {
        let client = Client::with_base_url("http://localhost:8080/");
        let url = client.get_url("/posts", None::<&PostQuery>).unwrap();
        assert_eq!(url.as_str(), "http://localhost:8080/posts");
    }

    #[test]
    fn anonymous_drops_token() {
        let client = Client::with_base_url("http://localhost:8080").with_token("abc");
        assert_eq!(client.token(), Some("abc"));
        assert_eq!(client.anonymous().token(), None);
    }

    #[test]
    fn truncate_body_respects_limit() {
        let long = "x".repeat(2500);
        let out = truncate_body(&long);
        assert!(out.ends_with("...[truncated]"));
        assert_eq!(out.len(), 2000 + "...[truncated]".len());
    }
}
