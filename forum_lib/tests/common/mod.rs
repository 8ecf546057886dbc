//! Shared harness: a live server on an ephemeral port backed by an
//! in-memory database, plus helpers that sign members up through the SDK.

#![allow(dead_code)]

use std::sync::Arc;

use forum_api::types::{Authorized, Category, MemberJoin, Post, PostCreate};
use forum_api::{CategoryQuery, Client};
use forum_lib::server::create_router;
use forum_lib::{Forum, ServerConfig};
use tokio::net::TcpListener;

pub fn test_config() -> ServerConfig {
    ServerConfig {
        bcrypt_cost: 4,
        ..ServerConfig::default()
    }
}

pub fn test_forum() -> Forum {
    Forum::open_in_memory(&test_config()).expect("open in-memory forum")
}

/// Starts a server and returns the base URL it listens on.
pub async fn spawn_server() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("local addr");
    let app = create_router(Arc::new(test_forum()), &[]);
    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("serve");
    });
    format!("http://{}", addr)
}

/// Joins a new member and returns a client holding their token.
pub async fn join(base_url: &str, username: &str) -> (Client, Authorized) {
    let mut client = Client::with_base_url(base_url);
    let authorized = client
        .join(&MemberJoin {
            email: format!("{}@example.com", username),
            username: username.to_string(),
            password: "correct horse".to_string(),
            display_name: None,
        })
        .await
        .expect("join");
    (client, authorized)
}

/// The seeded "General" category.
pub async fn general(client: &Client) -> Category {
    let page = client
        .get_categories(&CategoryQuery::default().with_search("General"))
        .await
        .expect("list categories");
    let summary = page
        .data
        .into_iter()
        .find(|c| c.name == "General")
        .expect("General is seeded");
    client.get_category(summary.id).await.expect("get category")
}

pub async fn create_post(client: &Client, title: &str, tags: &[&str]) -> Post {
    let category = general(client).await;
    client
        .create_post(&PostCreate {
            category_id: category.id,
            title: title.to_string(),
            body: format!("Body of {}", title),
            tags: tags.iter().map(|t| t.to_string()).collect(),
        })
        .await
        .expect("create post")
}
