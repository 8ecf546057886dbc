//! Route definitions and router construction.

use axum::http::HeaderValue;
use axum::routing::{delete, get, post, put};
use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use super::handlers;
use super::state::AppState;

/// Build the CORS layer. An empty origin list allows any origin.
fn build_cors_layer(origins: &[String]) -> CorsLayer {
    if origins.is_empty() {
        return CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any);
    }
    let allowed: Vec<HeaderValue> = origins.iter().filter_map(|o| o.parse().ok()).collect();
    CorsLayer::new()
        .allow_origin(allowed)
        .allow_methods(Any)
        .allow_headers(Any)
}

fn api_routes() -> Router<AppState> {
    Router::new()
        // Auth
        .route("/auth/join", post(handlers::auth::join))
        .route("/auth/login", post(handlers::auth::login))
        .route("/auth/session", delete(handlers::auth::logout))
        .route("/auth/me", get(handlers::auth::me))
        // Members
        .route("/members", get(handlers::members::list))
        .route(
            "/members/{id}",
            get(handlers::members::get)
                .put(handlers::members::update)
                .delete(handlers::members::erase),
        )
        .route("/members/{id}/role", put(handlers::members::set_role))
        // Categories
        .route(
            "/categories",
            get(handlers::categories::list).post(handlers::categories::create),
        )
        .route(
            "/categories/{id}",
            get(handlers::categories::get)
                .put(handlers::categories::update)
                .delete(handlers::categories::erase),
        )
        // Posts
        .route(
            "/posts",
            get(handlers::posts::list).post(handlers::posts::create),
        )
        .route(
            "/posts/{id}",
            get(handlers::posts::get)
                .put(handlers::posts::update)
                .delete(handlers::posts::erase),
        )
        .route("/posts/{id}/tags", put(handlers::posts::set_tags))
        // Comments
        .route(
            "/posts/{id}/comments",
            get(handlers::comments::list).post(handlers::comments::create),
        )
        .route(
            "/posts/{id}/comments/{comment_id}",
            get(handlers::comments::get)
                .put(handlers::comments::update)
                .delete(handlers::comments::erase),
        )
        // Polls
        .route(
            "/posts/{id}/poll",
            get(handlers::polls::get)
                .post(handlers::polls::create)
                .delete(handlers::polls::erase),
        )
        .route("/polls/{id}/votes", post(handlers::polls::vote))
        // Reports and moderation
        .route(
            "/reports",
            get(handlers::reports::list).post(handlers::reports::create),
        )
        .route(
            "/reports/{id}",
            get(handlers::reports::get).put(handlers::reports::update),
        )
        .route(
            "/moderation/actions",
            get(handlers::moderation::list).post(handlers::moderation::create),
        )
        .route(
            "/moderation/actions/{id}",
            get(handlers::moderation::get),
        )
        // Notifications
        .route("/notifications", get(handlers::notifications::list))
        .route(
            "/notifications/{id}",
            delete(handlers::notifications::erase),
        )
        .route(
            "/notifications/{id}/read",
            put(handlers::notifications::read),
        )
}

/// Create the application router.
pub fn create_router(state: AppState, cors_origins: &[String]) -> Router {
    Router::new()
        .route("/health", get(handlers::health::health))
        .merge(api_routes())
        .layer(TraceLayer::new_for_http())
        .layer(build_cors_layer(cors_origins))
        .with_state(state)
}
