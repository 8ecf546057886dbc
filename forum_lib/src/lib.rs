//! Discussion board backend: SQLite storage, business rules and the HTTP
//! server that exposes them.

pub mod cache;
pub mod config;
pub mod db;
pub mod error;
pub mod pagination;
pub mod seed;
pub mod server;
pub mod service;
pub mod session;
pub mod validation;

pub use config::ServerConfig;
pub use error::ForumError;
pub use service::Forum;
