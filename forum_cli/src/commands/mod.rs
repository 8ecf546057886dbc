//! CLI subcommand implementations.

pub mod categories;
pub mod members;
pub mod posts;
pub mod promote;
pub mod serve;
