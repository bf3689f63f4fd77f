//! # Blog Infrastructure
//!
//! Concrete implementations of the ports defined in `blog-core`.
//! This crate contains the database, in-memory store and mail integrations.
//!
//! ## Feature Flags
//!
//! - `full` (default) - All features enabled
//! - `minimal` - No external dependencies, in-memory only
//! - `postgres` - PostgreSQL database support via SeaORM
//! - `smtp` - SMTP mail delivery via lettre

pub mod database;
pub mod mail;
pub mod store;

// Re-exports - In-Memory
pub use database::DatabaseConfig;
pub use mail::{ConsoleMailTransport, InMemoryMailbox, SmtpConfig};
pub use store::InMemoryBlogStore;

#[cfg(feature = "postgres")]
pub use database::{PostgresCommentRepository, PostgresPostRepository, PostgresTagRepository};

#[cfg(feature = "smtp")]
pub use mail::SmtpMailTransport;
