//! # Blog Core
//!
//! The domain layer of the blog.
//! Posts, comments and tags, pagination, similar-post ranking and the
//! share-by-email workflow. No infrastructure dependencies live here.

pub mod domain;
pub mod error;
pub mod pagination;
pub mod ports;
pub mod services;

pub use error::{DomainError, RepoError};
pub use pagination::{POSTS_PER_PAGE, Page, Paginator};
