use async_trait::async_trait;
use chrono::NaiveDate;
use uuid::Uuid;

use crate::domain::{Comment, Post, Tag};
use crate::error::RepoError;

/// Generic repository trait for entities persisted by readers.
#[async_trait]
pub trait BaseRepository<T, ID>: Send + Sync {
    /// Find an entity by its unique ID.
    async fn find_by_id(&self, id: ID) -> Result<Option<T>, RepoError>;

    /// Persist a new entity.
    async fn insert(&self, entity: T) -> Result<T, RepoError>;
}

/// Read-only view over published posts.
///
/// Every method only ever sees posts whose status is published; listings are
/// ordered by publish date, newest first.
#[async_trait]
pub trait PostRepository: Send + Sync {
    /// Count published posts, optionally restricted to a tag.
    async fn count_published(&self, tag: Option<&Tag>) -> Result<u64, RepoError>;

    /// Fetch a window of published posts, optionally restricted to a tag.
    async fn list_published(
        &self,
        tag: Option<&Tag>,
        offset: u64,
        limit: u64,
    ) -> Result<Vec<Post>, RepoError>;

    /// Find a published post by id.
    async fn find_published(&self, id: Uuid) -> Result<Option<Post>, RepoError>;

    /// Find the published post with `slug` published on `date` (UTC).
    async fn find_published_on(
        &self,
        date: NaiveDate,
        slug: &str,
    ) -> Result<Option<Post>, RepoError>;

    /// Published posts sharing tags with `post`, best match first.
    async fn similar_to(&self, post: &Post, limit: u64) -> Result<Vec<Post>, RepoError>;
}

/// Tag lookups.
#[async_trait]
pub trait TagRepository: Send + Sync {
    async fn find_by_slug(&self, slug: &str) -> Result<Option<Tag>, RepoError>;
}

/// Comment repository.
#[async_trait]
pub trait CommentRepository: BaseRepository<Comment, Uuid> {
    /// Active comments of a post, in creation order.
    async fn active_for_post(&self, post_id: Uuid) -> Result<Vec<Comment>, RepoError>;
}
