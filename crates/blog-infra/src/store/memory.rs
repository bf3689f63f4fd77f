//! In-memory blog store - used as fallback when no database is configured.

use async_trait::async_trait;
use chrono::NaiveDate;
use tokio::sync::RwLock;
use uuid::Uuid;

use blog_core::domain::{Comment, Post, Tag, rank_similar};
use blog_core::error::RepoError;
use blog_core::ports::{BaseRepository, CommentRepository, PostRepository, TagRepository};

/// Posts, tags and comments held in process memory.
///
/// Implements every repository port, so one instance can back the whole
/// application. Note: Data is lost on process restart.
pub struct InMemoryBlogStore {
    posts: RwLock<Vec<Post>>,
    tags: RwLock<Vec<Tag>>,
    comments: RwLock<Vec<Comment>>,
}

impl InMemoryBlogStore {
    pub fn new() -> Self {
        Self {
            posts: RwLock::new(Vec::new()),
            tags: RwLock::new(Vec::new()),
            comments: RwLock::new(Vec::new()),
        }
    }

    /// Store a post (any status) and register its tags.
    pub async fn add_post(&self, post: Post) {
        {
            let mut tags = self.tags.write().await;
            for tag in &post.tags {
                if !tags.iter().any(|t| t.id == tag.id) {
                    tags.push(tag.clone());
                }
            }
        }
        self.posts.write().await.push(post);
    }

    /// Store a comment as-is, including inactive ones.
    pub async fn add_comment(&self, comment: Comment) {
        self.comments.write().await.push(comment);
    }

    /// Every stored comment, active or not.
    pub async fn all_comments(&self) -> Vec<Comment> {
        self.comments.read().await.clone()
    }

    /// Published posts, optionally with `tag`, newest first.
    async fn published(&self, tag: Option<&Tag>) -> Vec<Post> {
        let posts = self.posts.read().await;
        let mut published: Vec<Post> = posts
            .iter()
            .filter(|p| p.is_published())
            .filter(|p| tag.is_none_or(|tag| p.tags.iter().any(|t| t.id == tag.id)))
            .cloned()
            .collect();

        published.sort_by(|a, b| b.publish.cmp(&a.publish));
        published
    }
}

impl Default for InMemoryBlogStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PostRepository for InMemoryBlogStore {
    async fn count_published(&self, tag: Option<&Tag>) -> Result<u64, RepoError> {
        Ok(self.published(tag).await.len() as u64)
    }

    async fn list_published(
        &self,
        tag: Option<&Tag>,
        offset: u64,
        limit: u64,
    ) -> Result<Vec<Post>, RepoError> {
        let skip = usize::try_from(offset).unwrap_or(usize::MAX);
        let take = usize::try_from(limit).unwrap_or(usize::MAX);

        Ok(self.published(tag).await.into_iter().skip(skip).take(take).collect())
    }

    async fn find_published(&self, id: Uuid) -> Result<Option<Post>, RepoError> {
        Ok(self.published(None).await.into_iter().find(|p| p.id == id))
    }

    async fn find_published_on(
        &self,
        date: NaiveDate,
        slug: &str,
    ) -> Result<Option<Post>, RepoError> {
        Ok(self
            .published(None)
            .await
            .into_iter()
            .find(|p| p.slug == slug && p.publish_date() == date))
    }

    async fn similar_to(&self, post: &Post, limit: u64) -> Result<Vec<Post>, RepoError> {
        Ok(rank_similar(post, self.published(None).await, limit))
    }
}

#[async_trait]
impl TagRepository for InMemoryBlogStore {
    async fn find_by_slug(&self, slug: &str) -> Result<Option<Tag>, RepoError> {
        let tags = self.tags.read().await;
        Ok(tags.iter().find(|t| t.slug == slug).cloned())
    }
}

#[async_trait]
impl BaseRepository<Comment, Uuid> for InMemoryBlogStore {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Comment>, RepoError> {
        let comments = self.comments.read().await;
        Ok(comments.iter().find(|c| c.id == id).cloned())
    }

    async fn insert(&self, comment: Comment) -> Result<Comment, RepoError> {
        let mut comments = self.comments.write().await;
        if comments.iter().any(|c| c.id == comment.id) {
            return Err(RepoError::Constraint("Entity already exists".to_string()));
        }
        comments.push(comment.clone());
        Ok(comment)
    }
}

#[async_trait]
impl CommentRepository for InMemoryBlogStore {
    async fn active_for_post(&self, post_id: Uuid) -> Result<Vec<Comment>, RepoError> {
        let comments = self.comments.read().await;
        Ok(comments
            .iter()
            .filter(|c| c.post_id == post_id && c.active)
            .cloned()
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone, Utc};

    fn post(title: &str, day: u32, tags: &[&Tag]) -> Post {
        let at = Utc.with_ymd_and_hms(2024, 2, day, 10, 0, 0).unwrap();
        Post::new(Uuid::new_v4(), "ada", title, title.to_lowercase(), "...")
            .publish_at(at)
            .with_tags(tags.iter().map(|t| (*t).clone()).collect())
    }

    #[tokio::test]
    async fn test_listing_hides_drafts_and_orders_newest_first() {
        let store = InMemoryBlogStore::new();
        store.add_post(post("Old", 1, &[])).await;
        store.add_post(post("New", 3, &[])).await;
        store
            .add_post(Post::new(Uuid::new_v4(), "ada", "Draft", "draft", "..."))
            .await;

        assert_eq!(store.count_published(None).await.unwrap(), 2);
        let titles: Vec<String> = store
            .list_published(None, 0, 10)
            .await
            .unwrap()
            .into_iter()
            .map(|p| p.title)
            .collect();
        assert_eq!(titles, ["New", "Old"]);
    }

    #[tokio::test]
    async fn test_tag_filter_and_lookup() {
        let rust = Tag::new("Rust");
        let store = InMemoryBlogStore::new();
        store.add_post(post("Tagged", 1, &[&rust])).await;
        store.add_post(post("Plain", 2, &[])).await;

        let tag = store.find_by_slug("rust").await.unwrap().unwrap();
        assert_eq!(tag.id, rust.id);
        assert_eq!(store.count_published(Some(&tag)).await.unwrap(), 1);
        assert!(store.find_by_slug("missing").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_find_published_on_matches_date_and_slug() {
        let store = InMemoryBlogStore::new();
        let target = post("Target", 5, &[]);
        store.add_post(target.clone()).await;

        let day = NaiveDate::from_ymd_opt(2024, 2, 5).unwrap();
        let found = store.find_published_on(day, "target").await.unwrap();
        assert_eq!(found.map(|p| p.id), Some(target.id));

        let wrong_day = day + Duration::days(1);
        assert!(store.find_published_on(wrong_day, "target").await.unwrap().is_none());
        assert!(store.find_published_on(day, "other").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_comments_only_active_are_listed() {
        let store = InMemoryBlogStore::new();
        let post_id = Uuid::new_v4();

        let visible = store
            .insert(Comment::new(post_id, "a", "a@example.com", "hi"))
            .await
            .unwrap();
        store
            .add_comment(Comment::new(post_id, "b", "b@example.com", "spam").deactivated())
            .await;

        let active = store.active_for_post(post_id).await.unwrap();
        assert_eq!(active.len(), 1);
        assert_eq!(active[0].id, visible.id);
        assert!(store.find_by_id(visible.id).await.unwrap().is_some());
        assert_eq!(store.all_comments().await.len(), 2);
    }
}
