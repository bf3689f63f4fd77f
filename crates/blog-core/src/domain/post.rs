use chrono::{DateTime, Datelike, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::Tag;

/// Publication status of a post.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PostStatus {
    Draft,
    Published,
}

/// Post entity - a blog post written by an author.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Post {
    pub id: Uuid,
    pub title: String,
    pub slug: String,
    pub body: String,
    pub author_id: Uuid,
    /// Display name of the author.
    pub author: String,
    pub publish: DateTime<Utc>,
    pub status: PostStatus,
    pub tags: Vec<Tag>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Post {
    /// Create a new draft post. The publish timestamp defaults to now.
    pub fn new(
        author_id: Uuid,
        author: impl Into<String>,
        title: impl Into<String>,
        slug: impl Into<String>,
        body: impl Into<String>,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            title: title.into(),
            slug: slug.into(),
            body: body.into(),
            author_id,
            author: author.into(),
            publish: now,
            status: PostStatus::Draft,
            tags: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Mark the post as published at the given instant.
    pub fn publish_at(mut self, at: DateTime<Utc>) -> Self {
        self.publish = at;
        self.status = PostStatus::Published;
        self.updated_at = Utc::now();
        self
    }

    pub fn with_tags(mut self, tags: Vec<Tag>) -> Self {
        self.tags = tags;
        self
    }

    pub fn is_published(&self) -> bool {
        self.status == PostStatus::Published
    }

    /// Calendar day (UTC) the post is published on.
    pub fn publish_date(&self) -> NaiveDate {
        self.publish.date_naive()
    }

    /// Canonical path of the post, e.g. `/2024/3/9/my-post/`.
    pub fn absolute_path(&self) -> String {
        format!(
            "/{}/{}/{}/{}/",
            self.publish.year(),
            self.publish.month(),
            self.publish.day(),
            self.slug
        )
    }

    /// Number of tags this post has in common with `other`.
    pub fn shared_tag_count(&self, other: &Post) -> usize {
        self.tags
            .iter()
            .filter(|tag| other.tags.iter().any(|t| t.id == tag.id))
            .count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn sample() -> Post {
        Post::new(Uuid::new_v4(), "ada", "Hello", "hello", "Body")
    }

    #[test]
    fn new_posts_are_drafts() {
        let post = sample();
        assert_eq!(post.status, PostStatus::Draft);
        assert!(!post.is_published());
    }

    #[test]
    fn absolute_path_uses_unpadded_date_parts() {
        let at = Utc.with_ymd_and_hms(2024, 3, 9, 23, 15, 0).unwrap();
        let post = sample().publish_at(at);

        assert!(post.is_published());
        assert_eq!(post.absolute_path(), "/2024/3/9/hello/");
        assert_eq!(post.publish_date(), NaiveDate::from_ymd_opt(2024, 3, 9).unwrap());
    }

    #[test]
    fn shared_tag_count_compares_by_id() {
        let rust = Tag::new("Rust");
        let web = Tag::new("Web");
        let a = sample().with_tags(vec![rust, web.clone()]);
        let b = sample().with_tags(vec![web, Tag::new("Rust")]);

        assert_eq!(a.shared_tag_count(&b), 1);
        assert_eq!(a.shared_tag_count(&a), 2);
    }
}
