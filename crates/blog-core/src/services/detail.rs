use chrono::NaiveDate;

use crate::domain::{Comment, Post, SIMILAR_POSTS_LIMIT};
use crate::error::DomainError;
use crate::ports::{CommentRepository, PostRepository};

/// Everything the detail page shows besides the comment form.
#[derive(Debug, Clone)]
pub struct PostDetail {
    pub post: Post,
    pub comments: Vec<Comment>,
    pub similar_posts: Vec<Post>,
}

/// Load a published post by publish date and slug, with its active comments
/// and similar posts.
pub async fn post_detail(
    posts: &dyn PostRepository,
    comments: &dyn CommentRepository,
    year: i32,
    month: u32,
    day: u32,
    slug: &str,
) -> Result<PostDetail, DomainError> {
    let key = format!("{year}/{month}/{day}/{slug}");
    let date = NaiveDate::from_ymd_opt(year, month, day)
        .ok_or_else(|| DomainError::not_found("Post", &key))?;

    let post = posts
        .find_published_on(date, slug)
        .await?
        .ok_or_else(|| DomainError::not_found("Post", &key))?;

    let active = comments.active_for_post(post.id).await?;
    let similar_posts = posts.similar_to(&post, SIMILAR_POSTS_LIMIT).await?;

    Ok(PostDetail {
        post,
        comments: active,
        similar_posts,
    })
}
