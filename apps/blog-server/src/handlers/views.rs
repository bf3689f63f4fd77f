//! Template-facing view models.

use serde::Serialize;

use blog_core::domain::Post;

/// A post plus its canonical URL.
#[derive(Debug, Serialize)]
pub struct PostView {
    #[serde(flatten)]
    pub post: Post,
    pub url: String,
}

impl From<Post> for PostView {
    fn from(post: Post) -> Self {
        let url = post.absolute_path();
        Self { post, url }
    }
}
