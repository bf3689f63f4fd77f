//! Comment submission.

use actix_web::{HttpResponse, web};
use tera::Context;
use uuid::Uuid;

use blog_core::domain::Comment;
use blog_shared::{BoundForm, CommentForm};

use super::{Submission, bind_submission, published_post};
use super::views::PostView;
use crate::middleware::error::{AppError, AppResult};
use crate::state::AppState;
use crate::templates::render;

/// POST /{post_id}/comment/
pub async fn post_comment(
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
    submission: Submission,
) -> AppResult<HttpResponse> {
    let post = published_post(&state, path.into_inner()).await?;
    let form: BoundForm<CommentForm> = bind_submission(submission);

    let comment = if form.is_valid() {
        let comment = Comment::new(
            post.id,
            form.data.name.clone(),
            form.data.email.clone(),
            form.data.body.clone(),
        );
        let saved = state.comments.insert(comment).await?;
        tracing::info!(post_id = %post.id, comment_id = %saved.id, "Comment added");
        Some(saved)
    } else {
        tracing::debug!(post_id = %post.id, "Comment form rejected");
        None
    };

    let mut ctx = Context::new();
    ctx.insert("post", &PostView::from(post));
    ctx.insert("form", &form);
    ctx.insert("comment", &comment);

    render(&state.templates, "blog/post/comment.html", &ctx)
}

/// Any other method on the comment endpoint.
pub async fn method_not_allowed() -> AppResult<HttpResponse> {
    Err(AppError::MethodNotAllowed)
}
