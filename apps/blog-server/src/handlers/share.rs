//! Share-a-post-by-email form.

use actix_web::{HttpRequest, HttpResponse, web};
use tera::Context;
use uuid::Uuid;

use blog_core::domain::Post;
use blog_core::services::{ShareRequest, send_share_post_email};
use blog_shared::{BoundForm, EmailPostForm};

use super::{Submission, bind_submission, published_post};
use super::views::PostView;
use crate::middleware::error::AppResult;
use crate::state::AppState;
use crate::templates::render;

/// GET /{post_id}/share/
pub async fn share_form(
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
) -> AppResult<HttpResponse> {
    let post = published_post(&state, path.into_inner()).await?;

    render_share(&state, post, &BoundForm::<EmailPostForm>::unbound(), false)
}

/// POST /{post_id}/share/
pub async fn share_submit(
    req: HttpRequest,
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
    submission: Submission,
) -> AppResult<HttpResponse> {
    let post = published_post(&state, path.into_inner()).await?;
    let form: BoundForm<EmailPostForm> = bind_submission(submission);

    let sent = if form.is_valid() {
        let url = absolute_url(&req, &post.absolute_path());
        let request = ShareRequest {
            name: form.data.name.clone(),
            email: form.data.email.clone(),
            to: form.data.to.clone(),
            comments: Some(form.data.comments.clone()).filter(|c| !c.is_empty()),
        };

        send_share_post_email(state.mailer.as_ref(), &state.sender, &request, &url, &post).await
    } else {
        tracing::debug!(post_id = %post.id, fields = ?form.errors.keys().collect::<Vec<_>>(), "Share form rejected");
        false
    };

    render_share(&state, post, &form, sent)
}

fn render_share(
    state: &AppState,
    post: Post,
    form: &BoundForm<EmailPostForm>,
    sent: bool,
) -> AppResult<HttpResponse> {
    let mut ctx = Context::new();
    ctx.insert("post", &PostView::from(post));
    ctx.insert("form", form);
    ctx.insert("sent", &sent);

    render(&state.templates, "blog/post/share.html", &ctx)
}

/// Absolute URL for `path` on the host that served `req`.
fn absolute_url(req: &HttpRequest, path: &str) -> String {
    let info = req.connection_info();
    format!("{}://{}{}", info.scheme(), info.host(), path)
}
