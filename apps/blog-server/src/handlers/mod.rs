//! HTTP handlers and route configuration.

mod comments;
mod health;
mod posts;
mod share;
mod views;

#[cfg(test)]
mod tests;

use actix_web::web;
use uuid::Uuid;
use validator::Validate;

use blog_core::domain::Post;
use blog_shared::{BoundForm, FormFields};

use crate::middleware::error::{AppError, AppResult};
use crate::state::AppState;

/// Configure all application routes.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/health", web::get().to(health::health_check))
        .route("/", web::get().to(posts::post_list))
        .route("/tag/{tag_slug}/", web::get().to(posts::post_list_by_tag))
        .route(
            "/{year}/{month}/{day}/{slug}/",
            web::get().to(posts::post_detail),
        )
        .service(
            web::resource("/{post_id}/share/")
                .route(web::get().to(share::share_form))
                .route(web::post().to(share::share_submit)),
        )
        .service(
            web::resource("/{post_id}/comment/")
                .route(web::post().to(comments::post_comment))
                .default_service(web::to(comments::method_not_allowed)),
        );
}

/// Load a published post by id or fail with 404.
async fn published_post(state: &AppState, post_id: Uuid) -> AppResult<Post> {
    state
        .posts
        .find_published(post_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Post {post_id}")))
}

/// A submitted url-encoded body as raw pairs, or the reason it was unreadable.
type Submission = Result<web::Form<Vec<(String, String)>>, actix_web::Error>;

/// Bind a submission to form `T`. A body that is missing or not url-encoded
/// binds as an empty form, so it is reported through field errors.
fn bind_submission<T>(submission: Submission) -> BoundForm<T>
where
    T: Validate + FormFields + Default,
{
    let fields = match submission {
        Ok(form) => form.into_inner(),
        Err(e) => {
            tracing::debug!(error = %e, "Unreadable form body, binding empty form");
            Vec::new()
        }
    };

    BoundForm::bind_fields(fields)
}
