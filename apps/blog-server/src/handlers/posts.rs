//! Post listing and detail pages.

use actix_web::{HttpResponse, web};
use serde::Deserialize;
use tera::Context;

use blog_core::domain::Tag;
use blog_core::services;
use blog_shared::{BoundForm, CommentForm};

use super::views::PostView;
use crate::middleware::error::{AppError, AppResult};
use crate::state::AppState;
use crate::templates::render;

/// Query string of the listing pages.
#[derive(Debug, Deserialize)]
pub struct ListQuery {
    pub page: Option<String>,
}

/// GET /
pub async fn post_list(
    state: web::Data<AppState>,
    query: web::Query<ListQuery>,
) -> AppResult<HttpResponse> {
    list(&state, None, query.page.as_deref()).await
}

/// GET /tag/{tag_slug}/
pub async fn post_list_by_tag(
    state: web::Data<AppState>,
    path: web::Path<String>,
    query: web::Query<ListQuery>,
) -> AppResult<HttpResponse> {
    let slug = path.into_inner();
    let tag = state
        .tags
        .find_by_slug(&slug)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Tag '{slug}'")))?;

    list(&state, Some(tag), query.page.as_deref()).await
}

async fn list(state: &AppState, tag: Option<Tag>, raw_page: Option<&str>) -> AppResult<HttpResponse> {
    let page = services::published_page(state.posts.as_ref(), tag.as_ref(), raw_page).await?;

    let mut ctx = Context::new();
    ctx.insert("posts", &page.map(PostView::from));
    ctx.insert("tag", &tag);

    render(&state.templates, "blog/post/list.html", &ctx)
}

/// GET /{year}/{month}/{day}/{slug}/
pub async fn post_detail(
    state: web::Data<AppState>,
    path: web::Path<(i32, u32, u32, String)>,
) -> AppResult<HttpResponse> {
    let (year, month, day, slug) = path.into_inner();

    let detail = services::post_detail(
        state.posts.as_ref(),
        state.comments.as_ref(),
        year,
        month,
        day,
        &slug,
    )
    .await?;

    let similar_posts: Vec<PostView> = detail.similar_posts.into_iter().map(PostView::from).collect();

    let mut ctx = Context::new();
    ctx.insert("post", &PostView::from(detail.post));
    ctx.insert("comments", &detail.comments);
    ctx.insert("form", &BoundForm::<CommentForm>::unbound());
    ctx.insert("similar_posts", &similar_posts);

    render(&state.templates, "blog/post/detail.html", &ctx)
}
