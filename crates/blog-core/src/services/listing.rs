use crate::domain::{Post, Tag};
use crate::error::RepoError;
use crate::pagination::{POSTS_PER_PAGE, Page, Paginator};
use crate::ports::PostRepository;

/// Fetch one page of published posts, optionally restricted to `tag`.
///
/// `raw_page` is the untrusted `page` query parameter; see
/// [`Paginator::resolve`] for how it is normalised.
pub async fn published_page(
    posts: &dyn PostRepository,
    tag: Option<&Tag>,
    raw_page: Option<&str>,
) -> Result<Page<Post>, RepoError> {
    let count = posts.count_published(tag).await?;
    let paginator = Paginator::new(count, POSTS_PER_PAGE);
    let number = paginator.resolve(raw_page);

    tracing::debug!(
        count,
        page = number,
        num_pages = paginator.num_pages(),
        tag = tag.map(|t| t.slug.as_str()),
        "Listing published posts"
    );

    let items = posts
        .list_published(tag, paginator.offset(number), paginator.per_page())
        .await?;

    Ok(paginator.page(number, items))
}
