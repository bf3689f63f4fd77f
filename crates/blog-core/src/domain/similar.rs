//! Similar-post ranking.

use std::cmp::Reverse;

use super::Post;

/// Maximum number of similar posts shown next to a post.
pub const SIMILAR_POSTS_LIMIT: u64 = 4;

/// Rank `candidates` by similarity to `source`.
///
/// Only published posts sharing at least one tag with `source` are kept, and
/// `source` itself is excluded. Ordering is shared-tag count descending, then
/// publish date descending. At most `limit` posts are returned.
pub fn rank_similar<I>(source: &Post, candidates: I, limit: u64) -> Vec<Post>
where
    I: IntoIterator<Item = Post>,
{
    let mut scored: Vec<(usize, Post)> = candidates
        .into_iter()
        .filter(|candidate| candidate.id != source.id && candidate.is_published())
        .map(|candidate| (source.shared_tag_count(&candidate), candidate))
        .filter(|(shared, _)| *shared > 0)
        .collect();

    scored.sort_by_key(|(shared, post)| (Reverse(*shared), Reverse(post.publish)));

    scored
        .into_iter()
        .take(usize::try_from(limit).unwrap_or(usize::MAX))
        .map(|(_, post)| post)
        .collect()
}
