//! Domain entities - the core business objects.

mod comment;
mod post;
mod similar;
mod tag;

pub use comment::Comment;
pub use post::{Post, PostStatus};
pub use similar::{SIMILAR_POSTS_LIMIT, rank_similar};
pub use tag::{Tag, slugify};
