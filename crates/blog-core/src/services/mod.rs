//! Use cases built on top of the ports.

mod detail;
mod listing;
mod share;

pub use detail::{PostDetail, post_detail};
pub use listing::published_page;
pub use share::{ShareRequest, compose_share_mail, send_share_post_email};
