//! # Blog Shared
//!
//! Form types shared between the HTTP layer and the templates.

pub mod forms;

pub use forms::{BoundForm, CommentForm, EmailPostForm, FormErrors, FormFields};
