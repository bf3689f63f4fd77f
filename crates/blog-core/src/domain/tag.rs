use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Tag attached to posts (many-to-many).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tag {
    pub id: Uuid,
    pub name: String,
    pub slug: String,
}

impl Tag {
    /// Create a tag whose slug is derived from its name.
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            id: Uuid::new_v4(),
            slug: slugify(&name),
            name,
        }
    }
}

/// Lowercase ASCII slug: alphanumerics are kept, every other run becomes `-`.
pub fn slugify(input: &str) -> String {
    let mut slug = String::with_capacity(input.len());
    let mut pending_dash = false;

    for ch in input.chars() {
        if ch.is_ascii_alphanumeric() {
            if pending_dash && !slug.is_empty() {
                slug.push('-');
            }
            pending_dash = false;
            slug.push(ch.to_ascii_lowercase());
        } else {
            pending_dash = true;
        }
    }

    slug
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slugify_collapses_separators() {
        assert_eq!(slugify("Rust & Web  Dev"), "rust-web-dev");
        assert_eq!(slugify("  --Leading"), "leading");
        assert_eq!(slugify("trailing!!"), "trailing");
    }

    #[test]
    fn tag_slug_follows_name() {
        let tag = Tag::new("Music Theory");
        assert_eq!(tag.slug, "music-theory");
        assert_eq!(tag.name, "Music Theory");
    }
}
