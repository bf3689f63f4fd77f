use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Comment left by a reader on a post.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Comment {
    pub id: Uuid,
    pub post_id: Uuid,
    pub name: String,
    pub email: String,
    pub body: String,
    /// Moderation flag; inactive comments are never displayed.
    pub active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Comment {
    /// Create a new comment on a post. Comments start out active.
    pub fn new(
        post_id: Uuid,
        name: impl Into<String>,
        email: impl Into<String>,
        body: impl Into<String>,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            post_id,
            name: name.into(),
            email: email.into(),
            body: body.into(),
            active: true,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn deactivated(mut self) -> Self {
        self.active = false;
        self
    }
}
