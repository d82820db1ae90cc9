//! Post entity

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A post written by a user. Posts are never edited.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    /// Random v4 UUID, hyphenated
    pub id: String,
    pub created_at: DateTime<Utc>,
    /// Email of the author at creation time
    pub user_email: String,
    pub text: String,
}

impl Post {
    /// Create a post with a fresh id and the current UTC time
    pub fn new(user_email: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            created_at: Utc::now(),
            user_email: user_email.into(),
            text: text.into(),
        }
    }
}
