//! Dataset aggregate
//!
//! Every store operation reads the whole `Dataset`, changes one entry and
//! writes the whole thing back.

use std::collections::BTreeMap;

use serde::{Deserialize, Deserializer, Serialize};

use super::{Post, User};

/// All users and posts
///
/// Ordered maps keep the encoded file stable between saves.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dataset {
    /// email → user
    #[serde(default, deserialize_with = "null_as_empty")]
    pub users: BTreeMap<String, User>,

    /// post id → post
    #[serde(default, deserialize_with = "null_as_empty")]
    pub posts: BTreeMap<String, Post>,
}

impl Dataset {
    /// Create an empty dataset
    pub fn new() -> Self {
        Self::default()
    }

    /// Posts authored by `user_email` (linear scan)
    pub fn posts_by(&self, user_email: &str) -> Vec<Post> {
        self.posts
            .values()
            .filter(|post| post.user_email == user_email)
            .cloned()
            .collect()
    }

    /// True when there are no users and no posts
    pub fn is_empty(&self) -> bool {
        self.users.is_empty() && self.posts.is_empty()
    }
}

/// `"users": null` decodes to an empty map, same as a missing key
fn null_as_empty<'de, D, V>(deserializer: D) -> Result<BTreeMap<String, V>, D::Error>
where
    D: Deserializer<'de>,
    V: Deserialize<'de>,
{
    Ok(Option::<BTreeMap<String, V>>::deserialize(deserializer)?.unwrap_or_default())
}
