//! User entity

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A registered user
///
/// The password is stored exactly as supplied. Nothing hashes it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// Set once at creation, preserved across updates
    pub created_at: DateTime<Utc>,
    pub email: String,
    pub password: String,
    pub name: String,
    pub age: i64,
}

impl User {
    /// Create a user stamped with the current UTC time
    pub fn new(
        email: impl Into<String>,
        password: impl Into<String>,
        name: impl Into<String>,
        age: i64,
    ) -> Self {
        Self {
            created_at: Utc::now(),
            email: email.into(),
            password: password.into(),
            name: name.into(),
            age,
        }
    }

    /// Replace every mutable field, keeping `created_at`
    pub fn apply_update(&mut self, password: String, name: String, age: i64) {
        self.password = password;
        self.name = name;
        self.age = age;
    }
}
