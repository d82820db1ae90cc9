//! Request definitions
//!
//! Query strings and JSON bodies accepted by the HTTP routes. Every field
//! defaults when absent, so `{}` decodes to empty strings and a zero age.

use serde::Deserialize;

/// Body of `POST /users` and `PUT /users`
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct UserBody {
    pub email: String,
    pub password: String,
    pub name: String,
    pub age: i64,
}

/// Body of `POST /posts`
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PostBody {
    pub user_email: String,
    pub text: String,
}

/// `?email=` on `/users`
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct EmailQuery {
    pub email: String,
}

/// `?userEmail=` on `GET /posts`
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct UserEmailQuery {
    pub user_email: String,
}

/// `?id=` on `DELETE /posts`
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct IdQuery {
    pub id: String,
}
