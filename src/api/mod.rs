//! API Module
//!
//! HTTP routes over the document store.
//!
//! ## Routes
//! ```text
//! /users   GET ?email=       → user
//!          POST {user}       → 201 user (insert or overwrite)
//!          PUT  {user}       → user
//!          DELETE ?email=    → {}        (400 if email is empty)
//! /posts   GET ?userEmail=   → [post]
//!          POST {userEmail, text} → 201 post
//!          DELETE ?id=       → {}        (400 if id is empty)
//! /ping    GET               → {"status":"ok"}
//! ```
//!
//! ## Errors
//! `{"error": "<message>"}` with 404 for a missing user, 405 for an
//! unsupported method, 400 for everything else the client or the store
//! got wrong.

mod handlers;
mod request;
mod response;

use std::sync::Arc;
use std::time::Duration;

use axum::routing::get;
use axum::Router;

use crate::store::DocumentStore;

pub use request::{EmailQuery, IdQuery, PostBody, UserBody, UserEmailQuery};
pub use response::{ApiError, ErrorBody};

/// State shared by all handlers
#[derive(Clone)]
pub struct AppState {
    /// The document store
    pub store: Arc<DocumentStore>,

    /// Upper bound on one store call
    pub request_timeout: Duration,
}

impl AppState {
    /// Build state from a store, taking the timeout from its config
    pub fn new(store: Arc<DocumentStore>) -> Self {
        let request_timeout = store.config().request_timeout();
        Self {
            store,
            request_timeout,
        }
    }
}

/// Build the router for the users/posts service
pub fn router(store: Arc<DocumentStore>) -> Router {
    let state = AppState::new(store);

    Router::new()
        .route(
            "/users",
            get(handlers::get_user)
                .post(handlers::create_user)
                .put(handlers::update_user)
                .delete(handlers::delete_user)
                .fallback(handlers::method_not_allowed),
        )
        .route(
            "/posts",
            get(handlers::get_posts)
                .post(handlers::create_post)
                .delete(handlers::delete_post)
                .fallback(handlers::method_not_allowed),
        )
        .route(
            "/ping",
            get(handlers::ping).fallback(handlers::method_not_allowed),
        )
        .fallback(handlers::route_not_found)
        .with_state(state)
}
