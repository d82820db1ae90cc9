//! Route handlers
//!
//! Each handler decodes its parameters, makes one store call on the
//! blocking pool, and encodes the result as JSON.

use std::sync::Arc;

use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{Query, State};
use axum::http::{Method, StatusCode, Uri};
use axum::response::IntoResponse;
use axum::Json;
use serde_json::json;

use crate::error::{ChirpError, Result};
use crate::model::{Post, User};
use crate::store::DocumentStore;

use super::request::{EmailQuery, IdQuery, PostBody, UserBody, UserEmailQuery};
use super::response::ApiError;
use super::AppState;

type ApiResult<T> = std::result::Result<T, ApiError>;

// =============================================================================
// Users
// =============================================================================

/// `GET /users?email=`
pub async fn get_user(
    State(state): State<AppState>,
    query: std::result::Result<Query<EmailQuery>, QueryRejection>,
) -> ApiResult<Json<User>> {
    let Query(EmailQuery { email }) = query?;

    let user = run_blocking(&state, move |store| store.get_user(&email)).await?;
    Ok(Json(user))
}

/// `POST /users`
pub async fn create_user(
    State(state): State<AppState>,
    body: std::result::Result<Json<UserBody>, JsonRejection>,
) -> ApiResult<impl IntoResponse> {
    let Json(body) = body?;

    let user = run_blocking(&state, move |store| {
        store.create_user(&body.email, &body.password, &body.name, body.age)
    })
    .await?;

    Ok((StatusCode::CREATED, Json(user)))
}

/// `PUT /users`
pub async fn update_user(
    State(state): State<AppState>,
    body: std::result::Result<Json<UserBody>, JsonRejection>,
) -> ApiResult<Json<User>> {
    let Json(body) = body?;

    let user = run_blocking(&state, move |store| {
        store.update_user(&body.email, &body.password, &body.name, body.age)
    })
    .await?;

    Ok(Json(user))
}

/// `DELETE /users?email=`
pub async fn delete_user(
    State(state): State<AppState>,
    query: std::result::Result<Query<EmailQuery>, QueryRejection>,
) -> ApiResult<impl IntoResponse> {
    let Query(EmailQuery { email }) = query?;
    if email.is_empty() {
        return Err(ChirpError::InvalidRequest("email is required".to_string()).into());
    }

    run_blocking(&state, move |store| store.delete_user(&email)).await?;
    Ok(Json(json!({})))
}

// =============================================================================
// Posts
// =============================================================================

/// `GET /posts?userEmail=`
pub async fn get_posts(
    State(state): State<AppState>,
    query: std::result::Result<Query<UserEmailQuery>, QueryRejection>,
) -> ApiResult<Json<Vec<Post>>> {
    let Query(UserEmailQuery { user_email }) = query?;

    let posts = run_blocking(&state, move |store| store.get_posts(&user_email)).await?;
    Ok(Json(posts))
}

/// `POST /posts`
pub async fn create_post(
    State(state): State<AppState>,
    body: std::result::Result<Json<PostBody>, JsonRejection>,
) -> ApiResult<impl IntoResponse> {
    let Json(body) = body?;

    let post = run_blocking(&state, move |store| {
        store.create_post(&body.user_email, &body.text)
    })
    .await?;

    Ok((StatusCode::CREATED, Json(post)))
}

/// `DELETE /posts?id=`
pub async fn delete_post(
    State(state): State<AppState>,
    query: std::result::Result<Query<IdQuery>, QueryRejection>,
) -> ApiResult<impl IntoResponse> {
    let Query(IdQuery { id }) = query?;
    if id.is_empty() {
        return Err(ChirpError::InvalidRequest("id is required".to_string()).into());
    }

    run_blocking(&state, move |store| store.delete_post(&id)).await?;
    Ok(Json(json!({})))
}

// =============================================================================
// Misc
// =============================================================================

/// `GET /ping`
pub async fn ping() -> impl IntoResponse {
    Json(json!({ "status": "ok" }))
}

/// Any method a route does not serve
pub async fn method_not_allowed(method: Method) -> ApiError {
    ApiError::method_not_allowed(&method)
}

/// Any path without a route
pub async fn route_not_found(uri: Uri) -> ApiError {
    ApiError::route_not_found(uri.path())
}

// =============================================================================
// Helpers
// =============================================================================

/// Run a store call on the blocking pool, bounded by the request timeout
///
/// A timed-out call keeps running to completion on its thread; only the
/// response is abandoned.
async fn run_blocking<T, F>(state: &AppState, op: F) -> ApiResult<T>
where
    F: FnOnce(&DocumentStore) -> Result<T> + Send + 'static,
    T: Send + 'static,
{
    let store = Arc::clone(&state.store);
    let task = tokio::task::spawn_blocking(move || op(store.as_ref()));

    match tokio::time::timeout(state.request_timeout, task).await {
        Ok(Ok(result)) => result.map_err(ApiError::from),
        Ok(Err(join_error)) => Err(ApiError::internal(format!(
            "store task failed: {}",
            join_error
        ))),
        Err(_) => Err(ApiError::timeout()),
    }
}
