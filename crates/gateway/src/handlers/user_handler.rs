//! User handlers.
//!
//! Each handler forwards to the user-service over gRPC and re-encodes the
//! reply as JSON.

use axum::{
    extract::State,
    response::{Json, Response},
    routing::{get, post},
    Router,
};
use serde::Deserialize;
use utoipa::ToSchema;

use domain::{DeletedUserResponse, UserResponse};

use crate::error_mapping::UserRoute;
use crate::extractors::{JsonBody, UserIdPath};
use crate::state::AppState;

/// User fields accepted by create and update.
///
/// Missing fields decode as empty strings and are rejected by the service.
#[derive(Debug, Deserialize, ToSchema)]
pub struct UserPayload {
    /// Letters and digits, starting with a letter
    #[serde(default)]
    #[schema(example = "Jane")]
    pub name: String,
    /// Email address
    #[serde(default)]
    #[schema(example = "jane@x.co")]
    pub email: String,
}

/// Create user routes
pub fn user_routes() -> Router<AppState> {
    Router::new()
        .route("/users", post(create_user))
        .route(
            "/users/:id",
            get(get_user).put(update_user).delete(delete_user),
        )
}

/// Create a user
#[utoipa::path(
    post,
    path = "/users",
    tag = "Users",
    request_body = UserPayload,
    responses(
        (status = 200, description = "User created", body = UserResponse),
        (status = 400, description = "Malformed JSON body", body = HttpError),
        (status = 500, description = "User service rejected the request", body = HttpError)
    )
)]
pub async fn create_user(
    State(state): State<AppState>,
    JsonBody(payload): JsonBody<UserPayload>,
) -> Result<Json<UserResponse>, Response> {
    state
        .user_client
        .create_user(payload.name, payload.email)
        .await
        .map(Json)
        .map_err(|e| state.error_mapping.respond(UserRoute::Create, e))
}

/// Get a user by ID
#[utoipa::path(
    get,
    path = "/users/{id}",
    tag = "Users",
    params(
        ("id" = String, Path, description = "User ID")
    ),
    responses(
        (status = 200, description = "User record", body = UserResponse),
        (status = 404, description = "User not found or unreadable id", body = HttpError)
    )
)]
pub async fn get_user(
    State(state): State<AppState>,
    UserIdPath(id): UserIdPath,
) -> Result<Json<UserResponse>, Response> {
    state
        .user_client
        .get_user(id)
        .await
        .map(Json)
        .map_err(|e| state.error_mapping.respond(UserRoute::Get, e))
}

/// Update a user's name and email
#[utoipa::path(
    put,
    path = "/users/{id}",
    tag = "Users",
    params(
        ("id" = String, Path, description = "User ID")
    ),
    request_body = UserPayload,
    responses(
        (status = 200, description = "User updated", body = UserResponse),
        (status = 400, description = "Malformed JSON body", body = HttpError),
        (status = 404, description = "User not found or rejected", body = HttpError)
    )
)]
pub async fn update_user(
    State(state): State<AppState>,
    UserIdPath(id): UserIdPath,
    JsonBody(payload): JsonBody<UserPayload>,
) -> Result<Json<UserResponse>, Response> {
    state
        .user_client
        .update_user(id, payload.name, payload.email)
        .await
        .map(Json)
        .map_err(|e| state.error_mapping.respond(UserRoute::Update, e))
}

/// Delete a user
#[utoipa::path(
    delete,
    path = "/users/{id}",
    tag = "Users",
    params(
        ("id" = String, Path, description = "User ID")
    ),
    responses(
        (status = 200, description = "User deleted", body = DeletedUserResponse),
        (status = 404, description = "User not found", body = HttpError)
    )
)]
pub async fn delete_user(
    State(state): State<AppState>,
    UserIdPath(id): UserIdPath,
) -> Result<Json<DeletedUserResponse>, Response> {
    state
        .user_client
        .delete_user(id)
        .await
        .map(Json)
        .map_err(|e| state.error_mapping.respond(UserRoute::Delete, e))
}

/// Error body returned on failure
#[derive(Debug, ToSchema)]
#[allow(dead_code)]
pub struct HttpError {
    /// HTTP status code
    #[schema(example = 404)]
    code: u16,
    /// Human-readable reason
    #[schema(example = "user not found")]
    message: String,
}
