//! User id path extractor with the gateway's error shape.

use axum::{
    async_trait,
    extract::{FromRequestParts, Path},
    http::{request::Parts, Method},
    response::Response,
};

use common::AppError;

use crate::error_mapping::UserRoute;
use crate::state::AppState;

/// The `{id}` segment of a `/users/{id}` route.
///
/// An unreadable segment is answered like any other failure on that route.
pub struct UserIdPath(pub String);

#[async_trait]
impl FromRequestParts<AppState> for UserIdPath {
    type Rejection = Response;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let route = match parts.method {
            Method::PUT => UserRoute::Update,
            Method::DELETE => UserRoute::Delete,
            _ => UserRoute::Get,
        };

        let Path(id) = Path::<String>::from_request_parts(parts, state)
            .await
            .map_err(|e| {
                state
                    .error_mapping
                    .respond(route, AppError::bad_request(e.body_text()))
            })?;

        Ok(UserIdPath(id))
    }
}
