//! OpenAPI documentation.

use utoipa::OpenApi;

use crate::handlers::user_handler::{HttpError, UserPayload};
use domain::{DeletedUserResponse, UserResponse};

/// API documentation struct.
#[derive(OpenApi)]
#[openapi(
    paths(
        crate::handlers::user_handler::create_user,
        crate::handlers::user_handler::get_user,
        crate::handlers::user_handler::update_user,
        crate::handlers::user_handler::delete_user,
    ),
    components(
        schemas(
            UserPayload,
            UserResponse,
            DeletedUserResponse,
            HttpError,
        )
    ),
    tags(
        (name = "Users", description = "User CRUD endpoints"),
    )
)]
pub struct ApiDoc;
