//! Translation of RPC failures into HTTP statuses.
//!
//! `Compat` reproduces the historical behaviour of the HTTP API: any failure
//! of `POST /users` is a 500 and any failure of the `/users/{id}` routes is a
//! 404, whatever the underlying cause. `Strict` maps by error kind on every
//! route. Malformed JSON bodies are rejected with 400 before any RPC in both
//! modes.

use std::fmt;
use std::str::FromStr;

use axum::{http::StatusCode, response::Response};
use tracing::{error, warn};

use common::AppError;

/// Policy for mapping RPC failures to HTTP statuses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ErrorMapping {
    #[default]
    Compat,
    Strict,
}

/// The user routes, as far as error mapping is concerned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UserRoute {
    Create,
    Get,
    Update,
    Delete,
}

impl ErrorMapping {
    /// HTTP status for an RPC failure on `route`.
    pub fn status_for(self, route: UserRoute, err: &AppError) -> StatusCode {
        match self {
            ErrorMapping::Strict => err.status(),
            ErrorMapping::Compat => match route {
                UserRoute::Create => StatusCode::INTERNAL_SERVER_ERROR,
                UserRoute::Get | UserRoute::Update | UserRoute::Delete => StatusCode::NOT_FOUND,
            },
        }
    }

    /// Render an RPC failure on `route` as a response.
    ///
    /// This is the only place a gateway failure is logged.
    pub fn respond(self, route: UserRoute, err: AppError) -> Response {
        let status = self.status_for(route, &err);
        if err.is_internal() {
            error!(
                ?route,
                code = err.code(),
                status = status.as_u16(),
                "User service call failed: {}",
                err
            );
        } else {
            warn!(
                ?route,
                code = err.code(),
                status = status.as_u16(),
                "User service call failed: {}",
                err
            );
        }
        err.into_response_with(status)
    }
}

impl FromStr for ErrorMapping {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "compat" => Ok(ErrorMapping::Compat),
            "strict" => Ok(ErrorMapping::Strict),
            other => Err(format!("unknown error mapping '{}'", other)),
        }
    }
}

impl fmt::Display for ErrorMapping {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorMapping::Compat => write!(f, "compat"),
            ErrorMapping::Strict => write!(f, "strict"),
        }
    }
}
