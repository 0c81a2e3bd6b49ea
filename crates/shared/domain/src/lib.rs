//! Domain layer - Core business entities and value objects.
//!
//! This crate contains pure domain logic with no infrastructure dependencies.
//! The user record and its validation rules are shared by the user-service
//! and the gateway.

pub mod constants;
pub mod error;
pub mod user;
pub mod validation;

pub use constants::*;
pub use error::{DomainError, DomainResult};
pub use user::{parse_user_id, DeletedUserResponse, User, UserId, UserResponse};
pub use validation::{validate_email, validate_name, validate_user_fields};
