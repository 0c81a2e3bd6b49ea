//! User domain entity and related types.

use serde::{Deserialize, Serialize};

/// Storage-assigned user identifier.
///
/// Protocol-facing messages carry it as an opaque string.
pub type UserId = i32;

/// Parse a protocol-facing id.
///
/// Returns `None` for strings that can never name a stored user.
pub fn parse_user_id(raw: &str) -> Option<UserId> {
    raw.parse().ok()
}

/// User domain entity
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub name: String,
    pub email: String,
}

impl User {
    /// Create a user value from its stored fields
    pub fn new(id: UserId, name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            email: email.into(),
        }
    }

    /// Id in its protocol-facing form
    pub fn id_string(&self) -> String {
        self.id.to_string()
    }
}

/// User response (safe to return to client)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct UserResponse {
    /// Unique user identifier
    pub id: String,
    /// User name
    pub name: String,
    /// User email address
    pub email: String,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id_string(),
            name: user.name,
            email: user.email,
        }
    }
}

/// Confirmation returned after a delete
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct DeletedUserResponse {
    /// Id of the removed user
    pub id: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_user_id_accepts_decimal_ids() {
        assert_eq!(parse_user_id("42"), Some(42));
    }

    #[test]
    fn parse_user_id_rejects_non_numeric() {
        assert_eq!(parse_user_id(""), None);
        assert_eq!(parse_user_id("abc"), None);
        assert_eq!(parse_user_id("99999999999"), None);
    }

    #[test]
    fn user_response_serializes_id_as_string() {
        let response = UserResponse::from(User::new(7, "Jane", "jane@x.co"));
        let json = serde_json::to_value(&response).unwrap();

        assert_eq!(json["id"], "7");
        assert_eq!(json["name"], "Jane");
        assert_eq!(json["email"], "jane@x.co");
    }
}
