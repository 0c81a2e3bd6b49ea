//! Domain-level constants.
//!
//! These constants define business rules and validation requirements.

// =============================================================================
// Validation
// =============================================================================

/// A name starts with an ASCII letter followed by ASCII letters or digits.
pub const NAME_PATTERN: &str = r"^[A-Za-z][A-Za-z0-9]*$";

/// Conventional `local@domain.tld` shape with a top-level segment of two or more letters.
pub const EMAIL_PATTERN: &str = r"^[^@\s]+@[^@\s]+\.[A-Za-z]{2,}$";

/// Message returned when either field is missing
pub const MSG_EMPTY_FIELDS: &str = "name and email cannot be empty";

/// Message returned when the name does not match [`NAME_PATTERN`]
pub const MSG_INVALID_NAME: &str = "invalid name format";

/// Message returned when the email does not match [`EMAIL_PATTERN`]
pub const MSG_INVALID_EMAIL: &str = "invalid email format";

// =============================================================================
// Entities
// =============================================================================

/// Entity label used in not-found messages
pub const ENTITY_USER: &str = "user";
