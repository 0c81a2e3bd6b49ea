//! Name and email validation rules.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::constants::{
    EMAIL_PATTERN, MSG_EMPTY_FIELDS, MSG_INVALID_EMAIL, MSG_INVALID_NAME, NAME_PATTERN,
};
use crate::error::{DomainError, DomainResult};

static NAME_RE: Lazy<Regex> = Lazy::new(|| Regex::new(NAME_PATTERN).expect("valid name regex"));
static EMAIL_RE: Lazy<Regex> = Lazy::new(|| Regex::new(EMAIL_PATTERN).expect("valid email regex"));

/// Check that a name is non-empty and alphanumeric, starting with a letter.
pub fn validate_name(name: &str) -> DomainResult<()> {
    if name.is_empty() || !NAME_RE.is_match(name) {
        return Err(DomainError::validation(MSG_INVALID_NAME));
    }
    Ok(())
}

/// Check that an email is non-empty and has the `local@domain.tld` shape.
pub fn validate_email(email: &str) -> DomainResult<()> {
    if email.is_empty() || !EMAIL_RE.is_match(email) {
        return Err(DomainError::validation(MSG_INVALID_EMAIL));
    }
    Ok(())
}

/// Validate the writable user fields, stopping at the first failure.
///
/// Emptiness of either field is reported before any format problem.
pub fn validate_user_fields(name: &str, email: &str) -> DomainResult<()> {
    if name.is_empty() || email.is_empty() {
        return Err(DomainError::validation(MSG_EMPTY_FIELDS));
    }
    validate_name(name)?;
    validate_email(email)
}
