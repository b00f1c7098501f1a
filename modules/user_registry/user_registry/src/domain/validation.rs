//! Structural validation of `User` payloads.
//!
//! Pure functions; callers pass already-trimmed values.

use regex::Regex;

use super::error::DomainError;

/// Width of the `email` column.
pub const MAX_EMAIL_LENGTH: usize = 255;

#[allow(clippy::expect_used)] // good regex, it doesn't panic
static EMAIL_REGEX: std::sync::LazyLock<Regex> = std::sync::LazyLock::new(|| {
    Regex::new(
        r"^[A-Za-z0-9.!#$%&'*+/=?^_`{|}~-]+@[A-Za-z0-9](?:[A-Za-z0-9-]*[A-Za-z0-9])?(?:\.[A-Za-z0-9](?:[A-Za-z0-9-]*[A-Za-z0-9])?)+$",
    )
    .expect("static regex should not panic")
});

/// `local@domain.tld`: one `@`, a non-empty local part, and a domain made of
/// at least two dot-separated labels.
#[must_use]
pub fn is_valid_email(email: &str) -> bool {
    EMAIL_REGEX.is_match(email)
}

/// Validate a display name.
///
/// # Errors
/// `EmptyName` for blank input, `NameTooLong` above `max_len` characters.
pub fn validate_name(name: &str, max_len: usize) -> Result<(), DomainError> {
    if name.trim().is_empty() {
        return Err(DomainError::EmptyName);
    }
    let len = name.chars().count();
    if len > max_len {
        return Err(DomainError::NameTooLong { len, max: max_len });
    }
    Ok(())
}

/// Validate an email address.
///
/// # Errors
/// `EmptyEmail`, `EmailTooLong`, or `InvalidEmail`.
pub fn validate_email(email: &str) -> Result<(), DomainError> {
    if email.trim().is_empty() {
        return Err(DomainError::EmptyEmail);
    }
    let len = email.chars().count();
    if len > MAX_EMAIL_LENGTH {
        return Err(DomainError::EmailTooLong {
            len,
            max: MAX_EMAIL_LENGTH,
        });
    }
    if !is_valid_email(email) {
        return Err(DomainError::invalid_email(email));
    }
    Ok(())
}

/// Validate a full user payload. Name is checked first.
///
/// # Errors
/// The first failing rule.
pub fn validate_user(name: &str, email: &str, max_name_len: usize) -> Result<(), DomainError> {
    validate_name(name, max_name_len)?;
    validate_email(email)
}
