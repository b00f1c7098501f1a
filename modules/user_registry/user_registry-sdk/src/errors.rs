//! Public error types for the `user_registry` module.
//!
//! These errors are safe to expose to other modules and consumers.

use thiserror::Error;

/// Message returned whenever a create collides with an existing email.
///
/// Clients match on this exact text, so it must not change.
pub const EMAIL_TAKEN_MESSAGE: &str = "A user is already associated with that email";

/// Errors that can be returned by the `UserRegistryClientV1`.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum UserRegistryError {
    /// No user matched the lookup key (email or id).
    #[error("User not found: {key}")]
    NotFound { key: String },

    /// A user with the specified email already exists.
    #[error("{}", EMAIL_TAKEN_MESSAGE)]
    Conflict { email: String },

    /// Validation error with the provided data.
    #[error("Validation error: {message}")]
    Validation { message: String },

    /// An internal error occurred.
    #[error("Internal error")]
    Internal,
}

impl UserRegistryError {
    /// Create a `NotFound` error.
    pub fn not_found(key: impl Into<String>) -> Self {
        Self::NotFound { key: key.into() }
    }

    /// Create a Conflict error.
    pub fn conflict(email: impl Into<String>) -> Self {
        Self::Conflict {
            email: email.into(),
        }
    }

    /// Create a Validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    /// Create an Internal error.
    #[must_use]
    pub fn internal() -> Self {
        Self::Internal
    }
}
