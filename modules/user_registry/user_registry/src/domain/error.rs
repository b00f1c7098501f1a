use thiserror::Error;
use user_registry_sdk::{EMAIL_TAKEN_MESSAGE, UserRegistryError};

/// Domain-specific errors using thiserror
#[derive(Error, Debug)]
pub enum DomainError {
    #[error("User not found: {key}")]
    UserNotFound { key: String },

    #[error("{}", EMAIL_TAKEN_MESSAGE)]
    EmailAlreadyExists { email: String },

    #[error("Name cannot be empty")]
    EmptyName,

    #[error("Name too long: {len} characters (max: {max})")]
    NameTooLong { len: usize, max: usize },

    #[error("Email cannot be empty")]
    EmptyEmail,

    #[error("Invalid email format: '{email}'")]
    InvalidEmail { email: String },

    #[error("Email too long: {len} characters (max: {max})")]
    EmailTooLong { len: usize, max: usize },

    #[error("Database error: {message}")]
    Database { message: String },
}

impl DomainError {
    pub fn user_not_found(key: impl Into<String>) -> Self {
        Self::UserNotFound { key: key.into() }
    }

    pub fn email_already_exists(email: impl Into<String>) -> Self {
        Self::EmailAlreadyExists {
            email: email.into(),
        }
    }

    pub fn invalid_email(email: impl Into<String>) -> Self {
        Self::InvalidEmail {
            email: email.into(),
        }
    }

    pub fn database(message: impl Into<String>) -> Self {
        Self::Database {
            message: message.into(),
        }
    }

    /// Payload field a validation error refers to.
    #[must_use]
    pub fn field(&self) -> Option<&'static str> {
        match self {
            Self::EmptyName | Self::NameTooLong { .. } => Some("Name"),
            Self::EmptyEmail | Self::InvalidEmail { .. } | Self::EmailTooLong { .. } => {
                Some("Email")
            }
            Self::UserNotFound { .. } | Self::EmailAlreadyExists { .. } | Self::Database { .. } => {
                None
            }
        }
    }

    #[must_use]
    pub fn is_validation(&self) -> bool {
        self.field().is_some()
    }
}

/// Convert domain errors to SDK errors for public API consumption.
impl From<DomainError> for UserRegistryError {
    fn from(domain_error: DomainError) -> Self {
        match domain_error {
            DomainError::UserNotFound { key } => UserRegistryError::not_found(key),
            DomainError::EmailAlreadyExists { email } => UserRegistryError::conflict(email),
            DomainError::Database { .. } => UserRegistryError::internal(),
            e @ (DomainError::EmptyName
            | DomainError::NameTooLong { .. }
            | DomainError::EmptyEmail
            | DomainError::InvalidEmail { .. }
            | DomainError::EmailTooLong { .. }) => UserRegistryError::validation(e.to_string()),
        }
    }
}
