use async_trait::async_trait;
use user_registry_sdk::{NewUser, User, UserUpdate};

use crate::domain::error::DomainError;

/// Repository trait for User persistence operations.
///
/// Implementations own the uniqueness guarantee on `email`: a write that
/// would produce a second record with the same email must fail with
/// `DomainError::EmailAlreadyExists` atomically, even under concurrent
/// writers.
#[async_trait]
pub trait UsersRepository: Send + Sync {
    /// Store a new user and return it with its assigned id.
    async fn insert(&self, new_user: &NewUser) -> Result<User, DomainError>;

    /// Find a user by exact email.
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, DomainError>;

    /// Overwrite `name` and `email` of the targeted record, keeping its id.
    ///
    /// The target is the record with `update.target_id()` when one exists,
    /// otherwise the record stored under `update.email`. Fails with
    /// `UserNotFound` when neither matches.
    async fn replace(&self, update: &UserUpdate) -> Result<User, DomainError>;

    /// Delete by email. Returns `false` when no record matched.
    async fn delete_by_email(&self, email: &str) -> Result<bool, DomainError>;

    /// Check that the store is reachable.
    async fn ping(&self) -> Result<(), DomainError>;
}
