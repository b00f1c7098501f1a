//! Client trait for in-process consumers of the `user_registry` module.

use async_trait::async_trait;

use crate::errors::UserRegistryError;
use crate::models::{NewUser, User, UserUpdate};

/// Transport-agnostic user registry API.
///
/// Implemented in-process by `UserRegistryLocalClient`; every method maps
/// one-to-one onto an HTTP operation of the `/User` resource.
#[async_trait]
pub trait UserRegistryClientV1: Send + Sync {
    /// Register a new user. Fails with `Conflict` when the email is taken.
    async fn create_user(&self, new_user: NewUser) -> Result<User, UserRegistryError>;

    /// Look a user up by email.
    async fn get_user_by_email(&self, email: &str) -> Result<User, UserRegistryError>;

    /// Replace a stored user's name and email.
    async fn update_user(&self, update: UserUpdate) -> Result<User, UserRegistryError>;

    /// Remove the user stored under `email`.
    async fn delete_user_by_email(&self, email: &str) -> Result<(), UserRegistryError>;
}
