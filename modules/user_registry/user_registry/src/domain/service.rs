//! Domain service - orchestrates validation and persistence.
//!
//! Every operation returns the success value of its outcome (`Created`,
//! `Found`, `Updated`, `Deleted`) as `Ok`, and one of the failure outcomes
//! (`ValidationFailed`, `DuplicateEmail`, `NotFound`) or an infrastructure
//! failure as `DomainError`.

use std::sync::Arc;

use tracing::{debug, info, instrument};
use user_registry_sdk::{NewUser, User, UserUpdate};

use super::error::DomainError;
use super::repo::UsersRepository;
use super::validation;
use crate::config::UserRegistryConfig;

/// Configuration for the domain service
#[derive(Debug, Clone)]
pub struct ServiceConfig {
    pub max_name_length: usize,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            max_name_length: 100,
        }
    }
}

impl From<&UserRegistryConfig> for ServiceConfig {
    fn from(cfg: &UserRegistryConfig) -> Self {
        Self {
            max_name_length: cfg.max_name_length,
        }
    }
}

pub struct Service {
    repo: Arc<dyn UsersRepository>,
    config: ServiceConfig,
}

impl Service {
    pub fn new(repo: Arc<dyn UsersRepository>, config: ServiceConfig) -> Self {
        Self { repo, config }
    }

    /// Register a new user.
    ///
    /// # Errors
    /// Validation errors, `EmailAlreadyExists`, or `Database`.
    #[instrument(skip(self, new_user), fields(user.email = %new_user.email))]
    pub async fn create_user(&self, new_user: NewUser) -> Result<User, DomainError> {
        info!("Creating new user");

        let new_user = NewUser::new(new_user.name.trim(), new_user.email.trim());
        validation::validate_user(
            &new_user.name,
            &new_user.email,
            self.config.max_name_length,
        )?;

        let user = self.repo.insert(&new_user).await?;

        info!(user.id = user.id, "Successfully created user");
        Ok(user)
    }

    /// Look a user up by email.
    ///
    /// # Errors
    /// `UserNotFound` or `Database`.
    #[instrument(skip(self))]
    pub async fn get_user_by_email(&self, email: &str) -> Result<User, DomainError> {
        debug!("Getting user by email");

        let email = email.trim();
        let user = self
            .repo
            .find_by_email(email)
            .await?
            .ok_or_else(|| DomainError::user_not_found(email))?;

        debug!("Successfully retrieved user");
        Ok(user)
    }

    /// Replace name and email of an existing user.
    ///
    /// # Errors
    /// Validation errors, `UserNotFound`, `EmailAlreadyExists`, or `Database`.
    #[instrument(skip(self, update), fields(user.id = ?update.id, user.email = %update.email))]
    pub async fn update_user(&self, update: UserUpdate) -> Result<User, DomainError> {
        info!("Updating user");

        let update = UserUpdate {
            id: update.id,
            name: update.name.trim().to_owned(),
            email: update.email.trim().to_owned(),
        };
        validation::validate_user(&update.name, &update.email, self.config.max_name_length)?;

        let user = self.repo.replace(&update).await?;

        info!(user.id = user.id, "Successfully updated user");
        Ok(user)
    }

    /// Remove the user stored under `email`.
    ///
    /// # Errors
    /// `UserNotFound` or `Database`.
    #[instrument(skip(self))]
    pub async fn delete_user_by_email(&self, email: &str) -> Result<(), DomainError> {
        info!("Deleting user");

        let email = email.trim();
        if !self.repo.delete_by_email(email).await? {
            return Err(DomainError::user_not_found(email));
        }

        info!("Successfully deleted user");
        Ok(())
    }

    /// Probe the backing store.
    ///
    /// # Errors
    /// `Database` when the store is unreachable.
    pub async fn health(&self) -> Result<(), DomainError> {
        self.repo.ping().await
    }
}
