//! Local implementation of `UserRegistryClientV1`.
//!
//! This client is used for in-process consumers that do not need HTTP.
//! It delegates to the domain service and converts errors to SDK error types.

use std::sync::Arc;

use async_trait::async_trait;
use user_registry_sdk::{NewUser, User, UserRegistryClientV1, UserRegistryError, UserUpdate};

use crate::domain::service::Service;

/// Local implementation of the `UserRegistryClientV1` trait that delegates to the domain service.
pub struct UserRegistryLocalClient {
    service: Arc<Service>,
}

impl UserRegistryLocalClient {
    /// Create a new local client wrapping the domain service.
    #[must_use]
    pub fn new(service: Arc<Service>) -> Self {
        Self { service }
    }
}

#[async_trait]
impl UserRegistryClientV1 for UserRegistryLocalClient {
    async fn create_user(&self, new_user: NewUser) -> Result<User, UserRegistryError> {
        self.service.create_user(new_user).await.map_err(Into::into)
    }

    async fn get_user_by_email(&self, email: &str) -> Result<User, UserRegistryError> {
        self.service
            .get_user_by_email(email)
            .await
            .map_err(Into::into)
    }

    async fn update_user(&self, update: UserUpdate) -> Result<User, UserRegistryError> {
        self.service.update_user(update).await.map_err(Into::into)
    }

    async fn delete_user_by_email(&self, email: &str) -> Result<(), UserRegistryError> {
        self.service
            .delete_user_by_email(email)
            .await
            .map_err(Into::into)
    }
}
