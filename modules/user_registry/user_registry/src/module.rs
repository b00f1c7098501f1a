//! Composition root of the user registry: wires storage, service, local
//! client and REST routes over one database connection.

use std::sync::Arc;

use axum::Router;
use sea_orm::{DatabaseConnection, DbErr};
use user_registry_sdk::UserRegistryClientV1;

use crate::api::rest::routes;
use crate::config::{DatabaseConfig, HttpConfig, UserRegistryConfig};
use crate::domain::service::{Service, ServiceConfig};
use crate::infra::storage::{self, SeaOrmUsersRepository};
use crate::local_client::UserRegistryLocalClient;

/// Assembled user registry module.
#[derive(Clone)]
pub struct UserRegistry {
    service: Arc<Service>,
}

impl UserRegistry {
    /// Build the module on an already migrated connection.
    #[must_use]
    pub fn new(db: DatabaseConnection, cfg: &UserRegistryConfig) -> Self {
        let repo = Arc::new(SeaOrmUsersRepository::new(db));
        let service = Arc::new(Service::new(repo, ServiceConfig::from(cfg)));
        Self { service }
    }

    /// Open a connection pool for `cfg`.
    ///
    /// # Errors
    /// Returns the driver error when the DSN is invalid or unreachable.
    pub async fn connect(cfg: &DatabaseConfig) -> Result<DatabaseConnection, DbErr> {
        storage::db::connect(cfg).await
    }

    /// Apply pending schema migrations.
    ///
    /// # Errors
    /// Returns the driver error when a migration fails.
    pub async fn migrate(db: &DatabaseConnection) -> Result<(), DbErr> {
        storage::migrate(db).await
    }

    #[must_use]
    pub fn service(&self) -> Arc<Service> {
        Arc::clone(&self.service)
    }

    /// In-process client over the same service.
    #[must_use]
    pub fn client(&self) -> Arc<dyn UserRegistryClientV1> {
        Arc::new(UserRegistryLocalClient::new(self.service()))
    }

    /// REST routes with the full middleware stack applied.
    pub fn router(&self, http: &HttpConfig) -> Router {
        let router = routes::register_routes(Router::new(), self.service());
        routes::apply_middleware(router, http)
    }
}
