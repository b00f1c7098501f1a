//! Infrastructure storage layer - database persistence.
//!
//! This module contains ALL SeaORM-specific code and database operations:
//! - `entity` - SeaORM entity for the `users` table
//! - `mapper` - conversions between SeaORM models and SDK contract types
//! - `migrations` - schema creation (table + unique email index)
//! - `sea_orm_repo` - `UsersRepository` implementation
//! - `db` - connection setup and error conversion

pub mod db;
pub mod entity;
pub mod mapper;
pub mod migrations;
pub mod sea_orm_repo;


use sea_orm::{DatabaseConnection, DbErr};
use sea_orm_migration::MigratorTrait;

pub use migrations::Migrator;
pub use sea_orm_repo::SeaOrmUsersRepository;

/// Apply pending schema migrations.
pub async fn migrate(db: &DatabaseConnection) -> Result<(), DbErr> {
    Migrator::up(db, None).await
}

/// Drop every table and re-run all migrations, leaving an empty store.
pub async fn reset(db: &DatabaseConnection) -> Result<(), DbErr> {
    Migrator::fresh(db).await
}
