//! Connection setup and database error conversion helpers.

use std::fmt::Display;

use sea_orm::{ConnectOptions, Database, DatabaseConnection, DbErr, SqlErr};

use crate::config::DatabaseConfig;
use crate::domain::error::DomainError;

/// Convert any displayable error into a `DomainError::Database`.
pub fn db_err(e: impl Display) -> DomainError {
    DomainError::database(e.to_string())
}

/// True when the driver rejected a write because of a unique index.
pub fn is_unique_violation(e: &DbErr) -> bool {
    if matches!(e.sql_err(), Some(SqlErr::UniqueConstraintViolation(_))) {
        return true;
    }
    let msg = e.to_string();
    msg.contains("UNIQUE constraint failed") || msg.contains("duplicate key value")
}

/// Open a connection pool for the configured DSN.
///
/// Private in-memory `SQLite` databases live inside a single connection, so
/// the pool is pinned to exactly one connection.
///
/// # Errors
/// Returns the driver error when the DSN is invalid or unreachable.
pub async fn connect(cfg: &DatabaseConfig) -> Result<DatabaseConnection, DbErr> {
    let mut opts = ConnectOptions::new(cfg.dsn.clone());
    opts.sqlx_logging(false);

    if cfg.is_in_memory() {
        opts.max_connections(1).min_connections(1);
    } else {
        if let Some(n) = cfg.max_conns {
            opts.max_connections(n);
        }
        if let Some(n) = cfg.min_conns {
            opts.min_connections(n);
        }
    }
    if let Some(t) = cfg.acquire_timeout {
        opts.acquire_timeout(t);
    }

    tracing::info!(dsn = %redact_credentials_in_dsn(&cfg.dsn), "connecting to database");
    Database::connect(opts).await
}

/// Redact the password part of a DSN for logging.
///
/// A DSN that carries userinfo but does not parse as a URL is replaced
/// wholesale.
#[must_use]
pub fn redact_credentials_in_dsn(dsn: &str) -> String {
    if !dsn.contains('@') {
        return dsn.to_owned();
    }
    match url::Url::parse(dsn) {
        Ok(mut parsed) => {
            if parsed.password().is_some() {
                let _ = parsed.set_password(Some("***"));
            }
            parsed.to_string()
        }
        Err(_) => "***".to_owned(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn redacts_password_only() {
        assert_eq!(
            redact_credentials_in_dsn("postgres://app:s3cret@db:5432/users"),
            "postgres://app:***@db:5432/users"
        );
        assert_eq!(
            redact_credentials_in_dsn("postgres://app@db/users"),
            "postgres://app@db/users"
        );
        assert_eq!(
            redact_credentials_in_dsn("sqlite://user_registry.db?mode=rwc"),
            "sqlite://user_registry.db?mode=rwc"
        );
        assert_eq!(redact_credentials_in_dsn("sqlite::memory:"), "sqlite::memory:");
    }

    #[test]
    fn redacts_password_containing_at_sign() {
        let out = redact_credentials_in_dsn("postgres://app:p@ssw0rd@db:5432/users");
        assert!(!out.contains("ssw0rd"), "password leaked: {out}");
        assert_eq!(out, "postgres://app:***@db:5432/users");
    }

    #[test]
    fn unparseable_dsn_with_userinfo_is_fully_masked() {
        assert_eq!(redact_credentials_in_dsn("postgres://app:secret@db:badport/users"), "***");
    }

    #[tokio::test]
    async fn in_memory_connection_answers_ping() {
        let db = connect(&DatabaseConfig::new("sqlite::memory:")).await.unwrap();
        db.ping().await.unwrap();
    }
}
