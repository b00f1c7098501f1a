#![allow(clippy::unwrap_used, clippy::expect_used)]
//! Test harness: scaffolds a ready HTTP client over a freshly reset store.
//!
//! Every [`scaffold_client`] call drops and recreates the schema on its
//! target before returning, so each test starts from an empty `users` table.
//! Resets are serialized per target DSN. For shared targets (file or server
//! databases) the returned [`TestClient`] keeps holding the target's lock
//! until it is dropped, so two tests never reset each other's store
//! mid-run. A scaffold that cannot take the lock within
//! [`HarnessConfig::lock_wait`] fails with [`HarnessError::TargetBusy`].

use std::sync::{Arc, LazyLock};
use std::time::Duration;

use axum::Router;
use axum::body::{Body, Bytes};
use axum::http::{HeaderMap, Method, Request, StatusCode, header};
use dashmap::DashMap;
use sea_orm::{DatabaseConnection, DbErr};
use serde::de::DeserializeOwned;
use tokio::sync::{Mutex, OwnedMutexGuard};
use tower::ServiceExt;

use crate::api::rest::dto::UserDto;
use crate::api::rest::problem::Problem;
use crate::config::{DatabaseConfig, HttpConfig, UserRegistryConfig};
use crate::infra::storage;
use crate::module::UserRegistry;

/// Environment variable naming the DSN of a dedicated test database.
pub const TEST_DSN_ENV: &str = "USER_REGISTRY_TEST_DSN";

const IN_MEMORY_DSN: &str = "sqlite::memory:";

const DEFAULT_LOCK_WAIT: Duration = Duration::from_secs(60);

static TARGET_LOCKS: LazyLock<DashMap<String, Arc<Mutex<()>>>> = LazyLock::new(DashMap::new);

fn target_lock(dsn: &str) -> Arc<Mutex<()>> {
    Arc::clone(&*TARGET_LOCKS.entry(dsn.to_owned()).or_default())
}

/// Where and how the harness builds its store and router.
#[derive(Debug, Clone)]
pub struct HarnessConfig {
    pub database: DatabaseConfig,
    pub module: UserRegistryConfig,
    pub http: HttpConfig,
    /// How long to wait for another client on the same target to be dropped.
    pub lock_wait: Duration,
}

impl HarnessConfig {
    #[must_use]
    pub fn new(dsn: impl Into<String>) -> Self {
        Self {
            database: DatabaseConfig::new(dsn),
            module: UserRegistryConfig::default(),
            http: HttpConfig::default(),
            lock_wait: DEFAULT_LOCK_WAIT,
        }
    }

    /// A private in-memory `SQLite` store that nothing else can see.
    #[must_use]
    pub fn in_memory() -> Self {
        Self::new(IN_MEMORY_DSN)
    }

    /// Target named by `USER_REGISTRY_TEST_DSN`, or a private in-memory store when unset.
    #[must_use]
    pub fn from_env() -> Self {
        match std::env::var(TEST_DSN_ENV) {
            Ok(dsn) if !dsn.trim().is_empty() => Self::new(dsn.trim()),
            _ => Self::in_memory(),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum HarnessError {
    #[error("failed to connect to test database: {0}")]
    Connect(#[source] DbErr),
    #[error("failed to reset test database: {0}")]
    Reset(#[source] DbErr),
    #[error("test database still held by another client after {0:?}")]
    TargetBusy(Duration),
}

/// Reset the configured target and return a client bound to it.
///
/// # Errors
/// Returns [`HarnessError`] when the target stays locked past `lock_wait`,
/// cannot be reached, or its schema cannot be dropped and recreated.
pub async fn scaffold_client(cfg: &HarnessConfig) -> Result<TestClient, HarnessError> {
    let lock = target_lock(&cfg.database.dsn);
    let guard = match Arc::clone(&lock).try_lock_owned() {
        Ok(guard) => guard,
        Err(_) => tokio::time::timeout(cfg.lock_wait, lock.lock_owned())
            .await
            .map_err(|_| HarnessError::TargetBusy(cfg.lock_wait))?,
    };

    let db = storage::db::connect(&cfg.database)
        .await
        .map_err(HarnessError::Connect)?;
    storage::reset(&db).await.map_err(HarnessError::Reset)?;
    tracing::debug!(in_memory = cfg.database.is_in_memory(), "test store reset");

    let module = UserRegistry::new(db.clone(), &cfg.module);
    let router = module.router(&cfg.http);

    let guard = if cfg.database.is_in_memory() {
        drop(guard);
        None
    } else {
        Some(guard)
    };

    Ok(TestClient {
        router,
        db,
        module,
        _guard: guard,
    })
}

/// In-process client that drives the REST router without a socket.
pub struct TestClient {
    router: Router,
    db: DatabaseConnection,
    module: UserRegistry,
    _guard: Option<OwnedMutexGuard<()>>,
}

impl TestClient {
    #[must_use]
    pub fn db(&self) -> &DatabaseConnection {
        &self.db
    }

    #[must_use]
    pub fn module(&self) -> &UserRegistry {
        &self.module
    }

    /// # Panics
    /// Panics when the response body cannot be read.
    pub async fn send(&self, req: Request<Body>) -> TestResponse {
        let resp = self
            .router
            .clone()
            .oneshot(req)
            .await
            .expect("router is infallible");
        let status = resp.status();
        let headers = resp.headers().clone();
        let body = axum::body::to_bytes(resp.into_body(), usize::MAX)
            .await
            .expect("failed to read response body");
        TestResponse {
            status,
            headers,
            body,
        }
    }

    pub async fn get(&self, uri: &str) -> TestResponse {
        self.send(empty_request(Method::GET, uri)).await
    }

    pub async fn delete(&self, uri: &str) -> TestResponse {
        self.send(empty_request(Method::DELETE, uri)).await
    }

    pub async fn post_json(&self, uri: &str, body: &serde_json::Value) -> TestResponse {
        self.send(json_request(Method::POST, uri, body)).await
    }

    pub async fn put_json(&self, uri: &str, body: &serde_json::Value) -> TestResponse {
        self.send(json_request(Method::PUT, uri, body)).await
    }

    /// `POST /User` with `{"Name", "Email"}`.
    pub async fn create_user(&self, name: &str, email: &str) -> TestResponse {
        self.post_json("/User", &serde_json::json!({ "Name": name, "Email": email }))
            .await
    }

    /// `GET /User?Email=...`
    pub async fn get_user(&self, email: &str) -> TestResponse {
        self.get(&user_uri(email)).await
    }

    /// `PUT /User` targeting the record stored under `email`.
    pub async fn update_user(&self, name: &str, email: &str) -> TestResponse {
        self.put_json("/User", &serde_json::json!({ "Name": name, "Email": email }))
            .await
    }

    /// `DELETE /User?Email=...`
    pub async fn delete_user(&self, email: &str) -> TestResponse {
        self.delete(&user_uri(email)).await
    }
}

/// Buffered response: status, headers and the whole body.
#[derive(Debug, Clone)]
pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Bytes,
}

impl TestResponse {
    /// # Panics
    /// Panics when the body is not valid JSON for `T`.
    pub fn json<T: DeserializeOwned>(&self) -> T {
        serde_json::from_slice(&self.body).unwrap_or_else(|e| {
            panic!(
                "response body is not the expected JSON ({e}): {}",
                self.text()
            )
        })
    }

    #[must_use]
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }

    #[must_use]
    pub fn user(&self) -> UserDto {
        self.json()
    }

    #[must_use]
    pub fn problem(&self) -> Problem {
        self.json()
    }
}

/// `/User?Email=...` with the address form-encoded.
///
/// # Panics
/// Never in practice: a single string pair always encodes.
#[must_use]
pub fn user_uri(email: &str) -> String {
    let query = serde_urlencoded::to_string([("Email", email)]).expect("encodable query");
    format!("/User?{query}")
}

fn empty_request(method: Method, uri: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::empty())
        .expect("valid request")
}

fn json_request(method: Method, uri: &str, body: &serde_json::Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .expect("valid request")
}
