#![allow(clippy::unwrap_used, clippy::expect_used, dead_code)]

use tempfile::TempDir;
use user_registry::test_support::{HarnessConfig, TestClient, scaffold_client};

/// Client over the target selected by `USER_REGISTRY_TEST_DSN` (in-memory by default).
pub async fn client() -> TestClient {
    scaffold_client(&HarnessConfig::from_env())
        .await
        .expect("failed to scaffold test client")
}

/// File-backed `SQLite` target in a fresh temp dir; keep the dir alive for the test.
pub fn file_target() -> (TempDir, HarnessConfig) {
    let dir = tempfile::tempdir().expect("failed to create temp dir");
    let path = dir.path().join("users.db");
    let cfg = HarnessConfig::new(format!("sqlite://{}?mode=rwc", path.display()));
    (dir, cfg)
}
