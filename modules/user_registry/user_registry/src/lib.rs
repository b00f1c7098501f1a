//! User Registry Module
//!
//! This module manages a single `User` resource (create, get-by-email,
//! update, delete) with a REST API, `SeaORM` storage, and an in-process
//! client.
//!
//! ## Public API
//!
//! The public API is defined in the `user_registry-sdk` crate and re-exported here:
//! - `UserRegistryClientV1` - trait for in-process consumers
//! - `User`, `NewUser`, `UserUpdate` - data models
//! - `UserRegistryError` - error types
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]
// === PUBLIC API (from SDK) ===
pub use user_registry_sdk::{
    EMAIL_TAKEN_MESSAGE, NewUser, User, UserRegistryClientV1, UserRegistryError, UserUpdate,
};

// === MODULE DEFINITION ===
pub mod module;
pub use config::{DatabaseConfig, HttpConfig, UserRegistryConfig};
pub use module::UserRegistry;

// === LOCAL CLIENT ===
pub mod local_client;

// === TEST HARNESS ===
pub mod test_support;

// === INTERNAL MODULES ===
// WARNING: These modules are internal implementation details!
// They are exposed only for comprehensive testing and should NOT be used by external consumers.
#[doc(hidden)]
pub mod api;
#[doc(hidden)]
pub mod config;
#[doc(hidden)]
pub mod domain;
#[doc(hidden)]
pub mod infra;
