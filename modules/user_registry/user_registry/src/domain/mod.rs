//! Domain layer - business rules for the `User` resource.
//!
//! The domain layer:
//! - **MAY** import: `user_registry_sdk` (contract types)
//! - **MUST NOT** import: `api::*` or `infra::*` (one-way dependency: API/infra -> Domain)
//! - **Owns**: validation rules, the repository port, and outcome normalization

pub mod error;
pub mod repo;
pub mod service;
pub mod validation;
