//! User Registry SDK
//!
//! This crate provides the public API for the `user_registry` module:
//! - `UserRegistryClientV1` trait
//! - Model types for users (`User`, `NewUser`, `UserUpdate`)
//! - Error type (`UserRegistryError`) and the fixed duplicate-email message
//!
//! ## Usage
//!
//! ```ignore
//! use user_registry_sdk::{NewUser, UserRegistryClientV1};
//!
//! let user = client
//!     .create_user(NewUser::new("Test", "test@email.com"))
//!     .await?;
//! let same = client.get_user_by_email(&user.email).await?;
//! ```

#![forbid(unsafe_code)]
#![deny(rust_2018_idioms)]

pub mod client;
pub mod errors;
pub mod models;

pub use client::UserRegistryClientV1;
pub use errors::{EMAIL_TAKEN_MESSAGE, UserRegistryError};
pub use models::{NewUser, User, UserUpdate};
