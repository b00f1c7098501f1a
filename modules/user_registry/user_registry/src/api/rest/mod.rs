//! REST API layer.
//!
//! - `dto` - wire types for the `User` JSON document and the `Email` query
//! - `handlers` - axum handlers delegating to `domain::service::Service`
//! - `routes` - the `/User` and health routes plus the middleware stack
//! - `problem` / `error` - RFC 9457 error bodies and domain error mapping

pub mod dto;
pub mod error;
pub mod handlers;
pub mod problem;
pub mod routes;

#[cfg(test)]
mod dto_tests;
