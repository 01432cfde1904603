//! Genji API domain module.
//!
//! Thin HTTP layer over the remote Genji API. Every tool talks to the API
//! through the [`GenjiBackend`] trait so the dispatcher can be exercised
//! against an in-memory backend.
//!
//! ## Architecture
//!
//! - `query.rs` - Ordered query parameters with positional array encoding
//! - `client.rs` - `GenjiBackend` trait and the reqwest-backed `GenjiClient`
//! - `error.rs` - API error types

mod client;
mod error;
mod query;

pub use client::{GenjiBackend, GenjiClient, USER_AGENT};
#[cfg(test)]
pub(crate) use client::testing;
pub use error::ApiError;
pub use query::{ApiQuery, QueryValue};
