//! Domains module containing business logic organized by bounded contexts.
//!
//! - **api**: HTTP access to the remote Genji API
//! - **tools**: MCP tools exposed to clients, built on top of `api`

pub mod api;
pub mod tools;
