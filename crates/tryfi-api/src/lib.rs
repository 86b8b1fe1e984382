//! HTTP/GraphQL transport for the TryFi pet tracker API.
//!
//! This crate provides a client that logs in against the vendor endpoint,
//! keeps the resulting session, and issues the GraphQL queries and mutations
//! the `tryfi` facade is built on.
//!
//! ## Features
//!
//! - **Client**: login, raw `query`/`mutation`, status and error mapping
//! - **Queries**: typed user, household, location, stats and device calls
//! - **Types**: serde structs mirroring the vendor schema

mod client;
mod config;
pub mod documents;
mod error;
mod queries;
mod types;

pub use client::TryFiClient;
pub use config::ClientConfig;
pub use error::ApiError;
pub use types::*;
