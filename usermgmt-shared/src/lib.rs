//! # User Management Shared Library
//!
//! Storage, models and the record service behind the user management API.
//!
//! ## Module Organization
//!
//! - `db`: Connection pool and embedded migrations
//! - `models`: Row types and their store operations
//! - `service`: Validation and the create/query/update/delete operations

pub mod db;
pub mod models;
pub mod service;

/// Current version of the shared library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
