//! # User Management API Server Library
//!
//! HTTP surface over the record service in `usermgmt-shared`.
//!
//! ## Modules
//!
//! - `app`: Application state and router builder
//! - `config`: Configuration management
//! - `error`: Error handling and HTTP response mapping
//! - `extract`: JSON body extractor that tolerates an empty body
//! - `routes`: API route handlers
//! - `telemetry`: Console and file logging

pub mod app;
pub mod config;
pub mod error;
pub mod extract;
pub mod routes;
pub mod telemetry;
