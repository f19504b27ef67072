/// Database models for the user management service
///
/// This module contains the row types and their single-statement store
/// operations. Business rules (required fields, manager checks, batching)
/// live in [`crate::service`].
///
/// # Models
///
/// - `manager`: Managers that users belong to (seeded, never created via the API)
/// - `user`: User records

pub mod manager;
pub mod user;
