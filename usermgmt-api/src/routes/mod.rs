/// API route handlers
///
/// - `health`: Health check endpoint
/// - `users`: User record endpoints

pub mod health;
pub mod users;
