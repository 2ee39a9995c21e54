/// API route modules
pub mod auth;
pub mod foodlog;
pub mod health;
pub mod users;
