//! # Users Module
//!
//! Self-service profile endpoints for the authenticated user.

pub mod handlers;
pub mod models;
pub mod routes;
pub mod validators;


pub use routes::users_routes;
