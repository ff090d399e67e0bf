//! # Posts Module
//!
//! Community workout posts:
//! - Cursor-paginated feeds (latest, popular, per author)
//! - View counting on detail reads
//! - Likes toggled per user with a denormalized like count

pub mod handlers;
pub mod models;
pub mod routes;
pub mod services;
pub mod validators;

#[cfg(test)]
mod tests;

pub use routes::posts_routes;
