//! # Memos Module
//!
//! Short personal notes, limited to a small number per user.

pub mod handlers;
pub mod models;
pub mod routes;
pub mod services;
pub mod validators;

#[cfg(test)]
mod tests;

pub use routes::memos_routes;
