//! # Todos Module
//!
//! Personal todo list with completion tracking.

pub mod handlers;
pub mod models;
pub mod routes;
pub mod services;
pub mod validators;

#[cfg(test)]
mod tests;

pub use routes::todos_routes;
