//! Random motivational quotes

pub mod handlers;
pub mod models;
pub mod routes;
pub mod services;


pub use routes::cheerup_routes;
