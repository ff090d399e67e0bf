//! # Records Module
//!
//! This module tracks personal activity logs:
//! - Study sessions (subject, minutes, optional time range)
//! - Workouts (type, minutes, calories, date)

pub mod handlers;
pub mod models;
pub mod routes;
pub mod services;
pub mod validators;


pub use routes::records_routes;
