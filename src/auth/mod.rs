//! # Auth Module
//!
//! This module handles all authentication-related functionality including:
//! - JWT token issuance and verification
//! - The per-request authentication filter and principal extractors
//! - Local signup and login with hashed passwords
//! - Kakao and Naver social login with account reconciliation

pub mod extractors;
pub mod filter;
pub mod handlers;
pub mod identity;
pub mod models;
pub mod oauth2;
pub mod password;
pub mod principal;
pub mod routes;
pub mod services;
pub mod store;
pub mod token;
pub mod validators;

#[cfg(test)]
mod tests;

pub use extractors::{CurrentPrincipal, CurrentUser};
pub use filter::jwt_request_filter;
pub use models::{User, UserProfile};
pub use principal::Principal;
pub use routes::auth_routes;
pub use store::UserStore;
pub use token::TokenService;
