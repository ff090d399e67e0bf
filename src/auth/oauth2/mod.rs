//! Social login (Kakao, Naver) over the OAuth2 authorization-code flow

pub mod client;
pub mod provider;
pub mod reconcile;

pub use client::{OAuthClient, OAuthError};
pub use provider::{OAuthProfile, Provider};
pub use reconcile::{reconcile, success_redirect_url};
