//! Authentication data models

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use std::fmt;

/// Role assigned to every account created by signup or social login
pub const DEFAULT_ROLE: &str = "ROLE_USER";

/// JWT claims structure
///
/// `auth` holds the comma-joined authority list. `provider` is present only
/// on tokens issued by a social login, in which case `sub` is the provider's
/// subject identifier rather than an email.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Claims {
    pub sub: String,
    pub auth: String,
    pub iat: i64,
    pub exp: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub provider: Option<String>,
}

impl Claims {
    pub fn authorities(&self) -> Vec<String> {
        self.auth
            .split(',')
            .map(str::trim)
            .filter(|a| !a.is_empty())
            .map(str::to_string)
            .collect()
    }
}

/// User database model
///
/// Never serialized directly; responses go through [`UserProfile`], which has
/// no password field.
#[derive(FromRow, Clone)]
pub struct User {
    pub user_id: i64,
    pub email: String,
    pub password: String,
    pub nickname: String,
    pub gender: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub address_detail: Option<String>,
    pub post_code: Option<String>,
    pub profile_image: Option<String>,
    pub role: String,
    pub oauth_provider: Option<String>,
    pub oauth_provider_id: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

impl fmt::Debug for User {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("User")
            .field("user_id", &self.user_id)
            .field("email", &crate::common::safe_email_log(&self.email))
            .field("role", &self.role)
            .field("oauth_provider", &self.oauth_provider)
            .finish_non_exhaustive()
    }
}

/// Fields for a new `users` row
#[derive(Debug, Default)]
pub struct NewUser {
    pub email: String,
    pub password_hash: String,
    pub nickname: String,
    pub gender: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub address_detail: Option<String>,
    pub post_code: Option<String>,
    pub profile_image: Option<String>,
    pub role: String,
    pub oauth_provider: Option<String>,
    pub oauth_provider_id: Option<String>,
}

/// User as returned to clients, password scrubbed
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub user_id: i64,
    pub email: String,
    pub nickname: String,
    pub gender: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub address_detail: Option<String>,
    pub post_code: Option<String>,
    pub profile_image: Option<String>,
    pub role: String,
    pub oauth_provider: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

impl From<User> for UserProfile {
    fn from(user: User) -> Self {
        Self {
            user_id: user.user_id,
            email: user.email,
            nickname: user.nickname,
            gender: user.gender,
            phone: user.phone,
            address: user.address,
            address_detail: user.address_detail,
            post_code: user.post_code,
            profile_image: user.profile_image,
            role: user.role,
            oauth_provider: user.oauth_provider,
            created_at: user.created_at,
            updated_at: user.updated_at,
        }
    }
}

#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct SignupRequest {
    pub email: String,
    pub password: String,
    pub nickname: String,
    pub gender: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub address_detail: Option<String>,
    pub post_code: Option<String>,
    pub profile_image: Option<String>,
}

#[derive(Deserialize, Debug)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Token bundle returned by a successful login
#[derive(Serialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct AuthResponse {
    pub token: String,
    pub user_id: i64,
    pub email: String,
    pub nickname: String,
    pub profile_image: Option<String>,
    pub role: String,
}

/// Query parameters the provider appends to the OAuth2 callback
#[derive(Deserialize, Debug)]
pub struct OAuthCallbackParams {
    pub code: Option<String>,
    pub state: Option<String>,
    pub error: Option<String>,
    pub error_description: Option<String>,
}
