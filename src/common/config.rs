// src/common/config.rs
//! Runtime configuration read from the environment at startup

use std::env;
use tracing::warn;

const DEV_JWT_SECRET: &str = "replace_with_strong_secret_for_hs512_signing_key";

/// Client registration for one social login provider.
///
/// The endpoint URIs are optional overrides; when unset the provider's
/// public endpoints are used.
#[derive(Debug, Clone, Default)]
pub struct ProviderCredentials {
    pub client_id: String,
    pub client_secret: String,
    pub authorization_uri: Option<String>,
    pub token_uri: Option<String>,
    pub user_info_uri: Option<String>,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub database_url: String,
    pub port: u16,
    pub jwt_secret: String,
    pub token_validity_seconds: i64,
    pub cors_origins: Vec<String>,
    /// Front-end page that receives the token after a social login
    pub oauth2_success_redirect: String,
    /// Base of the redirect URI registered with each provider; the provider
    /// name is appended as the last path segment
    pub oauth2_callback_base: String,
    pub kakao: Option<ProviderCredentials>,
    pub naver: Option<ProviderCredentials>,
}

impl AppConfig {
    pub fn from_env() -> Self {
        let database_url =
            env::var("DATABASE_URL").unwrap_or_else(|_| "sqlite://mindset.db".to_string());

        let port = env::var("PORT")
            .ok()
            .and_then(|p| p.parse::<u16>().ok())
            .unwrap_or(8080);

        let jwt_secret = match env::var("JWT_SECRET") {
            Ok(secret) if !secret.trim().is_empty() => secret,
            _ => {
                warn!("JWT_SECRET is not set, using the development signing key");
                DEV_JWT_SECRET.to_string()
            }
        };

        let token_validity_seconds = env::var("JWT_TOKEN_VALIDITY_SECONDS")
            .ok()
            .and_then(|v| v.parse::<i64>().ok())
            .filter(|v| *v > 0)
            .unwrap_or(3600);

        let cors_origins = env::var("CORS_ORIGINS")
            .unwrap_or_else(|_| "http://localhost:5173,http://localhost:3000".to_string())
            .split(',')
            .map(|origin| origin.trim().to_string())
            .filter(|origin| !origin.is_empty())
            .collect();

        let oauth2_success_redirect = env::var("OAUTH2_SUCCESS_REDIRECT")
            .unwrap_or_else(|_| "http://localhost:5173/oauth/callback".to_string());

        let oauth2_callback_base = env::var("OAUTH2_CALLBACK_BASE")
            .unwrap_or_else(|_| "http://localhost:8080/login/oauth2/code".to_string());

        Self {
            database_url,
            port,
            jwt_secret,
            token_validity_seconds,
            cors_origins,
            oauth2_success_redirect,
            oauth2_callback_base: oauth2_callback_base.trim_end_matches('/').to_string(),
            kakao: provider_from_env("KAKAO"),
            naver: provider_from_env("NAVER"),
        }
    }
}

fn provider_from_env(prefix: &str) -> Option<ProviderCredentials> {
    let client_id = env::var(format!("{}_CLIENT_ID", prefix)).ok()?;
    if client_id.trim().is_empty() {
        return None;
    }
    let client_secret = env::var(format!("{}_CLIENT_SECRET", prefix)).unwrap_or_default();

    let uri_override = |name: &str| {
        env::var(format!("{}_{}", prefix, name))
            .ok()
            .map(|uri| uri.trim().to_string())
            .filter(|uri| !uri.is_empty())
    };

    Some(ProviderCredentials {
        client_id,
        client_secret,
        authorization_uri: uri_override("AUTHORIZATION_URI"),
        token_uri: uri_override("TOKEN_URI"),
        user_info_uri: uri_override("USER_INFO_URI"),
    })
}

#[cfg(test)]
impl AppConfig {
    /// Configuration for tests; never touches the process environment
    pub fn for_tests() -> Self {
        Self {
            database_url: "sqlite::memory:".to_string(),
            port: 0,
            jwt_secret: "test_secret_key_that_is_long_enough_for_hs512".to_string(),
            token_validity_seconds: 3600,
            cors_origins: vec!["http://localhost:5173".to_string()],
            oauth2_success_redirect: "http://localhost:5173/oauth/callback".to_string(),
            oauth2_callback_base: "http://localhost:8080/login/oauth2/code".to_string(),
            kakao: Some(ProviderCredentials {
                client_id: "kakao-client".to_string(),
                client_secret: "kakao-secret".to_string(),
                ..Default::default()
            }),
            naver: None,
        }
    }
}
