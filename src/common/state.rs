// Application state shared across all modules

use reqwest::Client;
use sqlx::SqlitePool;
use std::sync::Arc;

use super::config::AppConfig;
use crate::auth::oauth2::OAuthClient;
use crate::auth::token::TokenService;

/// Application state containing database pool, services, and configuration
#[derive(Clone)]
pub struct AppState {
    pub db: SqlitePool,
    pub config: AppConfig,
    pub tokens: Arc<TokenService>,
    pub oauth: Arc<OAuthClient>,
}

impl AppState {
    pub fn new(db: SqlitePool, http: Client, config: AppConfig) -> Self {
        let tokens = Arc::new(TokenService::new(
            &config.jwt_secret,
            config.token_validity_seconds,
        ));
        let oauth = Arc::new(OAuthClient::new(http, &config));

        Self {
            db,
            config,
            tokens,
            oauth,
        }
    }
}
