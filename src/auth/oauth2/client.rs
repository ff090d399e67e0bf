//! HTTP client for the provider side of the authorization-code flow

use chrono::Utc;
use reqwest::Client;
use serde::Deserialize;
use serde_json::Value;
use std::collections::HashMap;
use thiserror::Error;
use tokio::sync::Mutex;
use tracing::{debug, error, info, warn};

use super::provider::{Provider, ProviderEndpoints};
use crate::common::config::{AppConfig, ProviderCredentials};
use crate::common::ApiError;

/// How long an issued `state` nonce stays redeemable
const STATE_TTL_SECONDS: i64 = 600;

/// Upper bound on outstanding `state` nonces; the oldest go first
const MAX_PENDING_STATES: usize = 1024;

#[derive(Debug, Error)]
pub enum OAuthError {
    #[error("{0} login is not configured")]
    NotConfigured(Provider),

    #[error("unknown or expired state")]
    InvalidState,

    #[error("provider rejected the request: {0}")]
    ProviderRejected(String),

    #[error("HTTP request failed: {0}")]
    RequestFailed(String),

    #[error("Serialization error: {0}")]
    SerializationError(String),
}

impl From<OAuthError> for ApiError {
    fn from(e: OAuthError) -> Self {
        match e {
            OAuthError::NotConfigured(provider) => {
                ApiError::ServiceUnavailable(format!("{} login is not configured", provider))
            }
            OAuthError::RequestFailed(_) => {
                ApiError::ServiceUnavailable("social login provider unavailable".to_string())
            }
            OAuthError::InvalidState
            | OAuthError::ProviderRejected(_)
            | OAuthError::SerializationError(_) => {
                ApiError::Unauthorized("social login failed".to_string())
            }
        }
    }
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: Option<String>,
    error: Option<String>,
    error_description: Option<String>,
}

#[derive(Debug, Clone, Copy)]
struct PendingAuthorization {
    provider: Provider,
    issued_at: i64,
}

/// Talks to Kakao and Naver and remembers the `state` nonces it handed out.
pub struct OAuthClient {
    http: Client,
    kakao: Option<ProviderCredentials>,
    naver: Option<ProviderCredentials>,
    callback_base: String,
    pending: Mutex<HashMap<String, PendingAuthorization>>,
    max_pending: usize,
}

impl OAuthClient {
    pub fn new(http: Client, config: &AppConfig) -> Self {
        Self {
            http,
            kakao: config.kakao.clone(),
            naver: config.naver.clone(),
            callback_base: config.oauth2_callback_base.clone(),
            pending: Mutex::new(HashMap::new()),
            max_pending: MAX_PENDING_STATES,
        }
    }

    fn credentials(&self, provider: Provider) -> Result<&ProviderCredentials, OAuthError> {
        match provider {
            Provider::Kakao => self.kakao.as_ref(),
            Provider::Naver => self.naver.as_ref(),
        }
        .ok_or(OAuthError::NotConfigured(provider))
    }

    /// Endpoints for `provider`, with any configured overrides applied
    fn endpoints(&self, provider: Provider) -> Result<ProviderEndpoints<'_>, OAuthError> {
        let credentials = self.credentials(provider)?;
        let defaults = provider.endpoints();

        Ok(ProviderEndpoints {
            authorize: credentials
                .authorization_uri
                .as_deref()
                .unwrap_or(defaults.authorize),
            token: credentials.token_uri.as_deref().unwrap_or(defaults.token),
            user_info: credentials
                .user_info_uri
                .as_deref()
                .unwrap_or(defaults.user_info),
        })
    }

    /// Redirect URI registered with the provider for this application
    pub fn redirect_uri(&self, provider: Provider) -> String {
        format!("{}/{}", self.callback_base, provider.registration_id())
    }

    /// Builds the provider's authorization URL with a fresh `state` nonce.
    pub async fn authorization_url(&self, provider: Provider) -> Result<String, OAuthError> {
        let credentials = self.credentials(provider)?;
        let endpoints = self.endpoints(provider)?;
        let state = self.issue_state(provider, Utc::now().timestamp()).await;

        let url = format!(
            "{}?response_type=code&client_id={}&redirect_uri={}&state={}",
            endpoints.authorize,
            urlencoding::encode(&credentials.client_id),
            urlencoding::encode(&self.redirect_uri(provider)),
            urlencoding::encode(&state)
        );

        debug!(provider = %provider, "Generated OAuth2 authorization URL");
        Ok(url)
    }

    async fn issue_state(&self, provider: Provider, now: i64) -> String {
        let state = uuid::Uuid::new_v4().simple().to_string();
        let mut pending = self.pending.lock().await;

        pending.retain(|_, entry| now - entry.issued_at < STATE_TTL_SECONDS);

        if pending.len() >= self.max_pending {
            warn!(
                outstanding = pending.len(),
                "Too many pending OAuth2 states, evicting the oldest"
            );
        }
        while pending.len() >= self.max_pending {
            let oldest = pending
                .iter()
                .min_by_key(|(_, entry)| entry.issued_at)
                .map(|(key, _)| key.clone());
            match oldest {
                Some(key) => {
                    pending.remove(&key);
                }
                None => break,
            }
        }

        pending.insert(
            state.clone(),
            PendingAuthorization {
                provider,
                issued_at: now,
            },
        );

        state
    }

    /// Redeems a `state` nonce. Each nonce works once, for the provider it was
    /// issued for, within its time window.
    pub async fn consume_state(&self, provider: Provider, state: &str) -> Result<(), OAuthError> {
        self.consume_state_at(provider, state, Utc::now().timestamp())
            .await
    }

    async fn consume_state_at(
        &self,
        provider: Provider,
        state: &str,
        now: i64,
    ) -> Result<(), OAuthError> {
        let entry = self.pending.lock().await.remove(state);

        match entry {
            Some(entry)
                if entry.provider == provider && now - entry.issued_at < STATE_TTL_SECONDS =>
            {
                Ok(())
            }
            _ => {
                warn!(provider = %provider, "OAuth2 callback with unknown or expired state");
                Err(OAuthError::InvalidState)
            }
        }
    }

    /// Trades an authorization code for a provider access token.
    pub async fn exchange_code(
        &self,
        provider: Provider,
        code: &str,
        state: &str,
    ) -> Result<String, OAuthError> {
        let credentials = self.credentials(provider)?;
        let endpoints = self.endpoints(provider)?;
        let redirect_uri = self.redirect_uri(provider);

        let params = [
            ("grant_type", "authorization_code"),
            ("client_id", credentials.client_id.as_str()),
            ("client_secret", credentials.client_secret.as_str()),
            ("redirect_uri", redirect_uri.as_str()),
            ("code", code),
            ("state", state),
        ];

        debug!(provider = %provider, "Exchanging authorization code for access token");

        let response = self
            .http
            .post(endpoints.token)
            .form(&params)
            .send()
            .await
            .map_err(|e| OAuthError::RequestFailed(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            error!(provider = %provider, status = %status, error = %error_text, "Token exchange failed");
            return Err(OAuthError::ProviderRejected(format!(
                "HTTP {}: {}",
                status, error_text
            )));
        }

        let token_response = response
            .json::<TokenResponse>()
            .await
            .map_err(|e| OAuthError::SerializationError(e.to_string()))?;

        match token_response.access_token {
            Some(access_token) => {
                info!(provider = %provider, "Authorization code exchanged");
                Ok(access_token)
            }
            None => {
                let reason = token_response
                    .error_description
                    .or(token_response.error)
                    .unwrap_or_else(|| "no access token in response".to_string());
                error!(provider = %provider, error = %reason, "Token exchange returned no access token");
                Err(OAuthError::ProviderRejected(reason))
            }
        }
    }

    /// Fetches the raw user-info document for an access token.
    pub async fn fetch_user_info(
        &self,
        provider: Provider,
        access_token: &str,
    ) -> Result<Value, OAuthError> {
        let endpoints = self.endpoints(provider)?;

        let response = self
            .http
            .get(endpoints.user_info)
            .bearer_auth(access_token)
            .send()
            .await
            .map_err(|e| OAuthError::RequestFailed(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            warn!(provider = %provider, status = %status, "User info request rejected");
            return Err(OAuthError::ProviderRejected(format!("HTTP {}", status)));
        }

        response
            .json::<Value>()
            .await
            .map_err(|e| OAuthError::SerializationError(e.to_string()))
    }
}
