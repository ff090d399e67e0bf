use std::sync::Arc;
use tracing::{info, warn};

use super::models::{AuthResponse, LoginRequest, NewUser, SignupRequest, User, DEFAULT_ROLE};
use super::oauth2::{reconcile, OAuthClient, Provider};
use super::password::{hash_password_blocking, verify_password_blocking};
use super::principal::Principal;
use super::store::UserStore;
use super::token::TokenService;
use crate::common::{safe_email_log, ApiError, Validator};

const INVALID_CREDENTIALS: &str = "invalid email or password";

/// Local signup/login and the account side of social login
pub struct AuthService {
    store: UserStore,
    tokens: Arc<TokenService>,
}

impl AuthService {
    pub fn new(store: UserStore, tokens: Arc<TokenService>) -> Self {
        Self { store, tokens }
    }

    /// Registers a local account. The password is stored only as a hash.
    pub async fn signup(&self, request: SignupRequest) -> Result<User, ApiError> {
        request.validate(&request).into_result()?;

        let email = request.email.trim().to_string();
        if self.store.find_by_email(&email).await?.is_some() {
            warn!(email = %safe_email_log(&email), "Signup with an email that is already registered");
            return Err(ApiError::Conflict("email already registered".to_string()));
        }

        let password_hash = hash_password_blocking(request.password).await?;

        self.store
            .insert(NewUser {
                email,
                password_hash,
                nickname: request.nickname.trim().to_string(),
                gender: request.gender,
                phone: request.phone,
                address: request.address,
                address_detail: request.address_detail,
                post_code: request.post_code,
                profile_image: request.profile_image,
                role: DEFAULT_ROLE.to_string(),
                ..Default::default()
            })
            .await
    }

    /// Checks credentials and issues a token whose subject is the email.
    ///
    /// Unknown emails and wrong passwords fail identically.
    pub async fn login(&self, request: LoginRequest) -> Result<AuthResponse, ApiError> {
        request.validate(&request).into_result()?;

        let email = request.email.trim();
        let user = self.store.find_by_email(email).await?;
        let stored_hash = user.as_ref().map(|u| u.password.clone());

        if !verify_password_blocking(request.password, stored_hash).await {
            warn!(email = %safe_email_log(email), "Login failed");
            return Err(ApiError::Unauthorized(INVALID_CREDENTIALS.to_string()));
        }

        let user = user.ok_or_else(|| ApiError::Unauthorized(INVALID_CREDENTIALS.to_string()))?;
        let principal = Principal::Local {
            email: user.email.clone(),
            authorities: vec![user.role.clone()],
        };
        let token = self.tokens.issue_for(&principal)?;

        info!(user_id = user.user_id, email = %safe_email_log(&user.email), "Login successful");

        Ok(AuthResponse {
            token,
            user_id: user.user_id,
            email: user.email,
            nickname: user.nickname,
            profile_image: user.profile_image,
            role: user.role,
        })
    }

    /// Completes a social login: redeems the state, fetches the provider
    /// profile, reconciles it with the local accounts and issues a token for
    /// the provider identity.
    pub async fn oauth_login(
        &self,
        client: &OAuthClient,
        provider: Provider,
        code: &str,
        state: &str,
    ) -> Result<(User, String), ApiError> {
        client.consume_state(provider, state).await?;

        let access_token = client.exchange_code(provider, code, state).await?;
        let attributes = client.fetch_user_info(provider, &access_token).await?;
        let profile = provider.normalize(&attributes)?;

        let user = reconcile(&self.store, &profile).await?;
        let token = self.issue_social_token(&user, provider, &profile.external_id)?;

        info!(
            user_id = user.user_id,
            provider = %provider,
            "Social login successful"
        );

        Ok((user, token))
    }

    pub fn issue_social_token(
        &self,
        user: &User,
        provider: Provider,
        external_id: &str,
    ) -> Result<String, ApiError> {
        self.tokens.issue_for(&Principal::Social {
            provider,
            external_id: external_id.to_string(),
            authorities: vec![user.role.clone()],
        })
    }
}
