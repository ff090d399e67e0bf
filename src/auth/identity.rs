//! Maps an authenticated principal to its persisted account

use tracing::warn;

use super::models::User;
use super::principal::Principal;
use super::store::UserStore;
use crate::common::{safe_email_log, ApiError};

/// Loads the account the principal speaks for.
///
/// Local principals are keyed by email, social principals by their provider
/// identity. A principal whose account no longer exists is unauthenticated.
pub async fn resolve_current_user(
    store: &UserStore,
    principal: &Principal,
) -> Result<User, ApiError> {
    let user = match principal {
        Principal::Local { email, .. } => store.find_by_email(email).await?,
        Principal::Social {
            provider,
            external_id,
            ..
        } => store.find_by_provider(provider.as_str(), external_id).await?,
    };

    user.ok_or_else(|| {
        match principal {
            Principal::Local { email, .. } => {
                warn!(email = %safe_email_log(email), "Authenticated principal has no account")
            }
            Principal::Social {
                provider,
                external_id,
                ..
            } => warn!(
                provider = %provider.as_str(),
                external_id = %external_id,
                "Authenticated social principal has no linked account"
            ),
        }
        ApiError::Unauthorized("user not found".to_string())
    })
}
