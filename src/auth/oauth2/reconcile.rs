//! Turns a normalized provider profile into a local account

use tracing::info;

use super::provider::OAuthProfile;
use crate::auth::models::{NewUser, User, DEFAULT_ROLE};
use crate::auth::password::placeholder_hash_blocking;
use crate::auth::store::UserStore;
use crate::common::{safe_email_log, ApiError};

/// Finds or creates the account for a social login.
///
/// An existing account with the same email is linked to the provider identity
/// (and gets the provider's profile image when one was supplied). Failing
/// that, the account already linked to `(provider, external_id)` is reused;
/// its generated `{id}@{provider}.com` address is swapped for the real one
/// once the provider starts sharing it. Otherwise a new account is created
/// with an unguessable password, so it can only be reached through the
/// provider.
pub async fn reconcile(store: &UserStore, profile: &OAuthProfile) -> Result<User, ApiError> {
    if let Some(existing) = store.find_by_email(&profile.email).await? {
        info!(
            user_id = existing.user_id,
            email = %safe_email_log(&profile.email),
            provider = %profile.provider,
            "Social login matched existing account"
        );

        return store
            .link_provider(
                existing.user_id,
                profile.provider.as_str(),
                &profile.external_id,
                profile.profile_image.as_deref(),
            )
            .await;
    }

    let provider = profile.provider.as_str();
    if let Some(linked) = store.find_by_provider(provider, &profile.external_id).await? {
        info!(
            user_id = linked.user_id,
            provider = %profile.provider,
            "Social login matched linked provider identity"
        );

        if linked.email != profile.email
            && linked.email == profile.provider.placeholder_email(&profile.external_id)
        {
            store.update_email(linked.user_id, &profile.email).await?;
        }

        return store
            .link_provider(
                linked.user_id,
                provider,
                &profile.external_id,
                profile.profile_image.as_deref(),
            )
            .await;
    }

    let password_hash = placeholder_hash_blocking().await?;

    store
        .insert(NewUser {
            email: profile.email.clone(),
            password_hash,
            nickname: profile.nickname.clone(),
            profile_image: profile.profile_image.clone(),
            role: DEFAULT_ROLE.to_string(),
            oauth_provider: Some(provider.to_string()),
            oauth_provider_id: Some(profile.external_id.clone()),
            ..Default::default()
        })
        .await
}

/// Front-end URL the browser lands on after a successful social login
pub fn success_redirect_url(base: &str, token: &str, user: &User) -> String {
    let separator = if base.contains('?') { '&' } else { '?' };

    format!(
        "{}{}token={}&userId={}&email={}&nickname={}",
        base,
        separator,
        urlencoding::encode(token),
        user.user_id,
        urlencoding::encode(&user.email),
        urlencoding::encode(&user.nickname)
    )
}
