//! User persistence used by authentication, social login and the profile API

use sqlx::SqlitePool;
use tracing::{error, info};

use super::models::{NewUser, User};
use crate::common::{now_rfc3339, safe_email_log, ApiError};

const USER_COLUMNS: &str = r#"
    user_id, email, password, nickname, gender, phone, address, address_detail,
    post_code, profile_image, role, oauth_provider, oauth_provider_id,
    created_at, updated_at
"#;

/// Profile fields a user may change about themselves
#[derive(Debug, Default, Clone)]
pub struct ProfileChanges {
    pub nickname: Option<String>,
    pub gender: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub address_detail: Option<String>,
    pub post_code: Option<String>,
    pub profile_image: Option<String>,
}

#[derive(Clone)]
pub struct UserStore {
    db: SqlitePool,
}

impl UserStore {
    pub fn new(db: SqlitePool) -> Self {
        Self { db }
    }

    pub async fn find_by_id(&self, user_id: i64) -> Result<Option<User>, ApiError> {
        sqlx::query_as::<_, User>(&format!("SELECT {} FROM users WHERE user_id = ?", USER_COLUMNS))
            .bind(user_id)
            .fetch_optional(&self.db)
            .await
            .map_err(ApiError::DatabaseError)
    }

    pub async fn find_by_email(&self, email: &str) -> Result<Option<User>, ApiError> {
        sqlx::query_as::<_, User>(&format!("SELECT {} FROM users WHERE email = ?", USER_COLUMNS))
            .bind(email)
            .fetch_optional(&self.db)
            .await
            .map_err(|e| {
                error!(
                    error = %e,
                    email = %safe_email_log(email),
                    "Database error during user lookup by email"
                );
                ApiError::DatabaseError(e)
            })
    }

    /// Looks up the account linked to a provider identity, e.g. `("KAKAO", "123")`.
    pub async fn find_by_provider(
        &self,
        provider: &str,
        provider_id: &str,
    ) -> Result<Option<User>, ApiError> {
        sqlx::query_as::<_, User>(&format!(
            "SELECT {} FROM users WHERE oauth_provider = ? AND oauth_provider_id = ?",
            USER_COLUMNS
        ))
        .bind(provider)
        .bind(provider_id)
        .fetch_optional(&self.db)
        .await
        .map_err(ApiError::DatabaseError)
    }

    /// Inserts a user. A taken email surfaces as `Conflict`.
    pub async fn insert(&self, new_user: NewUser) -> Result<User, ApiError> {
        let now = now_rfc3339();

        let result = sqlx::query(
            r#"
            INSERT INTO users (
                email, password, nickname, gender, phone, address, address_detail,
                post_code, profile_image, role, oauth_provider, oauth_provider_id,
                created_at, updated_at
            )
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&new_user.email)
        .bind(&new_user.password_hash)
        .bind(&new_user.nickname)
        .bind(&new_user.gender)
        .bind(&new_user.phone)
        .bind(&new_user.address)
        .bind(&new_user.address_detail)
        .bind(&new_user.post_code)
        .bind(&new_user.profile_image)
        .bind(&new_user.role)
        .bind(&new_user.oauth_provider)
        .bind(&new_user.oauth_provider_id)
        .bind(&now)
        .bind(&now)
        .execute(&self.db)
        .await
        .map_err(|e| ApiError::from_unique_violation(e, "email already registered"))?;

        let user_id = result.last_insert_rowid();
        info!(
            user_id = user_id,
            email = %safe_email_log(&new_user.email),
            provider = ?new_user.oauth_provider,
            "User created"
        );

        self.require(user_id).await
    }

    /// Records `(provider, provider_id)` on an existing account and refreshes
    /// its profile image when the provider supplied one.
    pub async fn link_provider(
        &self,
        user_id: i64,
        provider: &str,
        provider_id: &str,
        profile_image: Option<&str>,
    ) -> Result<User, ApiError> {
        let profile_image = profile_image.filter(|url| !url.is_empty());

        sqlx::query(
            r#"
            UPDATE users
            SET oauth_provider = ?,
                oauth_provider_id = ?,
                profile_image = COALESCE(?, profile_image),
                updated_at = ?
            WHERE user_id = ?
            "#,
        )
        .bind(provider)
        .bind(provider_id)
        .bind(profile_image)
        .bind(now_rfc3339())
        .bind(user_id)
        .execute(&self.db)
        .await
        .map_err(|e| {
            ApiError::from_unique_violation(e, "social account already linked to another user")
        })?;

        info!(user_id = user_id, provider = %provider, "Linked social login to account");
        self.require(user_id).await
    }

    /// Replaces the login email, e.g. once a provider starts sharing the
    /// real address.
    pub async fn update_email(&self, user_id: i64, email: &str) -> Result<(), ApiError> {
        sqlx::query("UPDATE users SET email = ?, updated_at = ? WHERE user_id = ?")
            .bind(email)
            .bind(now_rfc3339())
            .bind(user_id)
            .execute(&self.db)
            .await
            .map_err(|e| ApiError::from_unique_violation(e, "email already registered"))?;

        info!(user_id = user_id, email = %safe_email_log(email), "Account email updated");
        Ok(())
    }

    /// Applies the fields present in `changes`; absent fields keep their value.
    pub async fn update_profile(
        &self,
        user_id: i64,
        changes: ProfileChanges,
    ) -> Result<User, ApiError> {
        let result = sqlx::query(
            r#"
            UPDATE users
            SET nickname = COALESCE(?, nickname),
                gender = COALESCE(?, gender),
                phone = COALESCE(?, phone),
                address = COALESCE(?, address),
                address_detail = COALESCE(?, address_detail),
                post_code = COALESCE(?, post_code),
                profile_image = COALESCE(?, profile_image),
                updated_at = ?
            WHERE user_id = ?
            "#,
        )
        .bind(&changes.nickname)
        .bind(&changes.gender)
        .bind(&changes.phone)
        .bind(&changes.address)
        .bind(&changes.address_detail)
        .bind(&changes.post_code)
        .bind(&changes.profile_image)
        .bind(now_rfc3339())
        .bind(user_id)
        .execute(&self.db)
        .await
        .map_err(ApiError::DatabaseError)?;

        if result.rows_affected() == 0 {
            return Err(ApiError::NotFound("user not found".to_string()));
        }

        self.require(user_id).await
    }

    /// Deletes the account; owned rows go with it through the foreign keys.
    pub async fn delete(&self, user_id: i64) -> Result<(), ApiError> {
        let result = sqlx::query("DELETE FROM users WHERE user_id = ?")
            .bind(user_id)
            .execute(&self.db)
            .await
            .map_err(ApiError::DatabaseError)?;

        if result.rows_affected() == 0 {
            return Err(ApiError::NotFound("user not found".to_string()));
        }

        info!(user_id = user_id, "User deleted");
        Ok(())
    }

    async fn require(&self, user_id: i64) -> Result<User, ApiError> {
        self.find_by_id(user_id)
            .await?
            .ok_or_else(|| ApiError::NotFound("user not found".to_string()))
    }
}
