//! Supported social login providers and their user-info formats

use serde_json::Value;
use std::fmt;
use std::str::FromStr;

use crate::common::ApiError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Provider {
    Kakao,
    Naver,
}

/// OAuth2 endpoints for one provider
#[derive(Debug, Clone, Copy)]
pub struct ProviderEndpoints<'a> {
    pub authorize: &'a str,
    pub token: &'a str,
    pub user_info: &'a str,
}

/// Provider user, normalized to the fields an account needs
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OAuthProfile {
    pub provider: Provider,
    pub external_id: String,
    pub email: String,
    pub nickname: String,
    pub profile_image: Option<String>,
}

impl Provider {
    /// Tag stored in `users.oauth_provider` and in the token's `provider` claim
    pub fn as_str(&self) -> &'static str {
        match self {
            Provider::Kakao => "KAKAO",
            Provider::Naver => "NAVER",
        }
    }

    /// Lower-case registration id used in URLs
    pub fn registration_id(&self) -> &'static str {
        match self {
            Provider::Kakao => "kakao",
            Provider::Naver => "naver",
        }
    }

    /// Public endpoints of the provider's production service
    pub fn endpoints(&self) -> ProviderEndpoints<'static> {
        match self {
            Provider::Kakao => ProviderEndpoints {
                authorize: "https://kauth.kakao.com/oauth/authorize",
                token: "https://kauth.kakao.com/oauth/token",
                user_info: "https://kapi.kakao.com/v2/user/me",
            },
            Provider::Naver => ProviderEndpoints {
                authorize: "https://nid.naver.com/oauth2.0/authorize",
                token: "https://nid.naver.com/oauth2.0/token",
                user_info: "https://openapi.naver.com/v1/nid/me",
            },
        }
    }

    /// Address used when the provider does not share the user's email.
    pub fn placeholder_email(&self, external_id: &str) -> String {
        format!("{}@{}.com", external_id, self.registration_id())
    }

    /// Extracts the normalized profile from the provider's user-info payload.
    ///
    /// A missing email becomes `{id}@{registration_id}.com` and a missing
    /// nickname becomes `{registration_id}_{id}`.
    pub fn normalize(&self, attributes: &Value) -> Result<OAuthProfile, ApiError> {
        let (id, email, nickname, profile_image) = match self {
            Provider::Kakao => {
                let account = &attributes["kakao_account"];
                let profile = &account["profile"];
                (
                    scalar_string(&attributes["id"]),
                    non_empty(&account["email"]),
                    non_empty(&profile["nickname"])
                        .or_else(|| non_empty(&attributes["properties"]["nickname"])),
                    non_empty(&profile["profile_image_url"]),
                )
            }
            Provider::Naver => {
                let response = &attributes["response"];
                (
                    scalar_string(&response["id"]),
                    non_empty(&response["email"]),
                    non_empty(&response["nickname"]),
                    non_empty(&response["profile_image"]),
                )
            }
        };

        let external_id = id.ok_or_else(|| {
            ApiError::Unauthorized(format!(
                "{} user info did not include an id",
                self.registration_id()
            ))
        })?;

        Ok(OAuthProfile {
            provider: *self,
            email: email.unwrap_or_else(|| self.placeholder_email(&external_id)),
            nickname: nickname
                .unwrap_or_else(|| format!("{}_{}", self.registration_id(), external_id)),
            profile_image,
            external_id,
        })
    }
}

impl FromStr for Provider {
    type Err = ApiError;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        match name.trim().to_ascii_lowercase().as_str() {
            "kakao" => Ok(Provider::Kakao),
            "naver" => Ok(Provider::Naver),
            _ => Err(ApiError::UnsupportedProvider(name.to_string())),
        }
    }
}

impl fmt::Display for Provider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Kakao sends numeric ids, Naver sends strings
fn scalar_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

fn non_empty(value: &Value) -> Option<String> {
    value
        .as_str()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}
