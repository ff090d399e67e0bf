//! Request-scoped identity established by the authentication filter

use super::models::Claims;
use super::oauth2::Provider;
use crate::common::ApiError;

/// Who a verified token speaks for.
///
/// Built once at the authentication boundary; everything downstream matches
/// on the variant instead of guessing what the subject string means.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Principal {
    /// Email/password login; the subject is the account email
    Local {
        email: String,
        authorities: Vec<String>,
    },
    /// Social login; the subject is the provider's user id
    Social {
        provider: Provider,
        external_id: String,
        authorities: Vec<String>,
    },
}

impl Principal {
    pub fn from_claims(claims: &Claims) -> Result<Self, ApiError> {
        let authorities = claims.authorities();

        match claims.provider.as_deref() {
            None => Ok(Principal::Local {
                email: claims.sub.clone(),
                authorities,
            }),
            Some(tag) => Ok(Principal::Social {
                provider: tag.parse()?,
                external_id: claims.sub.clone(),
                authorities,
            }),
        }
    }

    pub fn subject(&self) -> &str {
        match self {
            Principal::Local { email, .. } => email,
            Principal::Social { external_id, .. } => external_id,
        }
    }

    pub fn authorities(&self) -> &[String] {
        match self {
            Principal::Local { authorities, .. } | Principal::Social { authorities, .. } => {
                authorities
            }
        }
    }

    pub fn provider(&self) -> Option<Provider> {
        match self {
            Principal::Local { .. } => None,
            Principal::Social { provider, .. } => Some(*provider),
        }
    }

    pub fn has_authority(&self, authority: &str) -> bool {
        self.authorities().iter().any(|a| a == authority)
    }
}
