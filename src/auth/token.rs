//! Signed, time-limited identity tokens (HS512 JWT)

use chrono::Utc;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use tracing::{debug, error};

use super::models::Claims;
use super::principal::Principal;
use crate::common::{safe_token_log, ApiError};

const ALGORITHM: Algorithm = Algorithm::HS512;

/// Issues and verifies bearer tokens with one symmetric key.
///
/// Expiry is checked here against an explicit clock instead of inside
/// `jsonwebtoken`, so `verify_at` is a pure function of `(token, now)`.
pub struct TokenService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validity_seconds: i64,
}

impl TokenService {
    pub fn new(secret: &str, validity_seconds: i64) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            validity_seconds,
        }
    }

    pub fn validity_seconds(&self) -> i64 {
        self.validity_seconds
    }

    /// Issues a token for `subject` carrying the comma-joined `authorities`.
    pub fn issue(&self, subject: &str, authorities: &[String]) -> Result<String, ApiError> {
        self.issue_at(subject, authorities, None, Utc::now().timestamp())
    }

    /// Issues a token whose claims reproduce `principal` when parsed.
    pub fn issue_for(&self, principal: &Principal) -> Result<String, ApiError> {
        self.issue_at(
            principal.subject(),
            principal.authorities(),
            principal.provider().map(|p| p.as_str()),
            Utc::now().timestamp(),
        )
    }

    pub fn issue_at(
        &self,
        subject: &str,
        authorities: &[String],
        provider: Option<&str>,
        issued_at: i64,
    ) -> Result<String, ApiError> {
        let claims = Claims {
            sub: subject.to_string(),
            auth: authorities.join(","),
            iat: issued_at,
            exp: issued_at + self.validity_seconds,
            provider: provider.map(str::to_string),
        };

        encode(&Header::new(ALGORITHM), &claims, &self.encoding_key).map_err(|e| {
            error!(error = %e, "JWT encoding error");
            ApiError::InternalServer("jwt error".to_string())
        })
    }

    /// True iff the signature matches and the token has not expired.
    pub fn verify(&self, token: &str) -> bool {
        self.verify_at(token, Utc::now().timestamp())
    }

    pub fn verify_at(&self, token: &str, now: i64) -> bool {
        self.parse_claims_at(token, now).is_some()
    }

    /// Subject of a valid token; `None` for anything that fails verification.
    pub fn parse_subject(&self, token: &str) -> Option<String> {
        self.parse_claims(token).map(|claims| claims.sub)
    }

    pub fn parse_claims(&self, token: &str) -> Option<Claims> {
        self.parse_claims_at(token, Utc::now().timestamp())
    }

    pub fn parse_claims_at(&self, token: &str, now: i64) -> Option<Claims> {
        let mut validation = Validation::new(ALGORITHM);
        validation.validate_exp = false;
        validation.leeway = 0;
        validation.set_required_spec_claims(&["sub", "exp"]);

        let claims = match decode::<Claims>(token, &self.decoding_key, &validation) {
            Ok(data) => data.claims,
            Err(e) => {
                debug!(error = %e, token = %safe_token_log(token), "JWT token validation failed");
                return None;
            }
        };

        if now >= claims.exp {
            debug!(
                token = %safe_token_log(token),
                exp = claims.exp,
                now = now,
                "JWT token expired"
            );
            return None;
        }

        Some(claims)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::oauth2::Provider;

    const SECRET: &str = "test_secret_key_that_is_long_enough_for_hs512";

    fn roles() -> Vec<String> {
        vec!["ROLE_USER".to_string()]
    }

    #[test]
    fn test_issue_then_verify() {
        let service = TokenService::new(SECRET, 3600);
        let token = service.issue("a@x.com", &roles()).unwrap();

        assert!(service.verify(&token));
        assert_eq!(service.parse_subject(&token), Some("a@x.com".to_string()));
    }

    #[test]
    fn test_claims_carry_authorities_and_window() {
        let service = TokenService::new(SECRET, 600);
        let authorities = vec!["ROLE_USER".to_string(), "ROLE_ADMIN".to_string()];
        let token = service
            .issue_at("a@x.com", &authorities, None, 1_700_000_000)
            .unwrap();

        let claims = service.parse_claims_at(&token, 1_700_000_001).unwrap();
        assert_eq!(claims.auth, "ROLE_USER,ROLE_ADMIN");
        assert_eq!(claims.authorities(), authorities);
        assert_eq!(claims.iat, 1_700_000_000);
        assert_eq!(claims.exp, 1_700_000_600);
        assert_eq!(claims.provider, None);
    }

    #[test]
    fn test_expired_token_is_rejected() {
        let service = TokenService::new(SECRET, 60);
        let issued_at = 1_700_000_000;
        let token = service.issue_at("a@x.com", &roles(), None, issued_at).unwrap();

        assert!(service.verify_at(&token, issued_at + 59));
        assert!(!service.verify_at(&token, issued_at + 60));
        assert!(!service.verify_at(&token, issued_at + 61));
    }

    #[test]
    fn test_token_issued_long_ago_fails_with_system_clock() {
        let service = TokenService::new(SECRET, 60);
        let token = service
            .issue_at("a@x.com", &roles(), None, Utc::now().timestamp() - 120)
            .unwrap();

        assert!(!service.verify(&token));
        assert_eq!(service.parse_subject(&token), None);
    }

    #[test]
    fn test_wrong_secret_is_rejected() {
        let issuer = TokenService::new(SECRET, 3600);
        let other = TokenService::new("a_completely_different_secret_value", 3600);
        let token = issuer.issue("a@x.com", &roles()).unwrap();

        assert!(!other.verify(&token));
    }

    #[test]
    fn test_tampered_signature_is_rejected() {
        let service = TokenService::new(SECRET, 3600);
        let token = service.issue("a@x.com", &roles()).unwrap();
        let signature_start = token.rfind('.').unwrap() + 1;

        // The final character may only carry padding bits, so it is skipped
        for index in signature_start..token.len() - 1 {
            let mut bytes = token.clone().into_bytes();
            bytes[index] = if bytes[index] == b'A' { b'B' } else { b'A' };
            let tampered = String::from_utf8(bytes).unwrap();

            assert!(
                !service.verify(&tampered),
                "tampering at byte {} should invalidate the token",
                index
            );
        }
    }

    #[test]
    fn test_malformed_tokens_are_rejected() {
        let service = TokenService::new(SECRET, 3600);
        let token = service.issue("a@x.com", &roles()).unwrap();

        assert!(!service.verify(""));
        assert!(!service.verify("not-a-jwt"));
        assert!(!service.verify(&token[..token.len() / 2]));
        assert_eq!(service.parse_subject("garbage.garbage.garbage"), None);
    }

    #[test]
    fn test_social_principal_round_trip() {
        let service = TokenService::new(SECRET, 3600);
        let principal = Principal::Social {
            provider: Provider::Kakao,
            external_id: "123".to_string(),
            authorities: roles(),
        };

        let token = service.issue_for(&principal).unwrap();
        let claims = service.parse_claims(&token).unwrap();

        assert_eq!(claims.sub, "123");
        assert_eq!(claims.provider.as_deref(), Some("KAKAO"));
        assert_eq!(Principal::from_claims(&claims).unwrap(), principal);
    }
}
