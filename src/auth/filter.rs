//! Per-request authentication filter

use axum::{
    extract::{Extension, Request},
    http::{header::AUTHORIZATION, HeaderMap},
    middleware::Next,
    response::Response,
};
use std::sync::Arc;
use tracing::{debug, warn};

use super::principal::Principal;
use super::token::TokenService;

const BEARER_PREFIX: &str = "Bearer ";

/// Establishes the request's principal from its bearer token.
///
/// Never rejects: a missing, malformed or expired token just leaves the
/// request anonymous, and route guards decide what anonymous callers may do.
pub async fn jwt_request_filter(
    Extension(tokens): Extension<Arc<TokenService>>,
    mut request: Request,
    next: Next,
) -> Response {
    request.extensions_mut().remove::<Principal>();

    if let Some(principal) = authenticate(&tokens, request.headers()) {
        let kind = match principal.provider() {
            Some(provider) => provider.as_str(),
            None => "LOCAL",
        };
        debug!(
            principal_kind = %kind,
            path = %request.uri().path(),
            "Request authenticated"
        );
        request.extensions_mut().insert(principal);
    }

    next.run(request).await
}

/// Token from an `Authorization: Bearer <token>` header, if present
pub fn resolve_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix(BEARER_PREFIX))
        .map(str::trim)
        .filter(|token| !token.is_empty())
}

pub fn authenticate(tokens: &TokenService, headers: &HeaderMap) -> Option<Principal> {
    let token = resolve_token(headers)?;
    let claims = tokens.parse_claims(token)?;

    match Principal::from_claims(&claims) {
        Ok(principal) => Some(principal),
        Err(e) => {
            warn!(error = %e, "Verified token carried an unusable principal");
            None
        }
    }
}
