//! Tests for auth module
//!
//! These drive the full router to cover:
//! - Local signup and login
//! - The bearer-token filter on guarded and public routes
//! - Social account reconciliation and social-token identity
//! - The OAuth2 authorization and callback entry points

#[cfg(test)]
mod tests {
    use axum::{
        body::Body,
        http::{header, Method, Request, StatusCode},
        routing::{get, post},
        Json, Router,
    };
    use chrono::Utc;
    use serde_json::{json, Value};
    use std::sync::{Arc, Mutex};
    use tokio::net::TcpListener;
    use tower::ServiceExt;

    use crate::app::testing::TestApp;
    use crate::auth::models::DEFAULT_ROLE;
    use crate::auth::oauth2::{reconcile, OAuthProfile, Provider};
    use crate::auth::Principal;
    use crate::common::config::ProviderCredentials;
    use crate::common::AppConfig;

    fn kakao_profile(nickname: &str, image: &str) -> OAuthProfile {
        OAuthProfile {
            provider: Provider::Kakao,
            external_id: "123".to_string(),
            email: "k@x.com".to_string(),
            nickname: nickname.to_string(),
            profile_image: Some(image.to_string()),
        }
    }

    /// Serves a Kakao-shaped token and user-info API on a local port. The
    /// user-info document can be swapped between logins.
    async fn spawn_kakao_stub(user_info: Arc<Mutex<Value>>) -> String {
        let stub = Router::new()
            .route(
                "/oauth/token",
                post(|| async { Json(json!({ "access_token": "stub-access-token" })) }),
            )
            .route(
                "/v2/user/me",
                get(move || {
                    let body = user_info.lock().unwrap().clone();
                    async move { Json(body) }
                }),
            );

        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, stub.into_make_service()).await.unwrap();
        });

        format!("http://{}", addr)
    }

    fn location(response: &axum::response::Response) -> String {
        response
            .headers()
            .get(header::LOCATION)
            .unwrap()
            .to_str()
            .unwrap()
            .to_string()
    }

    /// Runs authorize then callback through the router and returns the
    /// callback status and redirect target.
    async fn social_login(app: &TestApp) -> (StatusCode, String) {
        let request = Request::builder()
            .uri("/oauth2/authorization/kakao")
            .body(Body::empty())
            .unwrap();
        let response = app.router.clone().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::SEE_OTHER);

        let authorize = location(&response);
        let state = authorize
            .split('&')
            .find_map(|pair| pair.strip_prefix("state="))
            .unwrap()
            .to_string();

        let request = Request::builder()
            .uri(format!("/login/oauth2/code/kakao?code=stub-code&state={}", state))
            .body(Body::empty())
            .unwrap();
        let response = app.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let target = if status == StatusCode::SEE_OTHER {
            location(&response)
        } else {
            String::new()
        };

        (status, target)
    }

    async fn kakao_rows(app: &TestApp) -> i64 {
        sqlx::query_scalar(
            "SELECT COUNT(*) FROM users WHERE oauth_provider = 'KAKAO' AND oauth_provider_id = '123'",
        )
        .fetch_one(&app.state.db)
        .await
        .unwrap()
    }

    #[tokio::test]
    async fn test_signup_then_login() {
        let app = TestApp::new().await;

        let (status, profile) = app
            .post(
                "/api/auth/signup",
                None,
                json!({
                    "email": "new@x.com",
                    "password": "correct-horse",
                    "nickname": "newbie",
                    "gender": "F"
                }),
            )
            .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(profile["email"], "new@x.com");
        assert_eq!(profile["role"], DEFAULT_ROLE);
        assert!(profile.get("password").is_none());

        let (status, login) = app
            .post(
                "/api/auth/login",
                None,
                json!({ "email": "new@x.com", "password": "correct-horse" }),
            )
            .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(login["userId"], profile["userId"]);
        assert_eq!(login["nickname"], "newbie");

        let token = login["token"].as_str().unwrap();
        let subject = app.state.tokens.parse_subject(token).unwrap();
        assert_eq!(subject, "new@x.com");

        let (status, me) = app.get("/api/users/me", Some(token)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(me["email"], "new@x.com");
    }

    #[tokio::test]
    async fn test_duplicate_signup_conflicts() {
        let app = TestApp::new().await;
        app.user("taken@x.com").await;

        let (status, body) = app
            .post(
                "/api/auth/signup",
                None,
                json!({
                    "email": "taken@x.com",
                    "password": "correct-horse",
                    "nickname": "again"
                }),
            )
            .await;

        assert_eq!(status, StatusCode::CONFLICT);
        assert_eq!(body["code"], "CONFLICT");
    }

    #[tokio::test]
    async fn test_invalid_signup_is_rejected() {
        let app = TestApp::new().await;

        let (status, body) = app
            .post(
                "/api/auth/signup",
                None,
                json!({ "email": "not-an-email", "password": "short", "nickname": "n" }),
            )
            .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn test_login_failures_are_indistinguishable() {
        let app = TestApp::new().await;
        app.post(
            "/api/auth/signup",
            None,
            json!({ "email": "a@x.com", "password": "correct-horse", "nickname": "a" }),
        )
        .await;

        let (wrong_status, wrong_body) = app
            .post(
                "/api/auth/login",
                None,
                json!({ "email": "a@x.com", "password": "battery-staple" }),
            )
            .await;
        let (unknown_status, unknown_body) = app
            .post(
                "/api/auth/login",
                None,
                json!({ "email": "nobody@x.com", "password": "battery-staple" }),
            )
            .await;

        assert_eq!(wrong_status, StatusCode::UNAUTHORIZED);
        assert_eq!(unknown_status, StatusCode::UNAUTHORIZED);
        assert_eq!(wrong_body, unknown_body);
    }

    #[tokio::test]
    async fn test_social_reconcile_creates_then_updates() {
        let app = TestApp::new().await;
        let store = app.store();

        let created = reconcile(&store, &kakao_profile("Kim", "http://img/1"))
            .await
            .unwrap();
        assert_eq!(created.oauth_provider.as_deref(), Some("KAKAO"));
        assert_eq!(created.oauth_provider_id.as_deref(), Some("123"));
        assert_eq!(created.role, DEFAULT_ROLE);

        let again = reconcile(&store, &kakao_profile("Kim", "http://img/2"))
            .await
            .unwrap();
        assert_eq!(again.user_id, created.user_id);
        assert_eq!(again.profile_image.as_deref(), Some("http://img/2"));

        let token = app
            .state
            .tokens
            .issue_for(&Principal::Social {
                provider: Provider::Kakao,
                external_id: "123".to_string(),
                authorities: vec![DEFAULT_ROLE.to_string()],
            })
            .unwrap();

        let (status, me) = app.get("/api/users/me", Some(&token)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(me["userId"], json!(created.user_id));
        assert_eq!(me["email"], "k@x.com");
    }

    #[tokio::test]
    async fn test_social_token_without_account_is_unauthorized() {
        let app = TestApp::new().await;

        let token = app
            .state
            .tokens
            .issue_for(&Principal::Social {
                provider: Provider::Naver,
                external_id: "ghost".to_string(),
                authorities: vec![DEFAULT_ROLE.to_string()],
            })
            .unwrap();

        let (status, _) = app.get("/api/users/me", Some(&token)).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_expired_token_guarded_vs_public() {
        let app = TestApp::new().await;
        let (user, _) = app.user("a@x.com").await;

        let stale = app
            .state
            .tokens
            .issue_at(
                &user.email,
                &[DEFAULT_ROLE.to_string()],
                None,
                Utc::now().timestamp() - 2 * app.state.tokens.validity_seconds(),
            )
            .unwrap();

        let (status, _) = app.get("/api/users/me", Some(&stale)).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);

        let (status, body) = app.get("/api/test", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ok");

        // A bad token never blocks a public route
        let (status, _) = app.get("/api/test", Some(&stale)).await;
        assert_eq!(status, StatusCode::OK);
    }

    #[tokio::test]
    async fn test_token_without_user_role_is_forbidden() {
        let app = TestApp::new().await;
        let (user, _) = app.user("a@x.com").await;

        let token = app
            .state
            .tokens
            .issue_for(&Principal::Local {
                email: user.email.clone(),
                authorities: vec!["ROLE_GUEST".to_string()],
            })
            .unwrap();

        let (status, _) = app.get("/api/users/me", Some(&token)).await;
        assert_eq!(status, StatusCode::FORBIDDEN);

        // Authenticated-only routes accept any valid principal
        let (status, _) = app.send(Method::POST, "/api/auth/logout", Some(&token), None).await;
        assert_eq!(status, StatusCode::OK);
    }

    #[tokio::test]
    async fn test_logout_requires_authentication() {
        let app = TestApp::new().await;
        let (_, token) = app.user("a@x.com").await;

        let (status, _) = app
            .send(Method::POST, "/api/auth/logout", None, None)
            .await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);

        let (status, body) = app
            .send(Method::POST, "/api/auth/logout", Some(&token), None)
            .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["message"], "Logout successful");
    }

    #[tokio::test]
    async fn test_authorization_redirects() {
        let app = TestApp::new().await;

        let request = Request::builder()
            .uri("/oauth2/authorization/kakao")
            .body(Body::empty())
            .unwrap();
        let response = app.router.clone().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::SEE_OTHER);

        let location = response
            .headers()
            .get(header::LOCATION)
            .unwrap()
            .to_str()
            .unwrap();
        assert!(location.starts_with("https://kauth.kakao.com/oauth/authorize?"));
        assert!(location.contains("client_id=kakao-client"));
        assert!(location.contains("state="));

        let (status, _) = app.get("/oauth2/authorization/naver", None).await;
        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);

        let (status, body) = app.get("/oauth2/authorization/github", None).await;
        assert_eq!(status, StatusCode::FORBIDDEN);
        assert_eq!(body["code"], "UNSUPPORTED_PROVIDER");
    }

    #[tokio::test]
    async fn test_social_callback_without_email_reuses_account() {
        let user_info = Arc::new(Mutex::new(json!({
            "id": 123,
            "properties": { "nickname": "K" }
        })));
        let stub = spawn_kakao_stub(user_info.clone()).await;

        let mut config = AppConfig::for_tests();
        config.kakao = Some(ProviderCredentials {
            client_id: "kakao-client".to_string(),
            client_secret: "kakao-secret".to_string(),
            authorization_uri: Some(format!("{}/oauth/authorize", stub)),
            token_uri: Some(format!("{}/oauth/token", stub)),
            user_info_uri: Some(format!("{}/v2/user/me", stub)),
        });
        let app = TestApp::with_config(config).await;

        let (status, target) = social_login(&app).await;
        assert_eq!(status, StatusCode::SEE_OTHER);
        assert!(target.starts_with("http://localhost:5173/oauth/callback?token="));
        assert!(target.contains("email=123%40kakao.com"));
        assert_eq!(kakao_rows(&app).await, 1);

        let (status, again) = social_login(&app).await;
        assert_eq!(status, StatusCode::SEE_OTHER);
        assert!(again.contains("email=123%40kakao.com"));
        assert_eq!(kakao_rows(&app).await, 1);

        // The provider starts sharing a real address
        *user_info.lock().unwrap() = json!({
            "id": 123,
            "kakao_account": { "email": "real@x.com", "profile": { "nickname": "K" } }
        });
        let (status, shared) = social_login(&app).await;
        assert_eq!(status, StatusCode::SEE_OTHER);
        assert!(shared.contains("email=real%40x.com"));
        assert_eq!(kakao_rows(&app).await, 1);

        let token = shared
            .split(['?', '&'])
            .find_map(|pair| pair.strip_prefix("token="))
            .unwrap();
        let token = urlencoding::decode(token).unwrap().into_owned();
        let (status, me) = app.get("/api/users/me", Some(&token)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(me["email"], "real@x.com");
    }

    #[tokio::test]
    async fn test_callback_rejections() {
        let app = TestApp::new().await;

        let (status, _) = app
            .get("/login/oauth2/code/kakao?code=abc&state=forged", None)
            .await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);

        let (status, _) = app
            .get(
                "/login/oauth2/code/kakao?error=access_denied&error_description=cancelled",
                None,
            )
            .await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);

        let (status, _) = app.get("/login/oauth2/code/kakao", None).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);

        let (status, _) = app.get("/login/oauth2/code/github?code=abc&state=s", None).await;
        assert_eq!(status, StatusCode::FORBIDDEN);
    }
}
