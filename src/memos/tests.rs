//! Tests for memos module

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;
    use serde_json::json;

    use crate::app::testing::TestApp;
    use crate::auth::models::{NewUser, DEFAULT_ROLE};
    use crate::auth::UserStore;
    use crate::common::migrations::testing::setup_test_db;
    use crate::common::ApiError;
    use crate::memos::models::{MemoCountResponse, MemoRequest};
    use crate::memos::services::MemosService;

    fn memo(title: &str) -> MemoRequest {
        MemoRequest {
            title: title.to_string(),
            content: "content".to_string(),
            category: Some("daily".to_string()),
        }
    }

    #[tokio::test]
    async fn test_third_memo_is_rejected() {
        let db = setup_test_db().await;
        let user = UserStore::new(db.clone())
            .insert(NewUser {
                email: "a@x.com".to_string(),
                password_hash: "hash".to_string(),
                nickname: "a".to_string(),
                role: DEFAULT_ROLE.to_string(),
                ..Default::default()
            })
            .await
            .unwrap();
        let service = MemosService::new(db);

        service.create(user.user_id, memo("one")).await.unwrap();
        assert_eq!(
            service.count_for_user(user.user_id).await.unwrap(),
            MemoCountResponse {
                count: 1,
                can_create: true,
                limit: 2
            }
        );

        service.create(user.user_id, memo("two")).await.unwrap();
        let third = service.create(user.user_id, memo("three")).await;

        assert!(matches!(third, Err(ApiError::BadRequest(_))));
        assert_eq!(service.list_for_user(user.user_id).await.unwrap().len(), 2);
        assert!(!service.count_for_user(user.user_id).await.unwrap().can_create);
    }

    #[tokio::test]
    async fn test_memo_endpoints() {
        let app = TestApp::new().await;
        let (user, token) = app.user("a@x.com").await;

        let (status, created) = app
            .post(
                "/api/memo/save",
                Some(&token),
                json!({ "title": "groceries", "content": "eggs" }),
            )
            .await;
        assert_eq!(status, StatusCode::OK);
        let memo_id = created["memoId"].as_i64().unwrap();

        let (status, updated) = app
            .put(
                &format!("/api/memo/update/{}", memo_id),
                Some(&token),
                json!({ "title": "groceries", "content": "eggs, milk", "category": "home" }),
            )
            .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(updated["content"], "eggs, milk");
        assert_eq!(updated["category"], "home");

        let (_, count) = app
            .get(&format!("/api/memo/count/{}", user.user_id), Some(&token))
            .await;
        assert_eq!(count, json!({ "count": 1, "canCreate": true, "limit": 2 }));

        let (status, _) = app
            .delete(&format!("/api/memo/{}", memo_id), Some(&token))
            .await;
        assert_eq!(status, StatusCode::OK);

        let (_, list) = app
            .get(&format!("/api/memo/{}", user.user_id), Some(&token))
            .await;
        assert_eq!(list, json!([]));
    }

    #[tokio::test]
    async fn test_memo_limit_over_http() {
        let app = TestApp::new().await;
        let (_, token) = app.user("a@x.com").await;

        for title in ["one", "two"] {
            let (status, _) = app
                .post(
                    "/api/memo/save",
                    Some(&token),
                    json!({ "title": title, "content": "c" }),
                )
                .await;
            assert_eq!(status, StatusCode::OK);
        }

        let (status, body) = app
            .post(
                "/api/memo/save",
                Some(&token),
                json!({ "title": "three", "content": "c" }),
            )
            .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["code"], "BAD_REQUEST");
    }

    #[tokio::test]
    async fn test_other_users_memo_is_forbidden() {
        let app = TestApp::new().await;
        let (_, owner_token) = app.user("a@x.com").await;
        let (_, other_token) = app.user("b@x.com").await;

        let (_, created) = app
            .post(
                "/api/memo/save",
                Some(&owner_token),
                json!({ "title": "secret", "content": "c" }),
            )
            .await;
        let memo_id = created["memoId"].as_i64().unwrap();

        let (status, _) = app
            .get(&format!("/api/memo/detail/{}", memo_id), Some(&other_token))
            .await;
        assert_eq!(status, StatusCode::FORBIDDEN);
    }
}
