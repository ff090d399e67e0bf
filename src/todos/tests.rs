//! Tests for todos module

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;
    use serde_json::json;

    use crate::app::testing::TestApp;
    use crate::common::migrations::testing::setup_test_db;
    use crate::common::ApiError;
    use crate::todos::models::CreateTodoRequest;
    use crate::todos::services::TodosService;

    #[tokio::test]
    async fn test_empty_content_is_rejected() {
        let service = TodosService::new(setup_test_db().await);

        let result = service
            .create(
                1,
                CreateTodoRequest {
                    content: "   ".to_string(),
                    is_completed: false,
                },
            )
            .await;

        assert!(matches!(result, Err(ApiError::ValidationError(_))));
    }

    #[tokio::test]
    async fn test_todo_lifecycle() {
        let app = TestApp::new().await;
        let (user, token) = app.user("a@x.com").await;

        let (status, created) = app
            .post("/api/todo/save", Some(&token), json!({ "content": "run 5k" }))
            .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(created["content"], "run 5k");
        assert_eq!(created["isCompleted"], false);
        assert!(created["completedAt"].is_null());
        let todo_id = created["todoId"].as_i64().unwrap();

        let (status, done) = app
            .put(
                &format!("/api/todo/status/{}", todo_id),
                Some(&token),
                json!({ "isCompleted": true }),
            )
            .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(done["isCompleted"], true);
        assert!(done["completedAt"].is_string());

        let (_, reopened) = app
            .put(
                &format!("/api/todo/status/{}", todo_id),
                Some(&token),
                json!({ "isCompleted": false }),
            )
            .await;
        assert!(reopened["completedAt"].is_null());

        let (status, list) = app
            .get(&format!("/api/todo/{}", user.user_id), Some(&token))
            .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(list.as_array().unwrap().len(), 1);

        let (status, _) = app
            .delete(&format!("/api/todo/{}", todo_id), Some(&token))
            .await;
        assert_eq!(status, StatusCode::OK);

        let (status, _) = app
            .get(&format!("/api/todo/detail/{}", todo_id), Some(&token))
            .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_list_is_newest_first() {
        let app = TestApp::new().await;
        let (user, token) = app.user("a@x.com").await;

        for content in ["first", "second"] {
            app.post("/api/todo/save", Some(&token), json!({ "content": content }))
                .await;
        }

        let (_, list) = app
            .get(&format!("/api/todo/{}", user.user_id), Some(&token))
            .await;
        assert_eq!(list[0]["content"], "second");
        assert_eq!(list[1]["content"], "first");
    }

    #[tokio::test]
    async fn test_other_users_todos_are_forbidden() {
        let app = TestApp::new().await;
        let (owner, owner_token) = app.user("a@x.com").await;
        let (_, other_token) = app.user("b@x.com").await;

        let (_, created) = app
            .post("/api/todo/save", Some(&owner_token), json!({ "content": "mine" }))
            .await;
        let todo_id = created["todoId"].as_i64().unwrap();

        let (status, _) = app
            .get(&format!("/api/todo/{}", owner.user_id), Some(&other_token))
            .await;
        assert_eq!(status, StatusCode::FORBIDDEN);

        let (status, _) = app
            .delete(&format!("/api/todo/{}", todo_id), Some(&other_token))
            .await;
        assert_eq!(status, StatusCode::FORBIDDEN);

        let (status, _) = app
            .get(&format!("/api/todo/detail/{}", todo_id), None)
            .await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
    }
}
