//! Tests for posts module

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;
    use serde_json::{json, Value};

    use crate::app::testing::TestApp;
    use crate::posts::services::into_page;

    async fn create_post(app: &TestApp, token: &str, title: &str, category: &str) -> i64 {
        let (status, body) = app
            .post(
                "/api/workoutpost/save",
                Some(token),
                json!({
                    "title": title,
                    "content": "Today's session",
                    "workoutCategory": category
                }),
            )
            .await;
        assert_eq!(status, StatusCode::OK);
        body["workoutPost"]["postId"].as_i64().unwrap()
    }

    fn titles(page: &Value) -> Vec<String> {
        page["posts"]
            .as_array()
            .unwrap()
            .iter()
            .map(|p| p["workoutPost"]["title"].as_str().unwrap().to_string())
            .collect()
    }

    #[test]
    fn test_into_page_on_empty_result_echoes_cursor() {
        let page = into_page(Vec::new(), 10, Some(42));
        assert!(!page.has_next);
        assert_eq!(page.last_post_id, Some(42));
        assert_eq!(page.total_items, 0);
    }

    #[tokio::test]
    async fn test_create_returns_author_and_like_state() {
        let app = TestApp::new().await;
        let (_, token) = app.user("lifter@x.com").await;

        let (status, body) = app
            .post(
                "/api/workoutpost/save",
                Some(&token),
                json!({ "title": "Deadlift PR", "content": "180kg" }),
            )
            .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["authorName"], "lifter");
        assert_eq!(body["likedByUser"], false);
        assert_eq!(body["workoutPost"]["viewCount"], 0);
        assert_eq!(body["workoutPost"]["likeCount"], 0);
    }

    #[tokio::test]
    async fn test_create_requires_authentication() {
        let app = TestApp::new().await;

        let (status, _) = app
            .post(
                "/api/workoutpost/save",
                None,
                json!({ "title": "t", "content": "c" }),
            )
            .await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_latest_feed_cursor_pagination() {
        let app = TestApp::new().await;
        let (_, token) = app.user("a@x.com").await;
        for i in 1..=5 {
            create_post(&app, &token, &format!("post {}", i), "running").await;
        }

        let (status, first) = app.get("/api/workoutpost/list?size=2", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(titles(&first), vec!["post 5", "post 4"]);
        assert_eq!(first["hasNext"], true);
        assert_eq!(first["totalItems"], 2);

        let cursor = first["lastPostId"].as_i64().unwrap();
        let (_, second) = app
            .get(&format!("/api/workoutpost/list?size=2&lastPostId={}", cursor), None)
            .await;
        assert_eq!(titles(&second), vec!["post 3", "post 2"]);

        let cursor = second["lastPostId"].as_i64().unwrap();
        let (_, third) = app
            .get(&format!("/api/workoutpost/list?size=2&lastPostId={}", cursor), None)
            .await;
        assert_eq!(titles(&third), vec!["post 1"]);
        assert_eq!(third["hasNext"], false);
    }

    #[tokio::test]
    async fn test_latest_feed_category_filter_and_size_clamp() {
        let app = TestApp::new().await;
        let (_, token) = app.user("a@x.com").await;
        create_post(&app, &token, "run", "running").await;
        create_post(&app, &token, "swim", "swimming").await;

        let (_, page) = app
            .get("/api/workoutpost/list?category=swimming", None)
            .await;
        assert_eq!(titles(&page), vec!["swim"]);

        let (_, page) = app.get("/api/workoutpost/list?size=0", None).await;
        assert_eq!(page["totalItems"], 1);
        assert_eq!(page["hasNext"], true);
    }

    #[tokio::test]
    async fn test_detail_counts_views_and_reports_like_state() {
        let app = TestApp::new().await;
        let (_, token) = app.user("a@x.com").await;
        let post_id = create_post(&app, &token, "run", "running").await;

        let uri = format!("/api/workoutpost/detail/{}", post_id);
        let (status, anonymous) = app.get(&uri, None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(anonymous["workoutPost"]["viewCount"], 1);
        assert_eq!(anonymous["likedByUser"], false);

        app.post("/api/post-likes", Some(&token), json!({ "postId": post_id }))
            .await;

        let (_, viewer) = app.get(&uri, Some(&token)).await;
        assert_eq!(viewer["workoutPost"]["viewCount"], 2);
        assert_eq!(viewer["likedByUser"], true);

        let (status, _) = app.get("/api/workoutpost/detail/9999", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_like_toggle_keeps_count_in_step() {
        let app = TestApp::new().await;
        let (_, author) = app.user("a@x.com").await;
        let (_, fan) = app.user("b@x.com").await;
        let post_id = create_post(&app, &author, "run", "running").await;

        let (status, liked) = app
            .post("/api/post-likes", Some(&fan), json!({ "postId": post_id }))
            .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(liked, json!({ "success": true, "likeCount": 1, "isLiked": true }));

        let (_, also) = app
            .post("/api/post-likes", Some(&author), json!({ "postId": post_id }))
            .await;
        assert_eq!(also["likeCount"], 2);

        let (_, unliked) = app
            .post("/api/post-likes", Some(&fan), json!({ "postId": post_id }))
            .await;
        assert_eq!(unliked, json!({ "success": true, "likeCount": 1, "isLiked": false }));

        let (_, status_body) = app
            .get(&format!("/api/post-likes/status/{}", post_id), Some(&fan))
            .await;
        assert_eq!(status_body["isLiked"], false);
        assert_eq!(status_body["likeCount"], 1);

        let (_, users) = app
            .get(&format!("/api/post-likes/users/{}", post_id), Some(&fan))
            .await;
        assert_eq!(users.as_array().unwrap().len(), 1);

        let (status, _) = app
            .post("/api/post-likes", Some(&fan), json!({ "postId": 9999 }))
            .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_popular_feed_orders_by_likes() {
        let app = TestApp::new().await;
        let (_, a) = app.user("a@x.com").await;
        let (_, b) = app.user("b@x.com").await;

        create_post(&app, &a, "quiet", "running").await;
        let loved = create_post(&app, &a, "loved", "running").await;
        let liked = create_post(&app, &a, "liked", "running").await;

        for token in [&a, &b] {
            app.post("/api/post-likes", Some(token), json!({ "postId": loved }))
                .await;
        }
        app.post("/api/post-likes", Some(&b), json!({ "postId": liked }))
            .await;

        let (_, first) = app.get("/api/workoutpost/popular?size=2", None).await;
        assert_eq!(titles(&first), vec!["loved", "liked"]);
        assert_eq!(first["hasNext"], true);

        let cursor = first["lastPostId"].as_i64().unwrap();
        let (_, second) = app
            .get(&format!("/api/workoutpost/popular?size=2&lastPostId={}", cursor), None)
            .await;
        assert_eq!(titles(&second), vec!["quiet"]);
        assert_eq!(second["hasNext"], false);
    }

    #[tokio::test]
    async fn test_update_and_delete_are_owner_only() {
        let app = TestApp::new().await;
        let (author, token) = app.user("a@x.com").await;
        let (_, other) = app.user("b@x.com").await;
        let post_id = create_post(&app, &token, "draft", "running").await;

        let body = json!({ "title": "final", "content": "edited" });
        let uri = format!("/api/workoutpost/update/{}", post_id);

        let (status, _) = app.put(&uri, Some(&other), body.clone()).await;
        assert_eq!(status, StatusCode::FORBIDDEN);

        let (status, updated) = app.put(&uri, Some(&token), body).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(updated["workoutPost"]["title"], "final");

        let (_, mine) = app
            .get(&format!("/api/workoutpost/user/{}", author.user_id), Some(&token))
            .await;
        assert_eq!(titles(&mine), vec!["final"]);

        let delete_uri = format!("/api/workoutpost/{}", post_id);
        let (status, _) = app.delete(&delete_uri, Some(&other)).await;
        assert_eq!(status, StatusCode::FORBIDDEN);

        let (status, _) = app.delete(&delete_uri, Some(&token)).await;
        assert_eq!(status, StatusCode::OK);

        let (status, _) = app
            .get(&format!("/api/workoutpost/detail/{}", post_id), None)
            .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }
}
