// Tests for the Canvas HTTP client against a mock server.
use canvas_desk::client::{ApiError, CanvasClient, FetchOutcome};
use canvas_desk::model::Category;
use http::StatusCode;
use mockito::{Matcher, Server};

fn json_body(value: serde_json::Value) -> String {
    value.to_string()
}

#[tokio::test]
async fn test_requests_carry_bearer_token_and_user_agent() {
    let mut server = Server::new_async().await;
    let m = server
        .mock("GET", "/api/v1/courses/42")
        .match_header("authorization", "Bearer secret-token")
        .match_header("user-agent", Matcher::Regex("^canvas-desk/".to_string()))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(json_body(serde_json::json!({"id": 42, "name": "Chemistry"})))
        .create_async()
        .await;

    let client = CanvasClient::new(&server.url(), "secret-token").unwrap();
    let course = client.get_course("42").await.into_result().unwrap();

    assert_eq!(course.id, "42");
    assert_eq!(course.name, "Chemistry");
    m.assert_async().await;
}

#[tokio::test]
async fn test_course_404_is_a_failure_with_status() {
    let mut server = Server::new_async().await;
    let _m = server
        .mock("GET", "/api/v1/courses/123")
        .with_status(404)
        .with_body(r#"{"errors":[{"message":"The specified resource does not exist."}]}"#)
        .create_async()
        .await;

    let client = CanvasClient::new(&server.url(), "t").unwrap();
    let outcome = client.get_course("123").await;

    match outcome {
        FetchOutcome::Failed(f) => assert_eq!(f.status, Some(StatusCode::NOT_FOUND)),
        FetchOutcome::Loaded(c) => panic!("expected failure, got {:?}", c),
    }
}

#[tokio::test]
async fn test_announcements_use_only_announcements_query() {
    let mut server = Server::new_async().await;
    let m = server
        .mock(
            "GET",
            Matcher::Regex("^/api/v1/courses/9/discussion_topics".to_string()),
        )
        .match_query(Matcher::UrlEncoded(
            "only_announcements".into(),
            "true".into(),
        ))
        .with_status(200)
        .with_body(json_body(serde_json::json!([
            {"id": 1, "title": "Welcome", "posted_at": "2024-01-01T09:00:00Z"},
            {"id": 2, "posted_at": null}
        ])))
        .create_async()
        .await;

    let client = CanvasClient::new(&server.url(), "t").unwrap();
    let items = client.get_announcements("9").await.into_result().unwrap();

    assert_eq!(items.len(), 2);
    assert_eq!(items[0].title, "Welcome");
    assert_eq!(items[1].title, "No Title");
    assert!(items[1].timestamp.is_none());
    assert_eq!(items[0].raw["id"], 1);
    m.assert_async().await;
}

#[tokio::test]
async fn test_assignments_endpoint_and_fields() {
    let mut server = Server::new_async().await;
    let _m = server
        .mock("GET", "/api/v1/courses/9/assignments")
        .with_status(200)
        .with_body(json_body(serde_json::json!([
            {"id": 5, "name": "Lab report", "created_at": "2024-02-10T08:15:00Z"}
        ])))
        .create_async()
        .await;

    let client = CanvasClient::new(&server.url(), "t").unwrap();
    let items = client
        .get_items("9", Category::Assignments)
        .await
        .into_result()
        .unwrap();

    assert_eq!(items.len(), 1);
    assert_eq!(items[0].title, "Lab report");
    assert_eq!(items[0].date_label(), "Feb 10, 2024 08:15 AM");
}

#[tokio::test]
async fn test_item_fetch_failures_are_reported_not_raised() {
    let mut server = Server::new_async().await;
    let _forbidden = server
        .mock("GET", "/api/v1/courses/1/assignments")
        .with_status(403)
        .create_async()
        .await;
    let _not_array = server
        .mock("GET", "/api/v1/courses/2/assignments")
        .with_status(200)
        .with_body(r#"{"message":"unexpected"}"#)
        .create_async()
        .await;

    let client = CanvasClient::new(&server.url(), "t").unwrap();

    let forbidden = client.get_assignments("1").await;
    assert!(forbidden.is_failed());
    assert_eq!(forbidden.recover(|_| Vec::new()).len(), 0);

    let not_array = client.get_assignments("2").await.into_result().unwrap_err();
    assert_eq!(not_array.status, None);
}

#[tokio::test]
async fn test_favorites_keep_api_order_and_skip_missing_ids() {
    let mut server = Server::new_async().await;
    let _m = server
        .mock("GET", "/api/v1/users/self/favorites/courses")
        .match_header("authorization", "Bearer tok")
        .with_status(200)
        .with_body(json_body(serde_json::json!([
            {"id": 30, "name": "C"},
            {"name": "no id"},
            {"id": 10, "name": "A"},
            {"id": null},
            {"id": "20"}
        ])))
        .create_async()
        .await;

    let client = CanvasClient::new(&format!("{}/", server.url()), "tok").unwrap();
    let ids = client.get_favorite_course_ids().await.unwrap();
    assert_eq!(ids, vec!["30", "10", "20"]);
}

#[tokio::test]
async fn test_favorites_error_is_api_error() {
    let mut server = Server::new_async().await;
    let _m = server
        .mock("GET", "/api/v1/users/self/favorites/courses")
        .with_status(401)
        .with_body("Invalid access token.")
        .create_async()
        .await;

    let client = CanvasClient::new(&server.url(), "bad").unwrap();
    let err = client.get_favorite_course_ids().await.unwrap_err();
    let api = err.downcast_ref::<ApiError>().expect("ApiError");
    assert_eq!(api.status, StatusCode::UNAUTHORIZED);
    assert_eq!(api.body, "Invalid access token.");
}

#[tokio::test]
async fn test_unreachable_server_is_a_failure() {
    // Nothing listens on port 9 (discard) in the test environment.
    let client = CanvasClient::new("http://127.0.0.1:9", "t").unwrap();
    let outcome = client.get_course("1").await;
    assert!(outcome.is_failed());
}

#[tokio::test]
async fn test_moved_course_follows_redirect_with_token() {
    let mut server = Server::new_async().await;
    let old = server
        .mock("GET", "/api/v1/courses/5")
        .with_status(301)
        .with_header("location", "/api/v1/courses/55")
        .create_async()
        .await;
    let new = server
        .mock("GET", "/api/v1/courses/55")
        .match_header("authorization", "Bearer t")
        .with_status(200)
        .with_body(r#"{"name":"Moved Course"}"#)
        .create_async()
        .await;

    let client = CanvasClient::new(&server.url(), "t").unwrap();
    let course = client.get_course("5").await.into_result().unwrap();

    assert_eq!(course.id, "5");
    assert_eq!(course.name, "Moved Course");
    old.assert_async().await;
    new.assert_async().await;
}

#[tokio::test]
async fn test_favorites_follow_absolute_redirect() {
    let mut server = Server::new_async().await;
    let target = format!("{}/canonical/favorites", server.url());
    server
        .mock("GET", "/api/v1/users/self/favorites/courses")
        .with_status(302)
        .with_header("location", &target)
        .create_async()
        .await;
    server
        .mock("GET", "/canonical/favorites")
        .with_status(200)
        .with_body(r#"[{"id": 3}, {"id": 4}]"#)
        .create_async()
        .await;

    let client = CanvasClient::new(&server.url(), "t").unwrap();
    let ids = client.get_favorite_course_ids().await.unwrap();
    assert_eq!(ids, vec!["3", "4"]);
}

#[tokio::test]
async fn test_redirect_loop_gives_up_with_last_status() {
    let mut server = Server::new_async().await;
    let looping = server
        .mock("GET", "/api/v1/courses/8")
        .with_status(302)
        .with_header("location", "/api/v1/courses/8")
        .expect(6)
        .create_async()
        .await;

    let client = CanvasClient::new(&server.url(), "t").unwrap();
    match client.get_course("8").await {
        FetchOutcome::Failed(f) => assert_eq!(f.status, Some(StatusCode::FOUND)),
        FetchOutcome::Loaded(c) => panic!("expected failure, got {:?}", c),
    }
    looping.assert_async().await;
}
