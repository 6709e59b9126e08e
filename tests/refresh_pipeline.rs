// End-to-end refresh: fetch, sort and group across several courses.
use canvas_desk::client::CanvasClient;
use canvas_desk::config::Config;
use canvas_desk::dashboard::{self, ItemRow};
use canvas_desk::model::Category;
use mockito::{Matcher, Mock, ServerGuard};
use serde_json::{Value, json};

async fn mock_json(server: &mut ServerGuard, path: &str, status: usize, body: Value) -> Mock {
    server
        .mock("GET", path)
        .with_status(status)
        .with_header("content-type", "application/json")
        .with_body(body.to_string())
        .create_async()
        .await
}

async fn mock_announcements(server: &mut ServerGuard, course: &str, body: Value) -> Mock {
    server
        .mock(
            "GET",
            Matcher::Regex(format!("^/api/v1/courses/{}/discussion_topics", course)),
        )
        .match_query(Matcher::UrlEncoded(
            "only_announcements".into(),
            "true".into(),
        ))
        .with_status(200)
        .with_body(body.to_string())
        .create_async()
        .await
}

fn ids(list: &[&str]) -> Vec<String> {
    list.iter().map(|s| s.to_string()).collect()
}

#[tokio::test]
async fn test_refresh_groups_sorts_and_degrades_per_course() {
    let mut server = mockito::Server::new_async().await;

    // Course 1: everything works.
    mock_json(&mut server, "/api/v1/courses/1", 200, json!({"id": 1, "name": "Physics"})).await;
    mock_announcements(
        &mut server,
        "1",
        json!([
            {"title": "A", "posted_at": null},
            {"title": "B", "posted_at": "2024-01-02T10:00:00Z"},
            {"title": "C", "posted_at": "2024-01-01T09:00:00Z"}
        ]),
    )
    .await;
    mock_json(
        &mut server,
        "/api/v1/courses/1/assignments",
        200,
        json!([{"name": "HW1", "created_at": "2024-01-05T17:00:00Z"}]),
    )
    .await;

    // Course 2: metadata 404, no announcements, assignments fail.
    mock_json(&mut server, "/api/v1/courses/2", 404, json!({"errors": []})).await;
    mock_announcements(&mut server, "2", json!([])).await;
    mock_json(&mut server, "/api/v1/courses/2/assignments", 500, json!({})).await;

    // Course 3: nothing mocked at all, every request gets mockito's 501.
    // Course 4: placeholder name but with assignments.
    mock_json(&mut server, "/api/v1/courses/4", 401, json!({})).await;
    mock_announcements(&mut server, "4", json!("not a list")).await;
    mock_json(
        &mut server,
        "/api/v1/courses/4/assignments",
        200,
        json!([{"name": "Essay"}, {"name": "Quiz", "created_at": "2023-12-01T00:00:00Z"}]),
    )
    .await;

    let client = CanvasClient::new(&server.url(), "tok").unwrap();
    let board = dashboard::refresh(&client, &ids(&["1", "2", "3", "4"])).await;

    // Announcements: only course 1 has any.
    assert_eq!(board.announcements.len(), 1);
    let physics = &board.announcements[0];
    assert_eq!(physics.course_name, "Physics");
    let titles: Vec<&str> = physics.rows.iter().map(|r| r.title.as_str()).collect();
    assert_eq!(titles, vec!["B", "C", "A"]);
    assert_eq!(physics.rows[0].date_label, "Jan 02, 2024 10:00 AM");
    assert_eq!(physics.rows[2].date_label, "N/A");

    // Assignments: course 1 and course 4 (with its placeholder name).
    let names: Vec<&str> = board
        .assignments
        .iter()
        .map(|g| g.course_name.as_str())
        .collect();
    assert_eq!(names, vec!["Physics", "Course 4"]);
    assert_eq!(
        board.assignments[1].rows,
        vec![
            ItemRow {
                title: "Quiz".into(),
                date_label: "Dec 01, 2023 12:00 AM".into()
            },
            ItemRow {
                title: "Essay".into(),
                date_label: "N/A".into()
            },
        ]
    );
    assert!(board.groups(Category::Announcements).iter().all(|g| !g.rows.is_empty()));
}

#[tokio::test]
async fn test_duplicate_course_ids_render_twice() {
    let mut server = mockito::Server::new_async().await;
    mock_json(&mut server, "/api/v1/courses/7", 200, json!({"name": "Art"})).await;
    mock_announcements(&mut server, "7", json!([{"title": "Gallery trip"}])).await;
    mock_json(&mut server, "/api/v1/courses/7/assignments", 200, json!([])).await;

    let client = CanvasClient::new(&server.url(), "tok").unwrap();
    let board = dashboard::refresh(&client, &ids(&["7", "7"])).await;

    assert_eq!(board.announcements.len(), 2);
    assert!(board.assignments.is_empty());
}

#[tokio::test]
async fn test_refresh_from_config_with_no_courses() {
    let server = mockito::Server::new_async().await;
    let config = Config::new(&server.url(), "tok", Vec::new());
    let board = dashboard::refresh_from_config(&config).await.unwrap();
    assert!(board.is_empty());
}

#[tokio::test]
async fn test_refresh_from_config_rejects_missing_base_url() {
    let config = Config::new("", "tok", ids(&["1"]));
    assert!(dashboard::refresh_from_config(&config).await.is_err());
}
