use axum::http::StatusCode;
use axum_test::TestServer;
use mockito::{Matcher, Mock, ServerGuard};
use serde_json::{json, Value};

use cinesense::{
    api::{create_router, AppState},
    config::Config,
};

const TWO_RECOMMENDATIONS: &str = r#"[
    {
        "item": {"id": "2", "title": "Inception", "year": 2010, "category": "Movie",
                 "genres": ["Action", "Sci-Fi"], "description": "", "popularity": 92.0,
                 "imageUrl": "https://images.example/inception.jpg"},
        "score": 0.93, "source": "hybrid",
        "features": {"svdScore": 0.91, "contentSimilarity": 0.8}
    },
    {
        "item": {"id": "3", "title": "Breaking Bad", "year": 2008, "category": "Series",
                 "genres": ["Drama"], "description": "", "popularity": 94.0,
                 "imageUrl": "https://images.example/bb.jpg"},
        "score": 0.88, "source": "svd",
        "features": {"svdScore": 0.88}
    }
]"#;

fn create_test_server(upstream: &ServerGuard) -> TestServer {
    let config = Config {
        recommender_api_url: upstream.url(),
        ..Config::default()
    };
    let state = AppState::from_config(&config).unwrap();
    let app = create_router(state);
    TestServer::new(app).unwrap()
}

async fn mock_user_recommendations(upstream: &mut ServerGuard, status: usize) -> Mock {
    upstream
        .mock(
            "GET",
            Matcher::Regex(r"^/api/recommend/user/[^/]+$".to_string()),
        )
        .match_query(Matcher::Any)
        .with_status(status)
        .with_header("content-type", "application/json")
        .with_body(if status == 200 { TWO_RECOMMENDATIONS } else { "{}" })
        .create_async()
        .await
}

#[tokio::test]
async fn test_health_check() {
    let upstream = mockito::Server::new_async().await;
    let server = create_test_server(&upstream);

    let response = server.get("/health").await;
    response.assert_status_ok();
    assert!(response.headers().contains_key("x-request-id"));
}

#[tokio::test]
async fn test_upstream_health_with_non_json_body_is_unhealthy() {
    let mut upstream = mockito::Server::new_async().await;
    upstream
        .mock("GET", "/")
        .with_status(200)
        .with_body("not json")
        .create_async()
        .await;
    let server = create_test_server(&upstream);

    let response = server.get("/api/upstream/health").await;
    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["healthy"], false);
    assert!(body["body"].is_null());
}

#[tokio::test]
async fn test_upstream_health_reports_status_body() {
    let mut upstream = mockito::Server::new_async().await;
    upstream
        .mock("GET", "/")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"status": "ok"}"#)
        .create_async()
        .await;
    let server = create_test_server(&upstream);

    let body: Value = server.get("/api/upstream/health").await.json();
    assert_eq!(body["healthy"], true);
    assert_eq!(body["body"]["status"], "ok");
}

#[tokio::test]
async fn test_explore_default_order() {
    let upstream = mockito::Server::new_async().await;
    let server = create_test_server(&upstream);

    let response = server.get("/api/items").await;
    response.assert_status_ok();
    let body: Value = response.json();

    let items = body["items"].as_array().unwrap();
    assert_eq!(body["total"], items.len());
    let popularity: Vec<u64> = items
        .iter()
        .map(|i| i["popularity"].as_u64().unwrap())
        .collect();
    assert!(popularity.windows(2).all(|w| w[0] >= w[1]));
}

#[tokio::test]
async fn test_explore_filters() {
    let upstream = mockito::Server::new_async().await;
    let server = create_test_server(&upstream);

    let response = server
        .get("/api/items?category=Documentary&genres=Adventure,Comedy&order=asc")
        .await;
    response.assert_status_ok();
    let body: Value = response.json();

    let items = body["items"].as_array().unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0]["title"], "Free Solo");
}

#[tokio::test]
async fn test_explore_search_and_sort_newest() {
    let upstream = mockito::Server::new_async().await;
    let server = create_test_server(&upstream);

    let response = server.get("/api/items?q=PLANET&sort=newest").await;
    response.assert_status_ok();
    let body: Value = response.json();

    let titles: Vec<&str> = body["items"]
        .as_array()
        .unwrap()
        .iter()
        .map(|i| i["title"].as_str().unwrap())
        .collect();
    assert_eq!(titles, vec!["Our Planet", "Planet Earth II"]);
}

#[tokio::test]
async fn test_explore_rejects_unknown_sort() {
    let upstream = mockito::Server::new_async().await;
    let server = create_test_server(&upstream);

    let response = server.get("/api/items?sort=loudest").await;
    response.assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_get_users() {
    let upstream = mockito::Server::new_async().await;
    let server = create_test_server(&upstream);

    let response = server.get("/api/users").await;
    response.assert_status_ok();
    let users: Vec<Value> = response.json();
    assert_eq!(users.len(), 3);
    assert_eq!(users[0]["id"], "user1");
}

#[tokio::test]
async fn test_get_unknown_item() {
    let upstream = mockito::Server::new_async().await;
    let server = create_test_server(&upstream);

    let response = server.get("/api/items/nope").await;
    response.assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_home_uses_service_results() {
    let mut upstream = mockito::Server::new_async().await;
    let mock = mock_user_recommendations(&mut upstream, 200).await;
    let server = create_test_server(&upstream);

    let response = server.get("/api/home").await;
    response.assert_status_ok();
    let home: Value = response.json();

    mock.assert_async().await;
    assert_eq!(home["origin"], "service");
    assert_eq!(home["selected_user_id"], "user1");
    assert_eq!(home["recommended"]["title"], "Recommended For You");
    assert_eq!(home["recommended"]["entries"][0]["item"]["title"], "Inception");
    assert_eq!(home["trending"]["entries"].as_array().unwrap().len(), 4);
    assert!(home["because_you_liked"]["entries"]
        .as_array()
        .unwrap()
        .is_empty());
}

#[tokio::test]
async fn test_home_falls_back_on_server_error() {
    let mut upstream = mockito::Server::new_async().await;
    let mock = mock_user_recommendations(&mut upstream, 500).await;
    let server = create_test_server(&upstream);

    let response = server.get("/api/home").await;
    response.assert_status_ok();
    let home: Value = response.json();

    mock.assert_async().await;
    assert_eq!(home["origin"], "fallback");
    assert_eq!(
        home["recommended"]["entries"].as_array().unwrap().len(),
        4
    );
    assert_eq!(
        home["because_you_liked"]["entries"][0]["source"],
        "content"
    );
}

#[tokio::test]
async fn test_select_user_and_refresh() {
    let mut upstream = mockito::Server::new_async().await;
    let mock = upstream
        .mock("GET", "/api/recommend/user/user2")
        .match_query(Matcher::UrlEncoded("limit".into(), "8".into()))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(TWO_RECOMMENDATIONS)
        .expect(2)
        .create_async()
        .await;
    let server = create_test_server(&upstream);

    let response = server
        .put("/api/home/user")
        .json(&json!({ "user_id": "user2" }))
        .await;
    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["outcome"], "applied");
    assert_eq!(body["home"]["selected_user_id"], "user2");

    let response = server.post("/api/home/refresh").await;
    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["outcome"], "applied");

    mock.assert_async().await;
}

#[tokio::test]
async fn test_select_unknown_user() {
    let upstream = mockito::Server::new_async().await;
    let server = create_test_server(&upstream);

    let response = server
        .put("/api/home/user")
        .json(&json!({ "user_id": "user99" }))
        .await;
    response.assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_cold_start_with_one_interest_never_reaches_service() {
    let mut upstream = mockito::Server::new_async().await;
    let mock = upstream
        .mock("POST", "/api/recommend/cold-start")
        .match_query(Matcher::Any)
        .expect(0)
        .create_async()
        .await;
    let server = create_test_server(&upstream);

    let response = server
        .post("/api/cold-start")
        .json(&json!({
            "gender": "female",
            "occupation": "Designer",
            "interests": ["drama"]
        }))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    mock.assert_async().await;
}

#[tokio::test]
async fn test_cold_start_failure_is_reported() {
    let mut upstream = mockito::Server::new_async().await;
    upstream
        .mock("POST", "/api/recommend/cold-start")
        .match_query(Matcher::Any)
        .with_status(500)
        .create_async()
        .await;
    let server = create_test_server(&upstream);

    let response = server
        .post("/api/cold-start")
        .json(&json!({
            "gender": "male",
            "occupation": "Student",
            "interests": ["action", "comedy"]
        }))
        .await;

    response.assert_status(StatusCode::BAD_GATEWAY);
    let body: Value = response.json();
    assert!(body["error"]
        .as_str()
        .unwrap()
        .contains("recommendation engine"));
}

#[tokio::test]
async fn test_cold_start_results_replace_recommended_section() {
    let mut upstream = mockito::Server::new_async().await;
    let mock = upstream
        .mock("POST", "/api/recommend/cold-start")
        .match_query(Matcher::UrlEncoded("limit".into(), "12".into()))
        .match_body(Matcher::PartialJson(json!({ "interests": ["scifi", "drama"] })))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(TWO_RECOMMENDATIONS)
        .create_async()
        .await;
    let server = create_test_server(&upstream);

    let response = server
        .post("/api/cold-start")
        .json(&json!({
            "gender": "other",
            "occupation": "Engineer",
            "interests": ["scifi", "drama"]
        }))
        .await;
    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["recommendations"].as_array().unwrap().len(), 2);
    mock.assert_async().await;

    let home: Value = server.get("/api/home").await.json();
    assert_eq!(home["origin"], "cold_start");
    assert_eq!(
        home["recommended"]["title"],
        "Matches for Your Preferences"
    );
}

#[tokio::test]
async fn test_item_detail_for_recommended_item() {
    let mut upstream = mockito::Server::new_async().await;
    mock_user_recommendations(&mut upstream, 200).await;
    let server = create_test_server(&upstream);

    server.get("/api/home").await.assert_status_ok();

    let response = server.get("/api/items/2").await;
    response.assert_status_ok();
    let detail: Value = response.json();
    assert_eq!(detail["item"]["title"], "Inception");
    assert_eq!(detail["features"].as_array().unwrap().len(), 2);
    assert_eq!(detail["features"][0]["label"], "SVD Score");
    assert_eq!(detail["related"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_item_detail_for_service_only_item() {
    let mut upstream = mockito::Server::new_async().await;
    upstream
        .mock(
            "GET",
            Matcher::Regex(r"^/api/recommend/user/[^/]+$".to_string()),
        )
        .match_query(Matcher::Any)
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            r#"[
                {
                    "item": {"id": "27205", "title": "Service Only", "year": 2010,
                             "category": "Movie", "genres": ["Drama"], "description": "",
                             "popularity": 81.4, "imageUrl": ""},
                    "score": 0.9, "source": "svd", "features": {"svdScore": 0.9}
                },
                {
                    "item": {"id": "5", "title": "Service Five", "year": 2012,
                             "category": "Movie", "genres": ["Comedy"], "description": "",
                             "popularity": 70.0, "imageUrl": ""},
                    "score": 0.85, "source": "content", "features": {"contentSimilarity": 0.85}
                }
            ]"#,
        )
        .create_async()
        .await;
    let server = create_test_server(&upstream);

    server.get("/api/home").await.assert_status_ok();

    let response = server.get("/api/items/27205").await;
    response.assert_status_ok();
    let detail: Value = response.json();
    assert_eq!(detail["item"]["title"], "Service Only");
    assert_eq!(detail["features"][0]["label"], "SVD Score");

    let detail: Value = server.get("/api/items/5").await.json();
    assert_eq!(detail["item"]["title"], "Service Five");
    assert_eq!(detail["recommendation"]["item"]["title"], "Service Five");
}

#[tokio::test]
async fn test_cold_start_options() {
    let upstream = mockito::Server::new_async().await;
    let server = create_test_server(&upstream);

    let response = server.get("/api/cold-start/options").await;
    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["min_interests"], 2);
    assert_eq!(body["interests"].as_array().unwrap().len(), 8);
    assert_eq!(body["occupations"][0], "Student");
}
