use std::sync::Arc;

use axum::body::{to_bytes, Body};
use axum::http::{Request, StatusCode};
use axum::response::Response;
use axum::Router;
use serde_json::{json, Value};
use tower::Service;
use tower_http::cors::CorsLayer;

use server::routes;
use server::state::AppState;
use service::review::{MapReviewRepository, ReviewService};

fn build_app() -> Router {
    let svc = ReviewService::new(Arc::new(MapReviewRepository::in_memory()));
    let state = AppState::new(Arc::new(svc));
    routes::build_router(state, CorsLayer::very_permissive())
}

fn json_request(method: &str, uri: &str, body: &Value) -> anyhow::Result<Request<Body>> {
    Ok(Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(serde_json::to_vec(body)?))?)
}

fn empty_request(method: &str, uri: &str) -> anyhow::Result<Request<Body>> {
    Ok(Request::builder().method(method).uri(uri).body(Body::empty())?)
}

async fn body_json(resp: Response) -> anyhow::Result<Value> {
    let bytes = to_bytes(resp.into_body(), usize::MAX).await?;
    Ok(serde_json::from_slice(&bytes)?)
}

async fn create(app: &mut Router, pos_id: i64, author_id: i64, text: &str) -> anyhow::Result<Value> {
    let req = json_request("POST", "/api/reviews", &json!({"posId": pos_id, "authorId": author_id, "review": text}))?;
    let resp = app.call(req).await?;
    assert_eq!(resp.status(), StatusCode::CREATED);
    body_json(resp).await
}

#[tokio::test]
async fn health_is_ok() -> anyhow::Result<()> {
    let mut app = build_app();
    let resp = app.call(empty_request("GET", "/health")?).await?;
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(body_json(resp).await?["status"], "ok");
    Ok(())
}

#[tokio::test]
async fn create_then_get_round_trip() -> anyhow::Result<()> {
    let mut app = build_app();
    let created = create(&mut app, 1, 7, "Great coffee").await?;
    assert_eq!(created["id"], 1);
    assert_eq!(created["posId"], 1);
    assert_eq!(created["approved"], false);
    assert!(created["createdAt"].is_string());

    let resp = app.call(empty_request("GET", "/api/reviews/1")?).await?;
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(body_json(resp).await?["review"], "Great coffee");

    let resp = app.call(empty_request("GET", "/api/reviews")?).await?;
    assert_eq!(body_json(resp).await?.as_array().map(Vec::len), Some(1));
    Ok(())
}

#[tokio::test]
async fn unknown_id_is_404_with_empty_body() -> anyhow::Result<()> {
    let mut app = build_app();
    let resp = app.call(empty_request("GET", "/api/reviews/42")?).await?;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    let bytes = to_bytes(resp.into_body(), usize::MAX).await?;
    assert!(bytes.is_empty());
    Ok(())
}

#[tokio::test]
async fn update_uses_path_id() -> anyhow::Result<()> {
    let mut app = build_app();
    create(&mut app, 1, 7, "Great coffee").await?;

    // body id disagrees with the path; the path wins
    let req = json_request("PUT", "/api/reviews/1", &json!({"id": 99, "posId": 1, "authorId": 7, "review": "Okay coffee"}))?;
    let resp = app.call(req).await?;
    assert_eq!(resp.status(), StatusCode::OK);
    let updated = body_json(resp).await?;
    assert_eq!(updated["id"], 1);
    assert_eq!(updated["review"], "Okay coffee");

    let req = json_request("PUT", "/api/reviews/5", &json!({"posId": 1, "authorId": 7, "review": "ghost"}))?;
    assert_eq!(app.call(req).await?.status(), StatusCode::NOT_FOUND);
    Ok(())
}

#[tokio::test]
async fn put_cannot_approve_or_unapprove() -> anyhow::Result<()> {
    let mut app = build_app();
    create(&mut app, 1, 7, "Great coffee").await?;

    let req = json_request(
        "PUT",
        "/api/reviews/1",
        &json!({"posId": 1, "authorId": 7, "review": "Great coffee", "approved": true, "approvedBy": 99}),
    )?;
    let resp = app.call(req).await?;
    assert_eq!(resp.status(), StatusCode::OK);
    let body = body_json(resp).await?;
    assert_eq!(body["approved"], false);
    assert!(body["approvedBy"].is_null());

    let resp = app.call(empty_request("GET", "/api/reviews/filter?pos_id=1&approved=true")?).await?;
    assert_eq!(body_json(resp).await?, json!([]));

    let resp = app.call(empty_request("POST", "/api/reviews/1/approve?user_id=3")?).await?;
    assert_eq!(resp.status(), StatusCode::OK);

    let req = json_request(
        "PUT",
        "/api/reviews/1",
        &json!({"posId": 1, "authorId": 7, "review": "Great coffee", "approved": false}),
    )?;
    let resp = app.call(req).await?;
    assert_eq!(resp.status(), StatusCode::OK);
    let body = body_json(resp).await?;
    assert_eq!(body["approved"], true);
    assert_eq!(body["approvedBy"], 3);
    Ok(())
}

#[tokio::test]
async fn delete_returns_no_content_then_404() -> anyhow::Result<()> {
    let mut app = build_app();
    create(&mut app, 1, 7, "bye").await?;

    let resp = app.call(empty_request("DELETE", "/api/reviews/1")?).await?;
    assert_eq!(resp.status(), StatusCode::NO_CONTENT);
    let resp = app.call(empty_request("GET", "/api/reviews/1")?).await?;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    // deleting again is not an error
    let resp = app.call(empty_request("DELETE", "/api/reviews/1")?).await?;
    assert_eq!(resp.status(), StatusCode::NO_CONTENT);
    Ok(())
}

#[tokio::test]
async fn invalid_payloads_are_rejected() -> anyhow::Result<()> {
    let mut app = build_app();

    let req = json_request("POST", "/api/reviews", &json!({"posId": 1, "authorId": 7, "review": "   "}))?;
    let resp = app.call(req).await?;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body = body_json(resp).await?;
    assert_eq!(body["error"], "Validation Error");
    assert_eq!(body["violations"][0]["field"], "review");

    let req = json_request("POST", "/api/reviews", &json!({"review": "no ids"}))?;
    let resp = app.call(req).await?;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(resp).await?["violations"].as_array().map(Vec::len), Some(2));

    let req = Request::builder()
        .method("POST")
        .uri("/api/reviews")
        .header("content-type", "application/json")
        .body(Body::from("{not json"))?;
    assert_eq!(app.call(req).await?.status(), StatusCode::BAD_REQUEST);

    // nothing was stored
    let resp = app.call(empty_request("GET", "/api/reviews")?).await?;
    assert_eq!(body_json(resp).await?, json!([]));
    Ok(())
}

#[tokio::test]
async fn filter_requires_both_params() -> anyhow::Result<()> {
    let mut app = build_app();
    for uri in ["/api/reviews/filter", "/api/reviews/filter?pos_id=1", "/api/reviews/filter?approved=true"] {
        let resp = app.call(empty_request("GET", uri)?).await?;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST, "{uri}");
    }
    let resp = app.call(empty_request("GET", "/api/reviews/filter")?).await?;
    let body = body_json(resp).await?;
    assert_eq!(body["error"], "Validation Error");
    assert_eq!(body["violations"].as_array().map(Vec::len), Some(2));

    let resp = app.call(empty_request("GET", "/api/reviews/filter?pos_id=1&approved=maybe")?).await?;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    Ok(())
}

#[tokio::test]
async fn approve_errors() -> anyhow::Result<()> {
    let mut app = build_app();
    let resp = app.call(empty_request("POST", "/api/reviews/9/approve?user_id=3")?).await?;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    create(&mut app, 1, 7, "Great coffee").await?;
    let resp = app.call(empty_request("POST", "/api/reviews/1/approve")?).await?;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    Ok(())
}

#[tokio::test]
async fn approve_and_filter_walkthrough() -> anyhow::Result<()> {
    let mut app = build_app();
    create(&mut app, 1, 7, "Great coffee").await?;
    create(&mut app, 1, 8, "Slow service").await?;
    create(&mut app, 2, 7, "Clean tables").await?;

    let resp = app.call(empty_request("POST", "/api/reviews/1/approve?user_id=3")?).await?;
    assert_eq!(resp.status(), StatusCode::OK);
    let approved = body_json(resp).await?;
    assert_eq!(approved["approved"], true);
    assert_eq!(approved["approvedBy"], 3);

    let resp = app.call(empty_request("GET", "/api/reviews/filter?pos_id=1&approved=true")?).await?;
    assert_eq!(resp.status(), StatusCode::OK);
    let ids: Vec<Value> = body_json(resp).await?.as_array().cloned().unwrap_or_default().iter().map(|r| r["id"].clone()).collect();
    assert_eq!(ids, vec![json!(1)]);

    let resp = app.call(empty_request("GET", "/api/reviews/filter?pos_id=1&approved=false")?).await?;
    let ids: Vec<Value> = body_json(resp).await?.as_array().cloned().unwrap_or_default().iter().map(|r| r["id"].clone()).collect();
    assert_eq!(ids, vec![json!(2)]);

    let resp = app.call(empty_request("GET", "/api/reviews/filter?pos_id=3&approved=false")?).await?;
    assert_eq!(body_json(resp).await?, json!([]));

    // approving twice keeps the state, the latest approver wins
    let resp = app.call(empty_request("POST", "/api/reviews/1/approve?user_id=4")?).await?;
    let again = body_json(resp).await?;
    assert_eq!(again["approved"], true);
    assert_eq!(again["approvedBy"], 4);
    Ok(())
}

#[tokio::test]
async fn openapi_document_is_served() -> anyhow::Result<()> {
    let mut app = build_app();
    let resp = app.call(empty_request("GET", "/api-docs/openapi.json")?).await?;
    assert_eq!(resp.status(), StatusCode::OK);
    let doc = body_json(resp).await?;
    assert!(doc["paths"]["/api/reviews/{id}/approve"].is_object());
    Ok(())
}
