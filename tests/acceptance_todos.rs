use todo_api::{application::todo_service::TodoServiceImpl, http::routing, http::routing::todos, infrastructure::memory_repo::InMemoryTodoRepository};
use axum::body::to_bytes;
use axum::Router;
use serde_json::json;

fn app() -> Router {
    let service = TodoServiceImpl::new(InMemoryTodoRepository::new());
    routing::app(todos::router(todos::AppState { service }))
}

#[tokio::test]
async fn acceptance_create_get_delete_scenario() {
    let app = app();

    // create
    let res = request(&app, "POST", "/items", Some(json!({ "title": "a" }))).await;
    assert_eq!(res.status(), 201);
    assert_eq!(res.headers()["location"], "/items/1");
    let created = body_json(res).await;
    assert_eq!(created, json!({ "id": 1, "title": "a", "done": false }));

    // get
    let res = request(&app, "GET", "/items/1", None).await;
    assert_eq!(res.status(), 200);
    assert_eq!(body_json(res).await, created);

    // delete
    let res = request(&app, "DELETE", "/items/1", None).await;
    assert_eq!(res.status(), 204);
    assert!(body_bytes(res).await.is_empty());

    // get 404
    let res = request(&app, "GET", "/items/1", None).await;
    assert_eq!(res.status(), 404);
    assert!(body_bytes(res).await.is_empty());
}

#[tokio::test]
async fn acceptance_list_and_update() {
    let app = app();

    let res = request(&app, "GET", "/items", None).await;
    assert_eq!(res.status(), 200);
    assert_eq!(body_json(res).await, json!([]));

    for title in ["buy milk", "walk dog"] {
        let res = request(&app, "POST", "/items", Some(json!({ "title": title }))).await;
        assert_eq!(res.status(), 201);
    }

    let res = request(&app, "PUT", "/items/1", Some(json!({ "title": "buy milk", "done": true }))).await;
    assert_eq!(res.status(), 200);
    assert_eq!(body_json(res).await, json!({ "id": 1, "title": "buy milk", "done": true }));

    let res = request(&app, "GET", "/items/1", None).await;
    assert_eq!(body_json(res).await, json!({ "id": 1, "title": "buy milk", "done": true }));

    let res = request(&app, "GET", "/items", None).await;
    let items = body_json(res).await;
    let mut ids: Vec<u64> = items.as_array().unwrap().iter().map(|t| t["id"].as_u64().unwrap()).collect();
    ids.sort();
    assert_eq!(ids, vec![1, 2]);
}

#[tokio::test]
async fn acceptance_create_ignores_done_flag() {
    let app = app();
    let res = request(&app, "POST", "/items", Some(json!({ "title": "a", "done": true }))).await;
    assert_eq!(res.status(), 201);
    assert_eq!(body_json(res).await["done"], json!(false));
}

#[tokio::test]
async fn acceptance_missing_items() {
    let app = app();

    let res = request(&app, "PUT", "/items/9", Some(json!({ "title": "x", "done": true }))).await;
    assert_eq!(res.status(), 404);

    let res = request(&app, "DELETE", "/items/9", None).await;
    assert_eq!(res.status(), 204);

    let res = request(&app, "GET", "/items", None).await;
    assert_eq!(body_json(res).await, json!([]));
}

#[tokio::test]
async fn acceptance_negative_id_is_just_absent() {
    let app = app();

    let res = request(&app, "GET", "/items/-1", None).await;
    assert_eq!(res.status(), 404);

    let res = request(&app, "PUT", "/items/-1", Some(json!({ "title": "x", "done": true }))).await;
    assert_eq!(res.status(), 404);

    let res = request(&app, "DELETE", "/items/-1", None).await;
    assert_eq!(res.status(), 204);
}

#[tokio::test]
async fn acceptance_bad_input_is_rejected_before_the_store() {
    let app = app();

    let res = request(&app, "GET", "/items/abc", None).await;
    assert_eq!(res.status(), 400);
    assert_eq!(body_json(res).await, json!({ "message": "invalid id" }));

    let res = request(&app, "POST", "/items", Some(json!({ "done": true }))).await;
    assert!(res.status().is_client_error());

    let res = request(&app, "GET", "/items", None).await;
    assert_eq!(body_json(res).await, json!([]));
}

#[tokio::test]
async fn acceptance_health() {
    let res = request(&app(), "GET", "/health", None).await;
    assert_eq!(res.status(), 200);
    assert_eq!(&body_bytes(res).await[..], b"ok");
}

async fn body_bytes(res: hyper::Response<axum::body::Body>) -> axum::body::Bytes {
    to_bytes(res.into_body(), 1024 * 1024).await.unwrap()
}

async fn body_json(res: hyper::Response<axum::body::Body>) -> serde_json::Value {
    serde_json::from_slice(&body_bytes(res).await).unwrap()
}

async fn request(app: &Router, method: &str, path: &str, body: Option<serde_json::Value>) -> hyper::Response<axum::body::Body> {
    use axum::body::Body;
    use axum::http::{Request, Method};
    use tower::ServiceExt;

    let req = Request::builder().method(Method::from_bytes(method.as_bytes()).unwrap()).uri(path);
    let req = match body {
        Some(json) => req.header("content-type", "application/json").body(Body::from(json.to_string())).unwrap(),
        None => req.body(Body::empty()).unwrap(),
    };
    app.clone().oneshot(req).await.unwrap()
}
