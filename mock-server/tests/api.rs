use axum::http::{self, Request, StatusCode};
use axum::routing::RouterIntoService;
use http_body_util::BodyExt;
use mock_server::{app, Todo};
use tower::{Service, ServiceExt};

async fn body_json<T: serde::de::DeserializeOwned>(response: axum::response::Response) -> T {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

fn json_request(method: &str, uri: &str, body: &str) -> Request<String> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(http::header::CONTENT_TYPE, "application/json")
        .body(body.to_string())
        .unwrap()
}

fn empty_request(method: &str, uri: &str) -> Request<String> {
    Request::builder()
        .method(method)
        .uri(uri)
        .body(String::new())
        .unwrap()
}

/// Sends one request through a shared router so state persists across calls.
async fn send(app: &mut RouterIntoService<String>, request: Request<String>) -> axum::response::Response {
    ServiceExt::ready(app)
        .await
        .unwrap()
        .call(request)
        .await
        .unwrap()
}

// --- list ---

#[tokio::test]
async fn list_todos_empty() {
    let resp = app().oneshot(empty_request("GET", "/todos")).await.unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let todos: Vec<Todo> = body_json(resp).await;
    assert!(todos.is_empty());
}

// --- create ---

#[tokio::test]
async fn create_todo_assigns_first_id() {
    let resp = app()
        .oneshot(json_request(
            "POST",
            "/todos",
            r#"{"title":"Buy milk","description":"2 litres"}"#,
        ))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let todo: Todo = body_json(resp).await;
    assert_eq!(todo.id, 1);
    assert_eq!(todo.title, "Buy milk");
    assert_eq!(todo.description.as_deref(), Some("2 litres"));
    assert!(!todo.completed);
}

#[tokio::test]
async fn create_todo_malformed_json_returns_422() {
    let resp = app()
        .oneshot(json_request("POST", "/todos", r#"{"not_title":1}"#))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

// --- get ---

#[tokio::test]
async fn get_todo_not_found() {
    let resp = app().oneshot(empty_request("GET", "/todos/1")).await.unwrap();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn get_todo_bad_id_returns_400() {
    let resp = app()
        .oneshot(empty_request("GET", "/todos/not-a-number"))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

// --- update / delete ---

#[tokio::test]
async fn update_todo_not_found() {
    let resp = app()
        .oneshot(json_request("PUT", "/todos/1", r#"{"title":"Nope"}"#))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn delete_todo_not_found() {
    let resp = app().oneshot(empty_request("DELETE", "/todos/1")).await.unwrap();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

// --- id sequence ---

#[tokio::test]
async fn ids_restart_after_table_is_emptied() {
    let mut app = app().into_service();

    for title in ["a", "b"] {
        let body = format!(r#"{{"title":"{title}"}}"#);
        let resp = send(&mut app, json_request("POST", "/todos", &body)).await;
        assert_eq!(resp.status(), StatusCode::OK);
    }

    // removing one of two keeps the sequence going
    send(&mut app, empty_request("DELETE", "/todos/1")).await;
    let resp = send(&mut app, json_request("POST", "/todos", r#"{"title":"c"}"#)).await;
    let todo: Todo = body_json(resp).await;
    assert_eq!(todo.id, 3);

    send(&mut app, empty_request("DELETE", "/todos/2")).await;
    send(&mut app, empty_request("DELETE", "/todos/3")).await;

    let resp = send(&mut app, json_request("POST", "/todos", r#"{"title":"d"}"#)).await;
    let todo: Todo = body_json(resp).await;
    assert_eq!(todo.id, 1);
}

// --- full CRUD lifecycle ---

#[tokio::test]
async fn crud_lifecycle() {
    let mut app = app().into_service();

    // create
    let resp = send(&mut app, json_request("POST", "/todos", r#"{"title":"Walk dog"}"#)).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let created: Todo = body_json(resp).await;
    assert_eq!(created.title, "Walk dog");
    assert!(!created.completed);
    let id = created.id;

    // list: should contain the one todo
    let resp = send(&mut app, empty_request("GET", "/todos")).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let todos: Vec<Todo> = body_json(resp).await;
    assert_eq!(todos, vec![created.clone()]);

    // get
    let resp = send(&mut app, empty_request("GET", &format!("/todos/{id}"))).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let fetched: Todo = body_json(resp).await;
    assert_eq!(fetched, created);

    // update: partial: only completed
    let resp = send(
        &mut app,
        json_request("PUT", &format!("/todos/{id}"), r#"{"completed":true}"#),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::OK);
    let updated: Todo = body_json(resp).await;
    assert_eq!(updated.title, "Walk dog"); // unchanged
    assert!(updated.description.is_none()); // unchanged
    assert!(updated.completed);

    // update: partial: title and description
    let resp = send(
        &mut app,
        json_request(
            "PUT",
            &format!("/todos/{id}"),
            r#"{"title":"Walk cat","description":"on a lead"}"#,
        ),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::OK);
    let updated: Todo = body_json(resp).await;
    assert_eq!(updated.title, "Walk cat");
    assert_eq!(updated.description.as_deref(), Some("on a lead"));
    assert!(updated.completed); // unchanged from previous update

    // delete: returns the removed record
    let resp = send(&mut app, empty_request("DELETE", &format!("/todos/{id}"))).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let deleted: Todo = body_json(resp).await;
    assert_eq!(deleted, updated);

    // get after delete: 404
    let resp = send(&mut app, empty_request("GET", &format!("/todos/{id}"))).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    // list after delete: empty
    let resp = send(&mut app, empty_request("GET", "/todos")).await;
    let todos: Vec<Todo> = body_json(resp).await;
    assert!(todos.is_empty());
}
