//! HTTP surface, driven through the real router with `oneshot`

use axum::Router;
use axum::body::Body;
use http::{Method, Request, StatusCode, header};
use http_body_util::BodyExt;
use roster_server::api::build_app;
use roster_server::{Config, DbService, ServerState};
use serde_json::{Value, json};
use tower::ServiceExt;

async fn app() -> Router {
    let config = Config::from_lookup(|_| None).expect("development defaults");
    let db = DbService::in_memory().await.expect("in-memory database");
    build_app(ServerState::new(config, db))
}

async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    let body = match body {
        Some(json) => {
            builder = builder.header(header::CONTENT_TYPE, "application/json");
            Body::from(json.to_string())
        }
        None => Body::empty(),
    };

    let response = app
        .clone()
        .oneshot(builder.body(body).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
}

async fn get(app: &Router, uri: &str) -> (StatusCode, Value) {
    send(app, Method::GET, uri, None).await
}

async fn post_employee(app: &Router, name: &str, department: &str, salary: i64, hire_date: &str) -> Value {
    let (status, body) = send(
        app,
        Method::POST,
        "/api/v1/employees/employees",
        Some(json!({
            "name": name,
            "department": department,
            "salary": salary,
            "hire_date": hire_date,
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "{body}");
    body
}

async fn seed_abc(app: &Router) {
    post_employee(app, "A", "Eng", 100, "2021-01-01").await;
    post_employee(app, "B", "Eng", 200, "2021-06-01").await;
    post_employee(app, "C", "Sales", 50, "2022-01-01").await;
}

fn names(body: &Value) -> Vec<&str> {
    body.as_array()
        .unwrap()
        .iter()
        .map(|e| e["name"].as_str().unwrap())
        .collect()
}

#[tokio::test]
async fn test_list_on_empty_store_is_empty_array() {
    let app = app().await;
    let (status, body) = get(&app, "/api/v1/employees/employees").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!([]));
}

#[tokio::test]
async fn test_create_and_fetch_employee() {
    let app = app().await;
    let created = post_employee(&app, "Ada Lovelace", "Engineering", 120_000, "2021-03-15").await;
    assert_eq!(created["name"], "Ada Lovelace");
    assert_eq!(created["hire_date"], "2021-03-15");

    let id = created["id"].as_i64().unwrap();
    let (status, body) = get(&app, &format!("/api/v1/employees/employees/{id}")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, created);

    let (_, list) = get(&app, "/api/v1/employees/employees").await;
    assert_eq!(list, json!([created]));
}

#[tokio::test]
async fn test_missing_employee_is_404() {
    let app = app().await;
    let (status, body) = get(&app, "/api/v1/employees/employees/77").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], 8001);
    assert_eq!(body["message"], "Employee 77 not found");
}

#[tokio::test]
async fn test_non_numeric_id_is_400() {
    let app = app().await;
    let (status, body) = get(&app, "/api/v1/employees/employees/abc").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["code"].is_u64());
}

#[tokio::test]
async fn test_invalid_payloads_are_400() {
    let app = app().await;

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/v1/employees/employees",
        Some(json!({"name": "A", "department": "Eng", "salary": -1, "hire_date": "2021-01-01"})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], 8003);
    assert_eq!(body["details"]["field"], "salary");

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/v1/employees/employees",
        Some(json!({"name": "A", "department": "Eng", "salary": 1, "hire_date": "2019-12-31"})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], 8002);

    let (status, _) = send(
        &app,
        Method::POST,
        "/api/v1/employees/employees",
        Some(json!({"name": "A"})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (_, list) = get(&app, "/api/v1/employees/employees").await;
    assert_eq!(list, json!([]));
}

#[tokio::test]
async fn test_update_employee() {
    let app = app().await;
    let created = post_employee(&app, "B", "Eng", 200, "2021-06-01").await;
    let uri = format!("/api/v1/employees/employees/{}", created["id"]);

    let (status, body) = send(&app, Method::PUT, &uri, Some(json!({"salary": 210}))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["salary"], 210);
    assert_eq!(body["department"], "Eng");

    let (status, _) = send(&app, Method::PUT, &uri, Some(json!({}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = send(
        &app,
        Method::PUT,
        "/api/v1/employees/employees/999",
        Some(json!({"salary": 1})),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_delete_reports_whether_removed() {
    let app = app().await;
    let created = post_employee(&app, "C", "Sales", 50, "2022-01-01").await;
    let uri = format!("/api/v1/employees/employees/{}", created["id"]);

    let (status, body) = send(&app, Method::DELETE, &uri, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!(true));

    let (status, body) = send(&app, Method::DELETE, &uri, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!(false));
}

#[tokio::test]
async fn test_queries_end_to_end() {
    let app = app().await;
    seed_abc(&app).await;

    let (status, body) = get(&app, "/api/v1/employees/departments/Eng/average-salary").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["department"], "Eng");
    assert_eq!(body["average_salary"].as_f64(), Some(150.0));

    let (_, body) = get(&app, "/api/v1/employees/top-earners?limit=2").await;
    assert_eq!(names(&body), ["B", "A"]);

    let (_, body) = get(&app, "/api/v1/employees/recent-hires?limit=1").await;
    assert_eq!(names(&body), ["C"]);

    let (_, body) = get(&app, "/api/v1/employees/top-earners").await;
    assert_eq!(names(&body), ["B", "A", "C"]);

    let (_, body) = get(&app, "/api/v1/employees/departments").await;
    assert_eq!(body, json!(["Eng", "Sales"]));

    let (_, body) = get(&app, "/api/v1/employees/departments/Eng/employees").await;
    assert_eq!(names(&body), ["A", "B"]);

    let (_, body) = get(&app, "/api/v1/employees/search?name=C").await;
    assert_eq!(names(&body), ["C"]);
}

#[tokio::test]
async fn test_average_salary_of_unknown_department_is_null() {
    let app = app().await;
    let (status, body) = get(&app, "/api/v1/employees/departments/Ghost/average-salary").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"department": "Ghost", "average_salary": null}));
}

#[tokio::test]
async fn test_bad_limit_is_400() {
    let app = app().await;
    let (status, _) = get(&app, "/api/v1/employees/top-earners?limit=-3").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_health_endpoints() {
    let app = app().await;
    let (status, body) = get(&app, "/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
    assert_eq!(body["service"], "roster-server");

    let (status, body) = get(&app, "/health/detailed").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["checks"]["database"]["status"], "ok");
    assert_eq!(body["environment"], "development");
}

#[tokio::test]
async fn test_request_id_is_echoed() {
    let app = app().await;
    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .uri("/health")
                .header("x-request-id", "req-123")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.headers()["x-request-id"], "req-123");

    let response = app
        .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert!(response.headers().contains_key("x-request-id"));
}

#[tokio::test]
async fn test_unreachable_database_is_503() {
    let config = Config::from_lookup(|_| None).expect("development defaults");
    let db = DbService::in_memory().await.expect("in-memory database");
    db.pool.close().await;
    let app = build_app(ServerState::new(config, db));

    let (status, body) = get(&app, "/api/v1/employees/employees").await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(body["code"], 9003);

    let (status, body) = get(&app, "/health/detailed").await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(body["checks"]["database"]["status"], "error");
}
