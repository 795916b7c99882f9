//! End-to-end tests through the full middleware stack, in process

use axum::Router;
use axum::body::{Body, to_bytes};
use http::{Method, Request, StatusCode, header};
use serde_json::{Value, json};
use tower::ServiceExt;

use employee_server::api::build_app;
use employee_server::db::{DbService, seed};
use employee_server::{Config, ServerState};

async fn app_with(seeded: bool) -> Router {
    let db = DbService::in_memory().await.unwrap();
    if seeded {
        seed::seed_if_empty(&db.pool).await.unwrap();
    }
    let state = ServerState::with_db(Config::with_overrides("sqlite::memory:", 0), db);
    build_app(&state).with_state(state)
}

async fn app() -> Router {
    app_with(true).await
}

async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Vec<u8>) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(json) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, bytes.to_vec())
}

async fn get_json(app: &Router, uri: &str) -> (StatusCode, Value) {
    let (status, bytes) = send(app, Method::GET, uri, None).await;
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
}

fn emp_codes(list: &Value) -> Vec<&str> {
    list.as_array()
        .unwrap()
        .iter()
        .map(|e| e["empCode"].as_str().unwrap())
        .collect()
}

fn new_employee() -> Value {
    json!({
        "empCode": "EMP200",
        "firstName": "Anu",
        "lastName": "K",
        "department": "IT",
        "designation": "Developer",
        "email": "anu@corp.com",
        "salary": 45000.0,
        "phoneNumber": "9000000001",
        "address": "3, Beach Rd",
        "city": "Chennai"
    })
}

// ── CRUD ────────────────────────────────────────────────────────────

#[tokio::test]
async fn test_list_all_seeded() {
    let app = app().await;
    let (status, body) = get_json(&app, "/api/employees").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        emp_codes(&body),
        vec!["EMP101", "EMP102", "EMP103", "EMP104", "EMP105"]
    );
}

#[tokio::test]
async fn test_list_all_empty_is_200() {
    let app = app_with(false).await;
    let (status, bytes) = send(&app, Method::GET, "/api/employees", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(serde_json::from_slice::<Value>(&bytes).unwrap(), json!([]));
}

#[tokio::test]
async fn test_create_returns_201_with_id() {
    let app = app().await;
    let (status, bytes) = send(&app, Method::POST, "/api/employees", Some(new_employee())).await;
    assert_eq!(status, StatusCode::CREATED);

    let created: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(created["id"], 6);
    assert_eq!(created["empCode"], "EMP200");
    assert_eq!(created["salary"], 45000.0);

    let (status, fetched) = get_json(&app, "/api/employees/6").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched, created);
}

#[tokio::test]
async fn test_create_ignores_body_id() {
    let app = app().await;
    let mut body = new_employee();
    body["id"] = json!(1);
    let (status, bytes) = send(&app, Method::POST, "/api/employees", Some(body)).await;
    assert_eq!(status, StatusCode::CREATED);
    let created: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(created["id"], 6);

    let (_, first) = get_json(&app, "/api/employees/1").await;
    assert_eq!(first["empCode"], "EMP101");
}

#[tokio::test]
async fn test_get_missing_is_404_with_path() {
    let app = app().await;
    let (status, body) = get_json(&app, "/api/employees/9").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["status"], 404);
    assert_eq!(body["error"], "Resource Not Found");
    assert_eq!(body["message"], "Employee not found with ID: 9");
    assert_eq!(body["path"], "/api/employees/9");
    assert!(body["timestamp"].is_string());
}

#[tokio::test]
async fn test_non_numeric_id_is_400() {
    let app = app().await;
    let (status, body) = get_json(&app, "/api/employees/abc").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Bad Request");
    assert_eq!(body["path"], "/api/employees/abc");
}

#[tokio::test]
async fn test_update_keeps_emp_code() {
    let app = app().await;
    let mut body = new_employee();
    body["empCode"] = json!("IGNORED");
    body["salary"] = json!(70000.0);

    let (status, bytes) = send(&app, Method::PUT, "/api/employees/1", Some(body)).await;
    assert_eq!(status, StatusCode::OK);
    let updated: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(updated["id"], 1);
    assert_eq!(updated["empCode"], "EMP101");
    assert_eq!(updated["firstName"], "Anu");
    assert_eq!(updated["salary"], 70000.0);
}

#[tokio::test]
async fn test_update_missing_is_404() {
    let app = app().await;
    let (status, bytes) = send(&app, Method::PUT, "/api/employees/77", Some(new_employee())).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    let body: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(body["message"], "Employee not found with ID: 77");
}

#[tokio::test]
async fn test_delete_is_200_even_when_missing() {
    let app = app().await;
    let (status, bytes) = send(&app, Method::DELETE, "/api/employees/2", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(bytes, b"Employee deleted successfully!");

    let (status, _) = get_json(&app, "/api/employees/2").await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, bytes) = send(&app, Method::DELETE, "/api/employees/2", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(bytes, b"Employee deleted successfully!");
}

#[tokio::test]
async fn test_delete_all() {
    let app = app().await;
    let (status, bytes) = send(&app, Method::DELETE, "/api/employees/delete-all", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(bytes, b"All employees deleted successfully.");

    let (status, body) = get_json(&app, "/api/employees").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!([]));
}

// ── Validation ──────────────────────────────────────────────────────

#[tokio::test]
async fn test_invalid_payload_lists_every_violation() {
    let app = app().await;
    let mut body = new_employee();
    body["firstName"] = json!("  ");
    body["email"] = json!("not-an-email");
    body["salary"] = json!(-1.0);
    body["phoneNumber"] = json!("12345");

    let (status, bytes) = send(&app, Method::POST, "/api/employees", Some(body)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let error: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(error["status"], 400);
    assert_eq!(error["error"], "Validation Failed");
    assert_eq!(error["path"], "/api/employees");
    assert!(error.get("message").is_none());
    assert_eq!(
        error["messages"],
        json!([
            "email: Email should be valid",
            "firstName: First name is required",
            "phoneNumber: Phone number must be 10 digits",
            "salary: Salary must be positive",
        ])
    );

    let (_, list) = get_json(&app, "/api/employees").await;
    assert_eq!(list.as_array().unwrap().len(), 5);
}

#[tokio::test]
async fn test_update_is_validated() {
    let app = app().await;
    let mut body = new_employee();
    body["city"] = json!("");
    let (status, bytes) = send(&app, Method::PUT, "/api/employees/1", Some(body)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    let error: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(error["messages"], json!(["city: City is required"]));
}

#[tokio::test]
async fn test_malformed_json_is_bad_request() {
    let app = app().await;
    let request = Request::post("/api/employees")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{\"empCode\": "))
        .unwrap();
    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let error: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(error["error"], "Bad Request");
}

#[tokio::test]
async fn test_duplicate_emp_code_is_500() {
    let app = app().await;
    let mut body = new_employee();
    body["empCode"] = json!("EMP101");
    let (status, bytes) = send(&app, Method::POST, "/api/employees", Some(body)).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    let error: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(error["error"], "Internal Server Error");
}

// ── Filters ─────────────────────────────────────────────────────────

#[tokio::test]
async fn test_filter_by_city() {
    let app = app().await;
    let (status, body) = get_json(&app, "/api/employees/city/Chennai").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(emp_codes(&body), vec!["EMP101", "EMP105"]);
}

#[tokio::test]
async fn test_filter_without_match_is_204() {
    let app = app().await;
    for uri in [
        "/api/employees/city/Atlantis",
        "/api/employees/designation/Astronaut",
        "/api/employees/department/Legal",
        "/api/employees/salary-between/1/2",
        "/api/employees/salary-above/1000000",
        "/api/employees/name-search/zzz",
        "/api/employees/name-prefix/Q",
        "/api/employees/email-domain/nowhere.org",
        "/api/employees/high-earners/IT/99999",
        "/api/employees/city/Chennai/designation/Analyst",
        "/api/employees/department/HR/city/Pune",
    ] {
        let (status, bytes) = send(&app, Method::GET, uri, None).await;
        assert_eq!(status, StatusCode::NO_CONTENT, "{uri}");
        assert!(bytes.is_empty(), "{uri}");
    }
}

#[tokio::test]
async fn test_empty_table_reads_are_204() {
    let app = app_with(false).await;
    for uri in [
        "/api/employees/salary-desc",
        "/api/employees/top-paid",
        "/api/employees/average-salary",
        "/api/employees/count-by-city",
    ] {
        let (status, bytes) = send(&app, Method::GET, uri, None).await;
        assert_eq!(status, StatusCode::NO_CONTENT, "{uri}");
        assert!(bytes.is_empty(), "{uri}");
    }
}

#[tokio::test]
async fn test_salary_between_is_inclusive() {
    let app = app().await;
    let (status, body) = get_json(&app, "/api/employees/salary-between/52000/60000").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(emp_codes(&body), vec!["EMP102", "EMP104", "EMP105"]);
}

#[tokio::test]
async fn test_salary_above_is_strict() {
    let app = app().await;
    let (_, body) = get_json(&app, "/api/employees/salary-above/60000").await;
    assert_eq!(emp_codes(&body), vec!["EMP101"]);
}

#[tokio::test]
async fn test_unparsable_amount_is_400() {
    let app = app().await;
    let (status, body) = get_json(&app, "/api/employees/salary-above/lots").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Bad Request");
}

#[tokio::test]
async fn test_salary_desc_order() {
    let app = app().await;
    let (status, body) = get_json(&app, "/api/employees/salary-desc").await;
    assert_eq!(status, StatusCode::OK);
    let salaries: Vec<f64> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|e| e["salary"].as_f64().unwrap())
        .collect();
    assert_eq!(salaries, vec![65000.0, 60000.0, 58000.0, 52000.0, 50000.0]);
}

#[tokio::test]
async fn test_top_paid() {
    let app = app().await;
    let (_, body) = get_json(&app, "/api/employees/top-paid").await;
    assert_eq!(emp_codes(&body), vec!["EMP101", "EMP105", "EMP102"]);
}

#[tokio::test]
async fn test_name_search_and_prefix_ignore_case() {
    let app = app().await;
    let (_, body) = get_json(&app, "/api/employees/name-search/VARSH").await;
    assert_eq!(emp_codes(&body), vec!["EMP105"]);

    let (_, body) = get_json(&app, "/api/employees/name-prefix/s").await;
    assert_eq!(emp_codes(&body), vec!["EMP103", "EMP105"]);
}

#[tokio::test]
async fn test_name_search_folds_non_ascii_case() {
    let app = app().await;
    let mut body = new_employee();
    body["firstName"] = json!("Élodie");
    let (status, _) = send(&app, Method::POST, "/api/employees", Some(body)).await;
    assert_eq!(status, StatusCode::CREATED);

    for uri in [
        "/api/employees/name-search/%C3%A9lo",
        "/api/employees/name-search/%C3%89LO",
        "/api/employees/name-prefix/%C3%A9l",
    ] {
        let (status, body) = get_json(&app, uri).await;
        assert_eq!(status, StatusCode::OK, "{uri}");
        assert_eq!(emp_codes(&body), vec!["EMP200"], "{uri}");
    }
}

#[tokio::test]
async fn test_combined_filters() {
    let app = app().await;
    let (_, body) = get_json(&app, "/api/employees/high-earners/IT/60000").await;
    assert_eq!(emp_codes(&body), vec!["EMP101"]);

    let (_, body) = get_json(&app, "/api/employees/city/Chennai/designation/Tester").await;
    assert_eq!(emp_codes(&body), vec!["EMP105"]);

    let (_, body) = get_json(&app, "/api/employees/department/IT/city/Chennai").await;
    assert_eq!(emp_codes(&body), vec!["EMP101", "EMP105"]);

    let (_, body) = get_json(&app, "/api/employees/email-domain/corp.com").await;
    assert_eq!(emp_codes(&body), vec!["EMP102", "EMP103", "EMP104", "EMP105"]);
}

// ── Aggregates ──────────────────────────────────────────────────────

#[tokio::test]
async fn test_average_salary_by_department() {
    let app = app().await;
    let (status, body) = get_json(&app, "/api/employees/average-salary").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!([
            ["Finance", 58000.0],
            ["HR", 50000.0],
            ["IT", 62500.0],
            ["Marketing", 52000.0]
        ])
    );
}

#[tokio::test]
async fn test_count_by_city() {
    let app = app().await;
    let (status, body) = get_json(&app, "/api/employees/count-by-city").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!([["Bangalore", 1], ["Chennai", 2], ["Hyderabad", 1], ["Pune", 1]])
    );
}

// ── Ambient ─────────────────────────────────────────────────────────

#[tokio::test]
async fn test_health_reports_count() {
    let app = app().await;
    let (status, body) = get_json(&app, "/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
    assert_eq!(body["employees"], 5);
}

#[tokio::test]
async fn test_request_id_is_propagated() {
    let app = app().await;
    let response = app
        .clone()
        .oneshot(Request::get("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert!(response.headers().contains_key("x-request-id"));

    let response = app
        .oneshot(
            Request::get("/health")
                .header("x-request-id", "trace-me")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.headers()["x-request-id"], "trace-me");
}
