//! Router-level integration tests against an in-memory database.
//!
//! Each test builds its own app with a fresh SQLite database and drives
//! the router directly, so no listener or external service is needed.

use axum::body::Body;
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use migration::MigratorTrait;
use sea_orm::{ConnectOptions, Database};
use serde_json::{json, Value};
use tower::ServiceExt;
use tower_http::cors::CorsLayer;
use uuid::Uuid;

use server::routes::{self, AppState};

async fn test_app() -> anyhow::Result<Router> {
    let url = format!(
        "sqlite:file:server_{}?mode=memory&cache=shared",
        Uuid::new_v4().simple()
    );
    let mut opts = ConnectOptions::new(url);
    opts.max_connections(1).min_connections(1);
    let db = Database::connect(opts).await?;
    migration::Migrator::up(&db, None).await?;
    Ok(routes::build_router(CorsLayer::very_permissive(), AppState { db }))
}

fn json_request(method: Method, uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn bare_request(method: Method, uri: &str) -> Request<Body> {
    Request::builder().method(method).uri(uri).body(Body::empty()).unwrap()
}

async fn send(app: &Router, req: Request<Body>) -> (StatusCode, Value) {
    let res = app.clone().oneshot(req).await.unwrap();
    let status = res.status();
    let bytes = axum::body::to_bytes(res.into_body(), usize::MAX).await.unwrap();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::Null)
    };
    (status, body)
}

fn user_body(email: &str) -> Value {
    json!({
        "first_name": "Ada",
        "last_name": "Lovelace",
        "primary_email_address": email,
        "password": "correct horse battery staple"
    })
}

fn email() -> String {
    format!("api_{}@example.com", Uuid::new_v4())
}

#[tokio::test]
async fn health_and_docs_are_served() -> anyhow::Result<()> {
    let app = test_app().await?;

    let (status, body) = send(&app, bare_request(Method::GET, "/health")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");

    let (status, body) = send(&app, bare_request(Method::GET, "/api-docs/openapi.json")).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["paths"]["/users"].is_object());
    Ok(())
}

#[tokio::test]
async fn user_crud_round_trip() -> anyhow::Result<()> {
    let app = test_app().await?;
    let addr = email();

    let (status, created) = send(&app, json_request(Method::POST, "/users", user_body(&addr))).await;
    assert_eq!(status, StatusCode::CREATED);
    let id = created["id"].as_i64().unwrap();
    assert_eq!(created["primary_email_address"], addr.as_str());
    assert!(created.get("password_hash").is_none(), "hash must not be returned");

    // A hit and a miss are distinguishable outcomes.
    let (status, _) = send(&app, bare_request(Method::GET, &format!("/users/{id}"))).await;
    assert_eq!(status, StatusCode::OK);
    let (status, body) = send(&app, bare_request(Method::GET, "/users/999999")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["status"], 404);

    let (status, report) = send(
        &app,
        json_request(Method::PATCH, &format!("/users/{id}"), json!({"city": "Boston"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(report["rows_affected"], 1);

    let (_, reloaded) = send(&app, bare_request(Method::GET, &format!("/users/{id}"))).await;
    assert_eq!(reloaded["city"], "Boston");
    assert_eq!(reloaded["first_name"], "Ada", "untouched fields survive a partial update");

    let (status, _) = send(&app, bare_request(Method::DELETE, &format!("/users/{id}"))).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    let (status, _) = send(&app, bare_request(Method::DELETE, &format!("/users/{id}"))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    Ok(())
}

#[tokio::test]
async fn duplicate_email_maps_to_bad_request() -> anyhow::Result<()> {
    let app = test_app().await?;
    let addr = email();

    let (status, _) = send(&app, json_request(Method::POST, "/users", user_body(&addr))).await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, body) = send(&app, json_request(Method::POST, "/users", user_body(&addr))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["status"], 400);
    assert!(body["message"].as_str().unwrap().len() > 0);
    Ok(())
}

#[tokio::test]
async fn role_attach_detach_flow() -> anyhow::Result<()> {
    let app = test_app().await?;

    let (_, user) = send(&app, json_request(Method::POST, "/users", user_body(&email()))).await;
    let user_id = user["id"].as_i64().unwrap();
    let (_, admin) = send(
        &app,
        json_request(Method::POST, "/roles", json!({"name": format!("admin_{}", Uuid::new_v4())})),
    )
    .await;
    let (_, editor) = send(
        &app,
        json_request(Method::POST, "/roles", json!({"name": format!("editor_{}", Uuid::new_v4())})),
    )
    .await;
    let (admin_id, editor_id) = (admin["id"].as_i64().unwrap(), editor["id"].as_i64().unwrap());

    let uri = format!("/users/{user_id}/roles/{admin_id}");
    let (status, _) = send(&app, bare_request(Method::PATCH, &uri)).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    // Attaching the same pair again conflicts.
    let (status, body) = send(&app, bare_request(Method::PATCH, &uri)).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["status"], 409);

    // Detach, then detach again as a quiet no-op.
    let (status, _) = send(&app, bare_request(Method::DELETE, &uri)).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    let (status, _) = send(&app, bare_request(Method::DELETE, &uri)).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    // Bulk attach via repeated query parameters.
    let bulk = format!("/users/{user_id}/roles?roleId={admin_id}&roleId={editor_id}");
    let (status, _) = send(&app, bare_request(Method::PATCH, &bulk)).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    let (status, _) = send(&app, bare_request(Method::DELETE, &bulk)).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    // Unknown role on attach is a 404, not a silent no-op.
    let (status, _) = send(
        &app,
        bare_request(Method::PATCH, &format!("/users/{user_id}/roles/999999")),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    Ok(())
}

#[tokio::test]
async fn profile_set_and_unset() -> anyhow::Result<()> {
    let app = test_app().await?;

    let (_, user) = send(&app, json_request(Method::POST, "/users", user_body(&email()))).await;
    let user_id = user["id"].as_i64().unwrap();
    let (status, profile) = send(
        &app,
        json_request(Method::POST, "/user-profiles", json!({"photo": "/p/1.png"})),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let profile_id = profile["id"].as_i64().unwrap();

    let (status, _) = send(
        &app,
        bare_request(Method::PATCH, &format!("/users/{user_id}/user-profile/{profile_id}")),
    )
    .await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    let (_, linked) = send(&app, bare_request(Method::GET, &format!("/user-profiles/{profile_id}"))).await;
    assert_eq!(linked["user_id"], user_id);

    let (status, _) = send(
        &app,
        bare_request(Method::PATCH, &format!("/users/{user_id}/user-profile")),
    )
    .await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    let (_, unlinked) = send(&app, bare_request(Method::GET, &format!("/user-profiles/{profile_id}"))).await;
    assert!(unlinked["user_id"].is_null());
    Ok(())
}

#[tokio::test]
async fn department_membership_and_delete_policy() -> anyhow::Result<()> {
    let app = test_app().await?;

    let (_, dept) = send(
        &app,
        json_request(
            Method::POST,
            "/departments",
            json!({"name": "Research", "location": "Abuja"}),
        ),
    )
    .await;
    let dept_id = dept["id"].as_i64().unwrap();

    let mut employee_ids = Vec::new();
    for first in ["Grace", "Edsger"] {
        let (status, emp) = send(
            &app,
            json_request(
                Method::POST,
                "/employees",
                json!({"first_name": first, "last_name": "Doe"}),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        employee_ids.push(emp["id"].as_i64().unwrap());
    }

    let bulk = format!(
        "/departments/{dept_id}/employees?employeeId={}&employeeId={}",
        employee_ids[0], employee_ids[1]
    );
    let (status, _) = send(&app, bare_request(Method::PATCH, &bulk)).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (_, member) = send(
        &app,
        bare_request(Method::GET, &format!("/employees/{}", employee_ids[0])),
    )
    .await;
    assert_eq!(member["department_id"], dept_id);

    // Deleting the department keeps the employees, with the reference cleared.
    let (status, _) = send(&app, bare_request(Method::DELETE, &format!("/departments/{dept_id}"))).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    for id in &employee_ids {
        let (status, emp) = send(&app, bare_request(Method::GET, &format!("/employees/{id}"))).await;
        assert_eq!(status, StatusCode::OK);
        assert!(emp["department_id"].is_null());
    }
    Ok(())
}

#[tokio::test]
async fn user_listing_supports_the_enumerated_contract_only() -> anyhow::Result<()> {
    let app = test_app().await?;

    for (first, city) in [("Ada", "Boston"), ("Grace", "Boston"), ("Edsger", "Austin")] {
        let mut body = user_body(&email());
        body["first_name"] = json!(first);
        body["city"] = json!(city);
        let (status, _) = send(&app, json_request(Method::POST, "/users", body)).await;
        assert_eq!(status, StatusCode::CREATED);
    }

    let (status, body) = send(&app, bare_request(Method::GET, "/users")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["total"], 3);

    let (status, body) = send(
        &app,
        bare_request(Method::GET, "/users?filter=city:eq:Boston&sort=first_name:desc"),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["total"], 2);
    assert_eq!(body["items"][0]["first_name"], "Grace");
    assert_eq!(body["items"][1]["first_name"], "Ada");

    let (status, body) = send(
        &app,
        bare_request(Method::GET, "/users?filter=city:eq:Boston&page=1&per_page=1"),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["items"].as_array().unwrap().len(), 1);
    assert_eq!(body["total"], 2);

    // The old free-form pass-through is gone.
    let (status, _) = send(
        &app,
        bare_request(Method::GET, "/users?find-options=%7B%22where%22%3A%7B%7D%7D"),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    // Filters on unlisted fields are rejected, not forwarded.
    let (status, _) = send(&app, bare_request(Method::GET, "/users?filter=password_hash:eq:x")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    Ok(())
}

#[tokio::test]
async fn non_numeric_identifiers_are_rejected() -> anyhow::Result<()> {
    let app = test_app().await?;
    let (status, _) = send(&app, bare_request(Method::GET, "/users/abc")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (_, user) = send(&app, json_request(Method::POST, "/users", user_body(&email()))).await;
    let user_id = user["id"].as_i64().unwrap();
    let (status, _) = send(
        &app,
        bare_request(Method::PATCH, &format!("/users/{user_id}/roles?roleId=abc")),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    Ok(())
}
