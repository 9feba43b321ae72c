//! Shared helpers for Web API integration tests.

#![allow(dead_code)]

use axum::http::HeaderValue;
use axum_test::TestServer;
use serde_json::{json, Value};
use std::sync::Arc;

use dealership::auth::TokenService;
use dealership::db::{NewUser, UserRepository};
use dealership::web::{create_router, AppState};
use dealership::{hash_password, Database};

pub const TEST_SECRET: &str = "test-secret-key-for-testing-only";
pub const TEST_TOKEN_LIFETIME: u64 = 900;

/// A test server plus a handle on its database.
pub struct TestApp {
    pub server: TestServer,
    pub db: Database,
}

async fn build_app(install_enabled: bool) -> TestApp {
    let db = Database::open_in_memory()
        .await
        .expect("Failed to create test database");
    let tokens = TokenService::new(TEST_SECRET, TEST_TOKEN_LIFETIME).expect("token service");
    let state = Arc::new(AppState::new(db.clone(), tokens));

    let router = create_router(state, &[], install_enabled);
    let server = TestServer::new(router).expect("Failed to create test server");

    TestApp { server, db }
}

/// Test server with `/install` disabled.
pub async fn spawn_app() -> TestApp {
    build_app(false).await
}

/// Test server with `/install` mounted.
pub async fn spawn_app_with_install() -> TestApp {
    build_app(true).await
}

/// Insert a regular user directly and return its ID.
pub async fn create_user(db: &Database, name: &str, email: &str, password: &str) -> i64 {
    insert_user(db, NewUser::new(name, email, hash_password(password).unwrap())).await
}

/// Insert an administrator directly and return its ID.
pub async fn create_admin(db: &Database, name: &str, email: &str, password: &str) -> i64 {
    insert_user(
        db,
        NewUser::new(name, email, hash_password(password).unwrap()).admin(),
    )
    .await
}

async fn insert_user(db: &Database, user: NewUser) -> i64 {
    UserRepository::new(db.pool())
        .create(&user)
        .await
        .expect("Failed to create user")
        .id
}

/// Log in and return the bearer token.
pub async fn login(server: &TestServer, email: &str, password: &str) -> String {
    let response = server
        .post("/login")
        .json(&json!({ "email": email, "password": password }))
        .await;
    response.assert_status_ok();

    let body: Value = response.json();
    body["data"]["token"]
        .as_str()
        .expect("token in login response")
        .to_string()
}

/// `Authorization` header value carrying the given token.
pub fn bearer(token: &str) -> HeaderValue {
    HeaderValue::from_str(&format!("Bearer {token}")).unwrap()
}

/// Error code of an error response body.
pub fn error_code(body: &Value) -> &str {
    body["error"]["code"].as_str().unwrap_or_default()
}
