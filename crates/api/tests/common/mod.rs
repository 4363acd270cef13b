//! Shared harness for the HTTP integration tests.
//!
//! Builds the production router over in-memory stores, so these tests need
//! no database, and provides request/response helpers driven by
//! `tower::ServiceExt::oneshot`.

#![allow(dead_code)]

use std::sync::Arc;

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{header, Method, Request, Response};
use axum::Router;
use beasiswa_api::auth::jwt::JwtConfig;
use beasiswa_api::auth::verifier::CredentialVerifier;
use beasiswa_api::config::{AdminSeed, ServerConfig};
use beasiswa_api::router::build_app_router;
use beasiswa_api::state::AppState;
use beasiswa_core::application::{NaturalKey, NewApplication, ReviewUpdate};
use beasiswa_core::types::DbId;
use beasiswa_db::models::application::Application;
use beasiswa_db::store::{
    ApplicationStore, MemoryAdminStore, MemoryApplicationStore, StoreError, StoreResult,
};
use http_body_util::BodyExt;
use serde_json::Value;
use tower::ServiceExt;

pub const ADMIN_USERNAME: &str = "admin";
pub const ADMIN_PASSWORD: &str = "admin-test-password";
pub const JWT_SECRET: &str = "integration-test-secret-long-enough";

const MULTIPART_BOUNDARY: &str = "----beasiswa-test-boundary";

/// Build a test `ServerConfig` with safe defaults.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:3000".to_string()],
        request_timeout_secs: 30,
        max_upload_bytes: 5 * 1024 * 1024,
        db_max_connections: 1,
        store_timeout_secs: 5,
        jwt: JwtConfig {
            secret: JWT_SECRET.to_string(),
            expiry_mins: 1440,
        },
        admin_seed: AdminSeed {
            username: ADMIN_USERNAME.to_string(),
            password: Some(ADMIN_PASSWORD.to_string()),
        },
        log_json: false,
    }
}

/// Router plus a handle on its store for direct assertions.
pub struct TestApp {
    pub router: Router,
    pub applications: Arc<MemoryApplicationStore>,
}

/// Build the full application router with the admin account seeded.
pub async fn build_test_app() -> TestApp {
    let applications = Arc::new(MemoryApplicationStore::new());
    TestApp {
        router: build_router_over(applications.clone()).await,
        applications,
    }
}

/// Build the router over any record store, with the admin account seeded.
pub async fn build_router_over(applications: Arc<dyn ApplicationStore>) -> Router {
    let config = test_config();
    let credentials =
        CredentialVerifier::new(Arc::new(MemoryAdminStore::new()), config.jwt.clone()).unwrap();
    credentials
        .ensure_admin(ADMIN_USERNAME, ADMIN_PASSWORD)
        .await
        .unwrap();

    let state = AppState {
        applications,
        credentials: Arc::new(credentials),
    };
    build_app_router(state, &config)
}

/// Log in against `router` and return the bearer token.
pub async fn login(router: &Router) -> String {
    let body = serde_json::json!({ "username": ADMIN_USERNAME, "password": ADMIN_PASSWORD });
    let response = post_json(router, "/api/admin/login", body).await;
    assert_eq!(response.status(), 200, "admin login must succeed");
    let json = body_json(response).await;
    json["access_token"].as_str().unwrap().to_string()
}

/// Record store whose every call times out.
pub struct UnreachableStore;

fn timed_out<T>() -> StoreResult<T> {
    Err(StoreError::Unavailable("timed out after 5000ms".to_string()))
}

#[async_trait]
impl ApplicationStore for UnreachableStore {
    async fn find_by_id(&self, _id: DbId) -> StoreResult<Option<Application>> {
        timed_out()
    }

    async fn find_by_natural_key(&self, _key: &NaturalKey) -> StoreResult<Option<Application>> {
        timed_out()
    }

    async fn insert(&self, _input: &NewApplication) -> StoreResult<Application> {
        timed_out()
    }

    async fn replace_fields(
        &self,
        _id: DbId,
        _input: &NewApplication,
    ) -> StoreResult<Option<Application>> {
        timed_out()
    }

    async fn update_review(
        &self,
        _id: DbId,
        _input: &ReviewUpdate,
    ) -> StoreResult<Option<Application>> {
        timed_out()
    }

    async fn delete(&self, _id: DbId) -> StoreResult<bool> {
        timed_out()
    }

    async fn page(&self, _limit: i64, _offset: i64) -> StoreResult<Vec<Application>> {
        timed_out()
    }

    async fn count(&self) -> StoreResult<i64> {
        timed_out()
    }

    async fn ping(&self) -> StoreResult<()> {
        timed_out()
    }
}

impl TestApp {
    /// Log in through the API and return the bearer token.
    pub async fn admin_token(&self) -> String {
        login(&self.router).await
    }
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

async fn send(app: &Router, request: Request<Body>) -> Response<Body> {
    app.clone().oneshot(request).await.unwrap()
}

fn json_request(method: Method, uri: &str, body: &Value, token: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json");
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    builder.body(Body::from(body.to_string())).unwrap()
}

fn empty_request(method: Method, uri: &str, token: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    builder.body(Body::empty()).unwrap()
}

pub async fn get(app: &Router, uri: &str) -> Response<Body> {
    send(app, empty_request(Method::GET, uri, None)).await
}

pub async fn get_auth(app: &Router, uri: &str, token: &str) -> Response<Body> {
    send(app, empty_request(Method::GET, uri, Some(token))).await
}

pub async fn post_json(app: &Router, uri: &str, body: Value) -> Response<Body> {
    send(app, json_request(Method::POST, uri, &body, None)).await
}

pub async fn post_json_auth(app: &Router, uri: &str, body: Value, token: &str) -> Response<Body> {
    send(app, json_request(Method::POST, uri, &body, Some(token))).await
}

pub async fn put_json_auth(app: &Router, uri: &str, body: Value, token: &str) -> Response<Body> {
    send(app, json_request(Method::PUT, uri, &body, Some(token))).await
}

pub async fn delete_auth(app: &Router, uri: &str, token: &str) -> Response<Body> {
    send(app, empty_request(Method::DELETE, uri, Some(token))).await
}

/// POST a single-file multipart upload under field `field`.
pub async fn post_multipart_auth(
    app: &Router,
    uri: &str,
    field: &str,
    content: &[u8],
    token: &str,
) -> Response<Body> {
    let mut body = Vec::new();
    body.extend_from_slice(format!("--{MULTIPART_BOUNDARY}\r\n").as_bytes());
    body.extend_from_slice(
        format!(
            "Content-Disposition: form-data; name=\"{field}\"; filename=\"data.csv\"\r\n\
             Content-Type: text/csv\r\n\r\n"
        )
        .as_bytes(),
    );
    body.extend_from_slice(content);
    body.extend_from_slice(format!("\r\n--{MULTIPART_BOUNDARY}--\r\n").as_bytes());

    let request = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={MULTIPART_BOUNDARY}"),
        )
        .header(header::AUTHORIZATION, format!("Bearer {token}"))
        .body(Body::from(body))
        .unwrap();
    send(app, request).await
}

/// Collect a response body and parse it as JSON.
pub async fn body_json(response: Response<Body>) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

// ---------------------------------------------------------------------------
// Fixtures
// ---------------------------------------------------------------------------

/// A complete create-application body for `nim` / `email`.
pub fn application_body(nim: &str, email: &str) -> Value {
    serde_json::json!({
        "nim": nim,
        "email": email,
        "nama_lengkap": "Dewi Lestari",
        "nomor_telepon": "081234567890",
        "alamat": "Jl. Merdeka 10, Bandung",
        "ipk": 3.62,
        "penghasilan_keluarga": 4500000,
        "essay": "Saya ingin melanjutkan studi.",
    })
}

/// Create an application through the API and return its JSON record.
pub async fn create_application(app: &TestApp, token: &str, nim: &str, email: &str) -> Value {
    let response = post_json_auth(
        &app.router,
        "/api/admin/applications",
        application_body(nim, email),
        token,
    )
    .await;
    assert_eq!(response.status(), 201);
    body_json(response).await["data"].clone()
}
