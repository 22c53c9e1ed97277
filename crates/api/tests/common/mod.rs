//! Shared test harness: router construction mirroring `main.rs`, request
//! helpers, and database seeding.

#![allow(dead_code)]

use std::sync::Arc;
use std::time::Duration;

use axum::body::Body;
use axum::http::header::{AUTHORIZATION, CONTENT_TYPE};
use axum::http::{HeaderName, Method, Request, Response, StatusCode};
use axum::Router;
use sqlx::PgPool;
use tower::ServiceExt;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::CorsLayer;
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;

use coursehub_api::auth::jwt::{generate_access_token, JwtConfig};
use coursehub_api::config::{PaymentConfig, ServerConfig};
use coursehub_api::gateway::PaymentGateway;
use coursehub_api::routes;
use coursehub_api::state::AppState;
use coursehub_core::roles::{ROLE_INSTRUCTOR, ROLE_STUDENT};
use coursehub_core::types::DbId;
use coursehub_db::models::course::CreateCourse;
use coursehub_db::models::user::{CreateUser, User};
use coursehub_db::repositories::{CourseRepo, UserRepo};

/// JWT secret shared between the test config and token minting.
pub const TEST_JWT_SECRET: &str = "test-secret-that-is-long-enough-for-hmac";

/// Gateway key secret used to sign payment confirmations in tests.
pub const TEST_PAYMENT_SECRET: &str = "test-gateway-key-secret";

/// Build a test `ServerConfig` with safe defaults.
///
/// The gateway base URL points at a discard port; tests that exercise order
/// creation swap in a local stub via [`build_test_app_with_gateway`].
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        shutdown_timeout_secs: 30,
        jwt: JwtConfig {
            secret: TEST_JWT_SECRET.to_string(),
            access_token_expiry_mins: 60,
        },
        payment: PaymentConfig {
            key_id: "test_key_id".to_string(),
            key_secret: TEST_PAYMENT_SECRET.to_string(),
            currency: "INR".to_string(),
            api_base: "http://127.0.0.1:9".to_string(),
        },
    }
}

/// Build the full application router with all middleware layers, using the
/// given database pool.
pub fn build_test_app(pool: PgPool) -> Router {
    build_app_with_config(pool, test_config())
}

/// Like [`build_test_app`] but pointing the payment gateway client at a
/// caller-provided base URL (a local stub server).
pub fn build_test_app_with_gateway(pool: PgPool, gateway_base: &str) -> Router {
    let mut config = test_config();
    config.payment.api_base = gateway_base.to_string();
    build_app_with_config(pool, config)
}

/// Mirror of the router construction in `main.rs` so integration tests
/// exercise the same middleware stack (CORS, request ID, timeout, tracing,
/// panic recovery) that production uses.
fn build_app_with_config(pool: PgPool, config: ServerConfig) -> Router {
    let gateway = Arc::new(PaymentGateway::new(config.payment.clone()));

    let state = AppState {
        pool,
        config: Arc::new(config),
        gateway,
    };

    let cors = CorsLayer::new()
        .allow_origin(["http://localhost:5173".parse().unwrap()])
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([CONTENT_TYPE, AUTHORIZATION])
        .allow_credentials(true)
        .max_age(Duration::from_secs(3600));

    let request_id_header = HeaderName::from_static("x-request-id");

    Router::new()
        .merge(routes::health::router())
        .nest("/api/v1", routes::api_routes())
        .layer(CatchPanicLayer::new())
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            Duration::from_secs(30),
        ))
        .layer(PropagateRequestIdLayer::new(request_id_header.clone()))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .layer(SetRequestIdLayer::new(request_id_header, MakeRequestUuid))
        .layer(cors)
        .with_state(state)
}

// ---------------------------------------------------------------------------
// Auth helpers
// ---------------------------------------------------------------------------

/// Mint an access token for the given user with the test JWT secret.
pub fn auth_token(user_id: DbId, role: &str) -> String {
    generate_access_token(user_id, role, &test_config().jwt)
        .expect("token generation should succeed")
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

/// Send a GET request without authentication.
pub async fn get(app: Router, uri: &str) -> Response<Body> {
    let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
    app.oneshot(request).await.unwrap()
}

/// Send a GET request with a Bearer token.
pub async fn get_auth(app: Router, uri: &str, token: &str) -> Response<Body> {
    let request = Request::builder()
        .uri(uri)
        .header(AUTHORIZATION, format!("Bearer {token}"))
        .body(Body::empty())
        .unwrap();
    app.oneshot(request).await.unwrap()
}

/// Send an authenticated POST with an empty body.
pub async fn post_auth(app: Router, uri: &str, token: &str) -> Response<Body> {
    let request = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(AUTHORIZATION, format!("Bearer {token}"))
        .body(Body::empty())
        .unwrap();
    app.oneshot(request).await.unwrap()
}

/// Send an unauthenticated POST with an empty body.
pub async fn post(app: Router, uri: &str) -> Response<Body> {
    let request = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    app.oneshot(request).await.unwrap()
}

/// Send an authenticated POST with a JSON body.
pub async fn post_json_auth(
    app: Router,
    uri: &str,
    body: serde_json::Value,
    token: &str,
) -> Response<Body> {
    let request = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(CONTENT_TYPE, "application/json")
        .header(AUTHORIZATION, format!("Bearer {token}"))
        .body(Body::from(body.to_string()))
        .unwrap();
    app.oneshot(request).await.unwrap()
}

/// Collect a response body and parse it as JSON.
pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    use http_body_util::BodyExt;
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("body collection should succeed")
        .to_bytes();
    serde_json::from_slice(&bytes).expect("body should be valid JSON")
}

// ---------------------------------------------------------------------------
// Seeding helpers
// ---------------------------------------------------------------------------

/// Create a student row and return it.
pub async fn seed_student(pool: &PgPool, name: &str) -> User {
    UserRepo::create(
        pool,
        &CreateUser {
            name: name.to_string(),
            email: format!("{name}@test.com"),
            role: Some(ROLE_STUDENT.to_string()),
        },
    )
    .await
    .expect("student creation should succeed")
}

/// Create an instructor row and return it.
pub async fn seed_instructor(pool: &PgPool, name: &str) -> User {
    UserRepo::create(
        pool,
        &CreateUser {
            name: name.to_string(),
            email: format!("{name}@test.com"),
            role: Some(ROLE_INSTRUCTOR.to_string()),
        },
    )
    .await
    .expect("instructor creation should succeed")
}

/// Create a course with the given price and status, owned by a fresh
/// instructor. Returns the course id.
pub async fn seed_course(pool: &PgPool, title: &str, price: f64, status: &str) -> DbId {
    let instructor = seed_instructor(pool, &format!("instructor_{title}")).await;
    let course = CourseRepo::create(
        pool,
        &CreateCourse {
            instructor_id: instructor.id,
            title: title.to_string(),
            description: None,
            price: Some(price),
            status: Some(status.to_string()),
        },
    )
    .await
    .expect("course creation should succeed");
    course.id
}

/// Add a single section with `n` lectures to a course. Returns the lecture
/// ids in position order.
pub async fn seed_lectures(pool: &PgPool, course_id: DbId, n: i32) -> Vec<DbId> {
    let section = CourseRepo::add_section(pool, course_id, "Section 1", 0)
        .await
        .expect("section creation should succeed");

    let mut ids = Vec::new();
    for i in 0..n {
        let lecture =
            CourseRepo::add_lecture(pool, section.id, &format!("Lecture {}", i + 1), 300, i)
                .await
                .expect("lecture creation should succeed");
        ids.push(lecture.id);
    }
    ids
}

/// Read a course's `total_enrollments` counter.
pub async fn enrollment_counter(pool: &PgPool, course_id: DbId) -> i64 {
    CourseRepo::find_by_id(pool, course_id)
        .await
        .expect("course lookup should succeed")
        .expect("course should exist")
        .total_enrollments
}
