//! Authentication test helpers
//!
//! Provides utilities for building test servers, registering users and
//! attaching their session to requests.

use axum::http::{header, HeaderValue, StatusCode};
use axum_test::{TestRequest, TestServer};
use serde_json::json;
use uuid::Uuid;

use shuvomedia::backend::auth::cookies::SESSION_COOKIE;
use shuvomedia::backend::auth::handlers::AuthResponse;
use shuvomedia::backend::auth::PasswordHasher;
use shuvomedia::backend::routes::create_router;
use shuvomedia::backend::server::config::SigningSecret;
use shuvomedia::backend::server::AppState;
use shuvomedia::backend::store::Stores;

pub const TEST_SECRET: &str = "test-jwt-secret";
pub const TEST_PASSWORD: &str = "password123";

/// Test user credentials
pub struct TestUser {
    pub id: Uuid,
    pub full_name: String,
    pub email: String,
    pub password: String,
    pub token: String,
}

/// In-memory state with a cheap bcrypt cost and no integrations.
pub fn test_state() -> AppState {
    AppState::new(Stores::memory(), &SigningSecret::new(TEST_SECRET))
        .with_hasher(PasswordHasher::new(4))
}

pub fn test_server(state: AppState) -> TestServer {
    TestServer::new(create_router(state)).expect("Failed to create test server")
}

/// Register through the API and capture the session cookie.
pub async fn register_user(server: &TestServer, full_name: &str, email: &str) -> TestUser {
    let response = server
        .post("/api/user/register")
        .json(&json!({
            "fullName": full_name,
            "email": email,
            "password": TEST_PASSWORD,
        }))
        .await;
    response.assert_status(StatusCode::CREATED);

    let body: AuthResponse = response.json();
    let token = response.cookie(SESSION_COOKIE).value().to_string();

    TestUser {
        id: body.user.id,
        full_name: body.user.full_name,
        email: body.user.email,
        password: TEST_PASSWORD.to_string(),
        token,
    }
}

/// Register a user with a unique email
pub async fn register_unique_user(server: &TestServer, full_name: &str) -> TestUser {
    let email = format!("test_{}@example.com", Uuid::new_v4().simple());
    register_user(server, full_name, &email).await
}

/// `Cookie` header value carrying a session token.
pub fn session_cookie(token: &str) -> HeaderValue {
    HeaderValue::from_str(&format!("{}={}", SESSION_COOKIE, token)).expect("ASCII token")
}

/// Create authorization header value
pub fn auth_header(token: &str) -> HeaderValue {
    HeaderValue::from_str(&format!("Bearer {}", token)).expect("ASCII token")
}

/// Attach `user`'s session cookie to a request.
pub fn as_user(request: TestRequest, user: &TestUser) -> TestRequest {
    request.add_header(header::COOKIE, session_cookie(&user.token))
}
