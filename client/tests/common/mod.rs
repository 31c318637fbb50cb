#![allow(dead_code)]

use axum::extract::{Path, State};
use axum::http::{HeaderMap, StatusCode, header};
use axum::routing::{get, post};
use axum::{Json, Router};
use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;
use swms_client::dtos::{AuthResponseDTO, LoginDTO, RegisterDTO, UserInfoDTO};
use swms_client::{ApiError, AuthApi, StorageError, TokenStore};

pub const JWT_SECRET: &str = "ilmiobellissimosegretochevaassolutamentecambiato";
pub const ANN_EMAIL: &str = "ann@x.com";
pub const ANN_PASSWORD: &str = "Secret123";

// ============================================================
// Tokens
// ============================================================

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TestClaims {
    pub user_id: String,
    pub name: String,
    pub sub: String,
    pub user_type: String,
    pub phone: Option<String>,
    pub iat: usize,
    pub exp: usize,
}

impl TestClaims {
    pub fn new(user_id: &str, name: &str, email: &str, user_type: &str) -> Self {
        let now = chrono::Utc::now().timestamp() as usize;
        Self {
            user_id: user_id.to_string(),
            name: name.to_string(),
            sub: email.to_string(),
            user_type: user_type.to_string(),
            phone: None,
            iat: now,
            exp: now + 24 * 60 * 60,
        }
    }
}

/// Signs `claims` the way the backend does, valid for 24 hours
pub fn create_test_jwt(claims: &TestClaims, secret: &str) -> String {
    use jsonwebtoken::{EncodingKey, Header, encode};

    encode(
        &Header::default(),
        claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .expect("Failed to create JWT token")
}

pub fn ann_token() -> String {
    create_test_jwt(&TestClaims::new("u1", "Ann", ANN_EMAIL, "DRIVER"), JWT_SECRET)
}

/// Dummy three-segment token carrying `payload` as its second segment
pub fn unsigned_token(payload: &Value) -> String {
    let header = URL_SAFE_NO_PAD.encode(br#"{"alg":"none"}"#);
    let body = URL_SAFE_NO_PAD.encode(payload.to_string());
    format!("{header}.{body}.dummy")
}

// ============================================================
// Mock backend served by axum on an ephemeral port
// ============================================================

#[derive(Default)]
pub struct BackendState {
    pub login_calls: AtomicUsize,
    pub validate_calls: AtomicUsize,
    pub logout_calls: AtomicUsize,
    pub register_calls: AtomicUsize,
    /// When set, `/auth/validate` answers 500
    pub validation_down: AtomicBool,
    pub last_register_role: Mutex<Option<String>>,
}

pub struct MockBackend {
    pub base_url: String,
    pub state: Arc<BackendState>,
}

impl MockBackend {
    pub fn validate_calls(&self) -> usize {
        self.state.validate_calls.load(Ordering::SeqCst)
    }

    pub fn login_calls(&self) -> usize {
        self.state.login_calls.load(Ordering::SeqCst)
    }
}

pub async fn spawn_backend() -> MockBackend {
    let state = Arc::new(BackendState::default());
    let auth = Router::new()
        .route("/login", post(login))
        .route("/validate", get(validate))
        .route("/me", get(me))
        .route("/logout", post(logout))
        .route("/register/{role}", post(register));
    let app = Router::new()
        .nest("/api/auth", auth)
        .with_state(state.clone());

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind mock backend");
    let addr = listener.local_addr().expect("mock backend address");
    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("mock backend stopped");
    });

    MockBackend {
        base_url: format!("http://{addr}/api"),
        state,
    }
}

/// Address nothing listens on
pub async fn unreachable_base_url() -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind probe");
    let addr = listener.local_addr().expect("probe address");
    drop(listener);
    format!("http://{addr}/api")
}

fn bearer_claims(headers: &HeaderMap) -> Option<TestClaims> {
    use jsonwebtoken::{DecodingKey, Validation, decode};

    let token = headers
        .get(header::AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")?;
    decode::<TestClaims>(
        token,
        &DecodingKey::from_secret(JWT_SECRET.as_bytes()),
        &Validation::default(),
    )
    .ok()
    .map(|data| data.claims)
}

async fn login(
    State(state): State<Arc<BackendState>>,
    Json(body): Json<Value>,
) -> (StatusCode, Json<Value>) {
    state.login_calls.fetch_add(1, Ordering::SeqCst);
    if body["email"] == ANN_EMAIL && body["password"] == ANN_PASSWORD {
        let token = ann_token();
        return (
            StatusCode::OK,
            Json(json!({
                "success": true,
                "message": "Login successful",
                "data": {
                    "token": token,
                    "userId": "u1",
                    "name": "Ann",
                    "email": ANN_EMAIL,
                    "phone": "+94770000001",
                    "userType": "DRIVER",
                    "message": "Login successful"
                }
            })),
        );
    }
    (
        StatusCode::BAD_REQUEST,
        Json(json!({ "success": false, "message": "Invalid username or password" })),
    )
}

async fn validate(
    State(state): State<Arc<BackendState>>,
    headers: HeaderMap,
) -> (StatusCode, Json<Value>) {
    state.validate_calls.fetch_add(1, Ordering::SeqCst);
    if state.validation_down.load(Ordering::SeqCst) {
        return (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({ "success": false, "message": "Validation service unavailable" })),
        );
    }
    let valid = bearer_claims(&headers).is_some();
    (StatusCode::OK, Json(json!({ "success": true, "data": valid })))
}

async fn me(headers: HeaderMap) -> (StatusCode, Json<Value>) {
    match bearer_claims(&headers) {
        Some(claims) => (
            StatusCode::OK,
            Json(json!({
                "success": true,
                "data": {
                    "userId": claims.user_id,
                    "username": claims.sub,
                    "name": claims.name,
                    "email": claims.sub,
                    "phoneNumber": "+94770000001",
                    "address": "12 Galle Road, Colombo"
                }
            })),
        ),
        None => (
            StatusCode::UNAUTHORIZED,
            Json(json!({ "success": false, "message": "User not found" })),
        ),
    }
}

async fn logout(State(state): State<Arc<BackendState>>) -> Json<Value> {
    state.logout_calls.fetch_add(1, Ordering::SeqCst);
    Json(json!({ "success": true, "message": "Logout successful", "data": null }))
}

async fn register(
    State(state): State<Arc<BackendState>>,
    Path(role): Path<String>,
    Json(body): Json<Value>,
) -> (StatusCode, Json<Value>) {
    state.register_calls.fetch_add(1, Ordering::SeqCst);
    *state.last_register_role.lock().unwrap() = Some(role);

    if body["email"] == "taken@x.com" {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({ "success": false, "message": "Email is already registered" })),
        );
    }

    let email = body["email"].as_str().unwrap_or_default().to_string();
    let name = body["name"].as_str().unwrap_or_default().to_string();
    let user_type = body["userType"].as_str().unwrap_or_default().to_string();
    let token = create_test_jwt(&TestClaims::new("new-1", &name, &email, &user_type), JWT_SECRET);
    (
        StatusCode::OK,
        Json(json!({
            "success": true,
            "message": "User registered successfully",
            "data": {
                "token": token,
                "userId": "new-1",
                "name": name,
                "email": email,
                "phone": body["phone"],
                "userType": user_type,
                "message": "Citizen registered successfully"
            }
        })),
    )
}

// ============================================================
// In-process fakes
// ============================================================

/// What the fake backend answers to a validation request
#[derive(Debug, Clone, Copy)]
pub enum ValidationOutcome {
    Accept,
    Reject,
    Fail,
}

/// Scripted [`AuthApi`] that counts its calls
pub struct FakeApi {
    validation: ValidationOutcome,
    delay: Option<Duration>,
    pub validate_calls: AtomicUsize,
    pub login_calls: AtomicUsize,
    pub logout_calls: AtomicUsize,
}

impl FakeApi {
    pub fn new(validation: ValidationOutcome) -> Self {
        Self {
            validation,
            delay: None,
            validate_calls: AtomicUsize::new(0),
            login_calls: AtomicUsize::new(0),
            logout_calls: AtomicUsize::new(0),
        }
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub fn validate_calls(&self) -> usize {
        self.validate_calls.load(Ordering::SeqCst)
    }
}

impl AuthApi for FakeApi {
    async fn login(&self, credentials: &LoginDTO) -> Result<AuthResponseDTO, ApiError> {
        self.login_calls.fetch_add(1, Ordering::SeqCst);
        if credentials.password != ANN_PASSWORD {
            return Err(ApiError::rejected(400, "Invalid username or password"));
        }
        Ok(AuthResponseDTO {
            token: ann_token(),
            user_id: Some("u1".to_string()),
            name: Some("Ann".to_string()),
            email: Some(credentials.email.clone()),
            phone: None,
            user_type: Some(swms_client::UserType::Driver),
            message: Some("Login successful".to_string()),
        })
    }

    async fn validate_token(&self, _token: &str) -> Result<bool, ApiError> {
        self.validate_calls.fetch_add(1, Ordering::SeqCst);
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        match self.validation {
            ValidationOutcome::Accept => Ok(true),
            ValidationOutcome::Reject => Ok(false),
            ValidationOutcome::Fail => Err(ApiError::rejected(503, "Service Unavailable")),
        }
    }

    async fn register(&self, request: &RegisterDTO) -> Result<AuthResponseDTO, ApiError> {
        Err(ApiError::UnsupportedRole(request.user_type.to_string()))
    }

    async fn current_user(&self, _token: &str) -> Result<UserInfoDTO, ApiError> {
        Err(ApiError::MissingData)
    }

    async fn logout(&self, _token: &str) -> Result<(), ApiError> {
        self.logout_calls.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

/// Token storage that is never available
pub struct BrokenStore;

impl TokenStore for BrokenStore {
    fn get(&self, _slot: &str) -> Result<Option<String>, StorageError> {
        Err(std::io::Error::new(std::io::ErrorKind::PermissionDenied, "storage disabled").into())
    }

    fn put(&self, _slot: &str, _value: &str) -> Result<(), StorageError> {
        Err(std::io::Error::new(std::io::ErrorKind::PermissionDenied, "storage disabled").into())
    }

    fn remove(&self, _slot: &str) -> Result<(), StorageError> {
        Err(std::io::Error::new(std::io::ErrorKind::PermissionDenied, "storage disabled").into())
    }
}
