#![allow(dead_code)]

use axum::body::{to_bytes, Body};
use axum::http::{header, HeaderMap, Method, Request, StatusCode};
use axum::Router;
use serde_json::Value;
use std::sync::Arc;
use tourdesk_backend::auth::{hash_password, Role};
use tourdesk_backend::config::{AppConfig, AuthConfig, StorageBackend};
use tourdesk_backend::database::MemoryDocumentStore;
use tourdesk_backend::models::{AdminUser, Record};
use tourdesk_backend::{api, AppState, SharedState};
use tower::ServiceExt;
use uuid::Uuid;

/// Password given to every seeded admin
pub const PASSWORD: &str = "correct-horse-battery";

/// Router over an in-memory store, with its audit trail in a temp dir
pub struct TestApp {
    pub state: SharedState,
    pub router: Router,
    _audit_dir: tempfile::TempDir,
}

/// Decoded response
pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Value,
}

impl TestResponse {
    pub fn data(&self) -> &Value {
        &self.body["data"]
    }

    pub fn error(&self) -> &str {
        self.body["error"].as_str().unwrap_or_default()
    }
}

/// A seeded admin account
pub struct TestAdmin {
    pub record: Record<AdminUser>,
    pub token: String,
}

impl TestApp {
    pub fn new() -> Self {
        let audit_dir = tempfile::tempdir().expect("Failed to create audit dir");

        let config = AppConfig {
            storage: StorageBackend::Memory,
            audit_log_dir: audit_dir.path().to_path_buf(),
            auth: AuthConfig {
                jwt_secret: "integration-test-secret".to_string(),
                bcrypt_cost: 4,
                ..AuthConfig::default()
            },
            ..AppConfig::default()
        };

        let state = Arc::new(
            AppState::new(config, Arc::new(MemoryDocumentStore::new()))
                .expect("Failed to build app state"),
        );
        let router = api::router(state.clone());

        Self {
            state,
            router,
            _audit_dir: audit_dir,
        }
    }

    /// Insert an admin with `role` and sign a token for it
    pub async fn admin(&self, role: Role) -> TestAdmin {
        let email = format!("{}-{}@tourdesk.test", role.as_str(), Uuid::new_v4().simple());
        let record = self
            .state
            .repository::<AdminUser>()
            .create(AdminUser {
                email: email.clone(),
                name: format!("Test {}", role.as_str()),
                password_hash: hash_password(PASSWORD, 4).expect("Failed to hash password"),
                role,
                active: true,
                last_login_at: None,
            })
            .await
            .expect("Failed to create admin");

        let token = self
            .state
            .tokens
            .issue(record.id, &email, role)
            .expect("Failed to issue token");

        TestAdmin { record, token }
    }

    pub async fn token(&self, role: Role) -> String {
        self.admin(role).await.token
    }

    pub async fn send(&self, request: Request<Body>) -> TestResponse {
        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("Router failed");

        let status = response.status();
        let headers = response.headers().clone();
        let bytes = to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("Failed to read body");
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or_else(|_| {
                Value::String(String::from_utf8_lossy(&bytes).into_owned())
            })
        };

        TestResponse {
            status,
            headers,
            body,
        }
    }

    pub async fn request(
        &self,
        method: Method,
        uri: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> TestResponse {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
        }

        let request = match body {
            Some(body) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string())),
            None => builder.body(Body::empty()),
        }
        .expect("Failed to build request");

        self.send(request).await
    }

    pub async fn get(&self, uri: &str, token: Option<&str>) -> TestResponse {
        self.request(Method::GET, uri, token, None).await
    }

    pub async fn post(&self, uri: &str, token: Option<&str>, body: Value) -> TestResponse {
        self.request(Method::POST, uri, token, Some(body)).await
    }

    pub async fn patch(&self, uri: &str, token: Option<&str>, body: Value) -> TestResponse {
        self.request(Method::PATCH, uri, token, Some(body)).await
    }

    pub async fn delete(&self, uri: &str, token: Option<&str>) -> TestResponse {
        self.request(Method::DELETE, uri, token, None).await
    }
}

/// Minimal valid bodies
pub mod fixtures {
    use serde_json::{json, Value};

    pub fn hotel(name: &str) -> Value {
        json!({
            "name": name,
            "destination": "Santorini",
            "star_rating": 4,
            "pricing": {"price": "180.00", "discount_percent": "10"},
            "approval": {"status": "approved"}
        })
    }

    pub fn trip(title: &str) -> Value {
        json!({
            "title": title,
            "destination": "Crete",
            "duration_days": 5,
            "category": "island-hopping",
            "pricing": {"price": "1299.99", "discount_percent": "15"},
            "itinerary": [
                {"day": 1, "title": "Arrival in Heraklion"},
                {"day": 5, "title": "Departure"}
            ]
        })
    }

    pub fn lead() -> Value {
        json!({
            "name": "Ana Costa",
            "email": "Ana@Example.com",
            "message": "Looking for a family trip in June",
            "source": "contact_form",
            "status": "converted"
        })
    }
}
