#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::Router;
use axum::body::Body;
use axum::http::{Method, Request, StatusCode, header};
use http_body_util::BodyExt;
use serde_json::Value;
use tower::ServiceExt;
use uuid::Uuid;

use classhub::classhub_auth::create_token;
use classhub::classhub_config::{CorsConfig, JwtConfig, PaymentConfig};
use classhub::classhub_db::MemoryStore;
use classhub::classhub_models::{Class, ClassStatus, User, UserRole};
use classhub::classhub_payments::{PaymentError, PaymentGateway, PaymentIntent};
use classhub::router::init_router;
use classhub::state::AppState;

/// Payment gateway double that records requested amounts.
#[derive(Default)]
pub struct FakeGateway {
    pub amounts: Mutex<Vec<i64>>,
    pub fail: bool,
}

#[async_trait]
impl PaymentGateway for FakeGateway {
    async fn create_payment_intent(
        &self,
        amount_minor: i64,
        _currency: &str,
    ) -> Result<PaymentIntent, PaymentError> {
        if self.fail {
            return Err(PaymentError::Rejected {
                status: 402,
                message: "Your card was declined.".to_string(),
            });
        }
        self.amounts.lock().unwrap().push(amount_minor);
        Ok(PaymentIntent {
            id: "pi_test_123".to_string(),
            client_secret: "pi_test_123_secret_456".to_string(),
        })
    }
}

pub struct TestApp {
    pub router: Router,
    pub store: MemoryStore,
    pub gateway: Arc<FakeGateway>,
    pub jwt_config: JwtConfig,
}

pub fn test_jwt_config() -> JwtConfig {
    JwtConfig {
        secret: "test-secret-key-at-least-32-characters-long".to_string(),
        token_expiry: 86_400,
    }
}

pub fn setup_test_app() -> TestApp {
    setup_test_app_with_gateway(FakeGateway::default())
}

pub fn setup_test_app_with_gateway(gateway: FakeGateway) -> TestApp {
    let store = MemoryStore::new();
    let gateway = Arc::new(gateway);
    let jwt_config = test_jwt_config();

    let state = AppState::new(
        Arc::new(store.clone()),
        gateway.clone(),
        jwt_config.clone(),
        CorsConfig {
            allowed_origins: vec!["http://localhost:5173".to_string()],
        },
        PaymentConfig {
            secret_key: "sk_test".to_string(),
            api_base: "http://127.0.0.1:9".to_string(),
            currency: "usd".to_string(),
        },
    );

    TestApp {
        router: init_router(state),
        store,
        gateway,
        jwt_config,
    }
}

impl TestApp {
    pub fn token(&self, email: &str) -> String {
        create_token(email, &self.jwt_config).unwrap()
    }

    /// Sends a request and returns the status with the body parsed as
    /// JSON (or as a JSON string when it is plain text).
    pub async fn send(
        &self,
        method: Method,
        uri: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
        }
        let request = match body {
            Some(body) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let body = serde_json::from_slice(&bytes)
            .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).into_owned()));
        (status, body)
    }

    pub async fn get(&self, uri: &str, token: Option<&str>) -> (StatusCode, Value) {
        self.send(Method::GET, uri, token, None).await
    }

    pub async fn post(&self, uri: &str, token: Option<&str>, body: Value) -> (StatusCode, Value) {
        self.send(Method::POST, uri, token, Some(body)).await
    }

    pub async fn patch(&self, uri: &str, token: Option<&str>, body: Value) -> (StatusCode, Value) {
        self.send(Method::PATCH, uri, token, Some(body)).await
    }

    pub async fn delete(&self, uri: &str, token: Option<&str>) -> (StatusCode, Value) {
        self.send(Method::DELETE, uri, token, None).await
    }

    pub async fn seed_user(&self, email: &str, role: Option<UserRole>) -> User {
        let user = User {
            id: Uuid::new_v4(),
            email: email.to_string(),
            name: Some("Test User".to_string()),
            photo_url: None,
            role,
            profile: serde_json::json!({}),
            created_at: chrono::Utc::now(),
        };
        self.store.seed_user(user.clone()).await;
        user
    }

    pub async fn seed_class(
        &self,
        instructor_email: &str,
        status: ClassStatus,
        seats: i32,
        enrolled: i32,
    ) -> Class {
        let class = Class {
            id: Uuid::new_v4(),
            name: "Watercolor Basics".to_string(),
            image: Some("https://img.example.com/watercolor.png".to_string()),
            info: Some("Brushes, washes and layering".to_string()),
            price: 19.99,
            seats,
            enrolled,
            difficulty: Some("beginner".to_string()),
            instructor_name: Some("Ada".to_string()),
            instructor_email: instructor_email.to_string(),
            status,
            feedback: String::new(),
            created_at: chrono::Utc::now(),
        };
        self.store.seed_class(class.clone()).await;
        class
    }
}

pub fn generate_unique_email() -> String {
    format!("test-{}@test.com", Uuid::new_v4())
}
