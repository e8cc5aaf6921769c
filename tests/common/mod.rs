// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

use async_trait::async_trait;
use axum::{
    body::Body,
    http::{Method, Request, StatusCode},
};
use badminton_coach::config::Config;
use badminton_coach::db::Database;
use badminton_coach::models::{Role, User};
use badminton_coach::routes::create_router;
use badminton_coach::services::{
    CoachService, DailyMotivation, GenerationError, GenerationRequest, TextGenerator,
};
use badminton_coach::AppState;
use serde_json::Value;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use tower::ServiceExt;

/// Check if emulator is available via environment variable.
#[allow(dead_code)]
pub fn emulator_available() -> bool {
    std::env::var("FIRESTORE_EMULATOR_HOST").is_ok()
}

/// Skip test with message if emulator not available.
#[macro_export]
macro_rules! require_emulator {
    () => {
        if !crate::common::emulator_available() {
            eprintln!("⚠️  Skipping: FIRESTORE_EMULATOR_HOST not set");
            return;
        }
    };
}

/// Test double for the language model: replies with a fixed text, or fails
/// every call when switched off. Counts calls either way.
#[derive(Default)]
pub struct ScriptedGenerator {
    reply: Mutex<String>,
    failing: AtomicBool,
    calls: AtomicUsize,
}

#[allow(dead_code)]
impl ScriptedGenerator {
    pub fn replying(reply: &str) -> Arc<Self> {
        let generator = Self::default();
        generator.set_reply(reply);
        Arc::new(generator)
    }

    pub fn failing() -> Arc<Self> {
        let generator = Self::default();
        generator.failing.store(true, Ordering::SeqCst);
        Arc::new(generator)
    }

    pub fn set_reply(&self, reply: &str) {
        *self.reply.lock().unwrap() = reply.to_string();
        self.failing.store(false, Ordering::SeqCst);
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl TextGenerator for ScriptedGenerator {
    async fn generate(&self, _request: &GenerationRequest) -> Result<String, GenerationError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.failing.load(Ordering::SeqCst) {
            return Err(GenerationError::Transport("scripted failure".to_string()));
        }
        Ok(self.reply.lock().unwrap().clone())
    }
}

/// Router plus handles on its state and generator.
#[allow(dead_code)]
pub struct TestApp {
    pub router: axum::Router,
    pub state: Arc<AppState>,
    pub generator: Arc<ScriptedGenerator>,
}

/// Create a test app over a fresh in-memory store.
#[allow(dead_code)]
pub fn create_test_app(generator: Arc<ScriptedGenerator>) -> TestApp {
    let state = Arc::new(AppState {
        config: Config::test_default(),
        db: Database::in_memory(),
        coach: CoachService::new(generator.clone()),
        motivation: DailyMotivation::new(),
    });

    TestApp {
        router: create_router(state.clone()),
        state,
        generator,
    }
}

#[allow(dead_code)]
impl TestApp {
    /// Send a request and return the status and the JSON body (`Null` when empty).
    pub async fn send(
        &self,
        method: Method,
        uri: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header("x-auth-token", token);
        }
        let body = match body {
            Some(json) => {
                builder = builder.header("content-type", "application/json");
                Body::from(json.to_string())
            }
            None => Body::empty(),
        };

        let response = self
            .router
            .clone()
            .oneshot(builder.body(body).unwrap())
            .await
            .unwrap();

        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let json = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or(Value::Null)
        };
        (status, json)
    }

    pub async fn get(&self, uri: &str, token: &str) -> (StatusCode, Value) {
        self.send(Method::GET, uri, Some(token), None).await
    }

    pub async fn post(&self, uri: &str, token: &str, body: Value) -> (StatusCode, Value) {
        self.send(Method::POST, uri, Some(token), Some(body)).await
    }

    pub async fn put(&self, uri: &str, token: &str, body: Value) -> (StatusCode, Value) {
        self.send(Method::PUT, uri, Some(token), Some(body)).await
    }

    pub async fn delete(&self, uri: &str, token: &str) -> (StatusCode, Value) {
        self.send(Method::DELETE, uri, Some(token), None).await
    }

    /// Register an account and return `(token, user_id)`.
    pub async fn register(&self, name: &str, email: &str) -> (String, String) {
        let (status, body) = self
            .send(
                Method::POST,
                "/api/auth/register",
                None,
                Some(serde_json::json!({
                    "name": name,
                    "email": email,
                    "password": "secret123"
                })),
            )
            .await;
        assert_eq!(status, StatusCode::OK, "register failed: {}", body);

        (
            body["token"].as_str().unwrap().to_string(),
            body["user"]["id"].as_str().unwrap().to_string(),
        )
    }

    /// Register an account and grant it the admin role directly in the store.
    pub async fn register_admin(&self, email: &str) -> (String, String) {
        let (token, user_id) = self.register("Admin", email).await;
        let mut user: User = self.state.db.get(&user_id).await.unwrap().unwrap();
        user.role = Role::Admin;
        self.state.db.save(&user).await.unwrap();
        (token, user_id)
    }
}
