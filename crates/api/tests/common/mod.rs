#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Method, Request, Response};
use axum::Router;
use http_body_util::BodyExt;
use qualifier_core::hooks::UserRef;
use qualifier_core::messages::{Locale, MessageCatalog};
use qualifier_core::types::FieldValues;
use qualifier_core::validation::phone::E164PhoneValidator;
use tower::ServiceExt;

use qualifier_api::config::ServerConfig;
use qualifier_api::profile::{ProfileWriteError, ProfileWriter};
use qualifier_api::router::build_app_router;
use qualifier_api::state::AppState;

/// Build a test `ServerConfig` with safe defaults.
///
/// Uses `http://localhost:5173` as CORS origin (matching the dev default)
/// and a 30-second request timeout.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        shutdown_timeout_secs: 30,
        locale: Locale::En,
        profile_webhook_url: None,
        profile_webhook_timeout_secs: 10,
    }
}

/// Profile writer that records every update it receives.
#[derive(Default)]
pub struct RecordingProfileWriter {
    pub updates: Mutex<Vec<(UserRef, FieldValues)>>,
    pub fail_with: Option<u16>,
}

impl RecordingProfileWriter {
    pub fn failing(status: u16) -> Self {
        Self {
            updates: Mutex::new(Vec::new()),
            fail_with: Some(status),
        }
    }

    pub fn updates(&self) -> Vec<(UserRef, FieldValues)> {
        self.updates.lock().unwrap().clone()
    }
}

#[async_trait]
impl ProfileWriter for RecordingProfileWriter {
    async fn update_properties(
        &self,
        user: &UserRef,
        properties: &FieldValues,
    ) -> Result<(), ProfileWriteError> {
        self.updates
            .lock()
            .unwrap()
            .push((user.clone(), properties.clone()));
        match self.fail_with {
            Some(status) => Err(ProfileWriteError::HttpStatus(status)),
            None => Ok(()),
        }
    }
}

/// Build the full application router with the given locale and profile writer.
pub fn build_app_with(locale: Locale, writer: Arc<RecordingProfileWriter>) -> Router {
    let config = ServerConfig {
        locale,
        ..test_config()
    };
    let state = AppState {
        translator: Arc::new(MessageCatalog::new(locale)),
        phone_validator: Arc::new(E164PhoneValidator),
        profile_writer: writer,
        config: Arc::new(config),
    };
    build_app_router(state)
}

/// Build the full application router with all middleware layers.
///
/// Uses the same builder as `main.rs` so integration tests exercise the same
/// middleware stack (CORS, request ID, timeout, tracing, panic recovery) that
/// production uses.
pub fn build_test_app() -> Router {
    build_app_with(Locale::En, Arc::new(RecordingProfileWriter::default()))
}

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    let request = Request::builder()
        .method(Method::GET)
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    app.oneshot(request).await.unwrap()
}

pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    let request = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(serde_json::to_vec(&body).unwrap()))
        .unwrap();
    app.oneshot(request).await.unwrap()
}

pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}
