//! Shared fixtures for integration tests.
#![allow(dead_code)]

use std::io;
use std::sync::{Arc, Mutex};

use axum::body::Body;
use axum::extract::Path;
use axum::http::{Request, StatusCode};
use axum::response::Response;
use axum::routing::{self, post, put};
use axum::{Json, Router};
use http_body_util::BodyExt;
use serde::Deserialize;
use serde_json::{json, Value};

use api_pipeline::config::{AppConfig, Environment};
use api_pipeline::error::UnhandledError;
use api_pipeline::{ApiError, Failure, Valid, ValidQuery, Validate, ValidationFailure};

#[derive(Debug, Deserialize)]
pub struct CreateUser {
    pub username: String,
    pub password: String,
}

impl Validate for CreateUser {
    fn validate(&self) -> Result<(), ValidationFailure> {
        let mut failure = ValidationFailure::new();
        if self.username.len() < 3 {
            failure.add("username", "\"username\" length must be at least 3 characters long");
        }
        if !self.username.chars().all(char::is_alphanumeric) {
            failure.add("username", "\"username\" must only contain alpha-numeric characters");
        }
        if self.password.len() < 8 {
            failure.add("password", "\"password\" length must be at least 8 characters long");
        }
        failure.into_result()
    }
}

#[derive(Debug, Deserialize)]
pub struct ListUsers {
    pub limit: u32,
}

impl Validate for ListUsers {
    fn validate(&self) -> Result<(), ValidationFailure> {
        let mut failure = ValidationFailure::new();
        if self.limit == 0 || self.limit > 100 {
            failure.add("limit", "\"limit\" must be between 1 and 100");
        }
        failure.into_result()
    }
}

async fn create_user(Valid(user): Valid<CreateUser>) -> (StatusCode, Json<Value>) {
    (StatusCode::CREATED, Json(json!({ "username": user.username })))
}

async fn list_users(ValidQuery(query): ValidQuery<ListUsers>) -> Json<Value> {
    Json(json!({ "limit": query.limit, "users": [] }))
}

async fn update_user(Path(id): Path<u32>) -> String {
    format!("updated {id}")
}

async fn plain_failure() -> Result<String, Failure> {
    let io = std::io::Error::new(std::io::ErrorKind::ConnectionReset, "upstream reset the connection");
    Err(Failure::unhandled(io))
}

async fn forbidden() -> Result<String, Failure> {
    Err(ApiError::public("Access denied", StatusCode::FORBIDDEN).into())
}

async fn private_error() -> Result<String, ApiError> {
    Err(ApiError::internal("password authentication failed for user \"app\"").with_stack("at db::connect"))
}

async fn teapot() -> Result<String, Failure> {
    Err(UnhandledError::new("short and stout")
        .with_status(StatusCode::IM_A_TEAPOT)
        .into())
}

/// Routes mounted under the API prefix in tests.
pub fn test_routes() -> Router {
    Router::new()
        .route("/users", post(create_user).get(list_users))
        .route("/users/{id}", put(update_user))
        .route("/boom", routing::get(plain_failure))
        .route("/forbidden", routing::get(forbidden))
        .route("/private", routing::get(private_error))
        .route("/teapot", routing::get(teapot))
        .merge(api_pipeline::routes::api_router())
}

pub fn config(environment: Environment) -> AppConfig {
    let mut config = AppConfig::default();
    config.environment = environment;
    config.listener.host = "127.0.0.1".into();
    config.listener.port = 0;
    config
}

pub fn app(environment: Environment) -> Router {
    app_with_config(&config(environment))
}

pub fn app_with_config(config: &AppConfig) -> Router {
    api_pipeline::PipelineBuilder::new(config)
        .routes(test_routes())
        .build()
}

pub fn get(uri: &str) -> Request<Body> {
    Request::get(uri).body(Body::empty()).unwrap()
}

pub fn post_json(uri: &str, body: Value) -> Request<Body> {
    Request::post(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

pub async fn body_json(response: Response) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

pub async fn body_string(response: Response) -> String {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    String::from_utf8(bytes.to_vec()).unwrap()
}

/// In-memory log sink for asserting on emitted events.
#[derive(Clone, Default)]
pub struct LogCapture(Arc<Mutex<Vec<u8>>>);

impl LogCapture {
    /// Install as the thread's default subscriber until the guard drops.
    pub fn install(&self) -> tracing::subscriber::DefaultGuard {
        let writer = self.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_writer(move || writer.clone())
            .with_max_level(tracing::Level::INFO)
            .with_ansi(false)
            .finish();
        tracing::subscriber::set_default(subscriber)
    }

    pub fn contents(&self) -> String {
        String::from_utf8(self.0.lock().unwrap().clone()).unwrap()
    }

    /// Lines emitted under the `audit` target.
    pub fn audit_lines(&self) -> Vec<String> {
        self.contents()
            .lines()
            .filter(|line| line.contains(" audit: "))
            .map(str::to_string)
            .collect()
    }
}

impl io::Write for LogCapture {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}
