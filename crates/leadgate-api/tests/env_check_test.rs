//! Environment presence report tests.
//!
//! These tests mutate process environment variables, so they serialize on a
//! shared lock and restore the original values on drop.

mod common;

use std::{collections::HashMap, env, sync::Mutex};

use axum::http::StatusCode;
use common::{body_json, get_request, test_router};
use tower::ServiceExt;

static ENV_LOCK: Mutex<()> = Mutex::new(());

struct EnvGuard {
    _lock: std::sync::MutexGuard<'static, ()>,
    originals: HashMap<String, Option<String>>,
}

impl EnvGuard {
    fn new() -> Self {
        let lock = ENV_LOCK.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        Self { _lock: lock, originals: HashMap::new() }
    }

    fn set(&mut self, key: &str, value: &str) {
        self.originals.entry(key.to_string()).or_insert_with(|| env::var(key).ok());
        env::set_var(key, value);
    }

    fn remove(&mut self, key: &str) {
        self.originals.entry(key.to_string()).or_insert_with(|| env::var(key).ok());
        env::remove_var(key);
    }
}

impl Drop for EnvGuard {
    fn drop(&mut self) {
        for (key, original) in &self.originals {
            match original {
                Some(value) => env::set_var(key, value),
                None => env::remove_var(key),
            }
        }
    }
}

/// Present keys report their length but never their value; the
/// server-address key additionally carries a truncated sample.
#[tokio::test]
async fn env_check_reports_presence_and_length_only() {
    let mut guard = EnvGuard::new();
    guard.set("DB_HOST", "db.internal.example.com");
    guard.set("DB_USER", "ingest");
    guard.set("DB_PASSWORD", "hunter2hunter2");
    guard.set("API_SECRET_KEY", "super-secret");

    let app = test_router("");
    let response = app.oneshot(get_request("/env-check")).await.expect("request should run");

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;

    assert_eq!(body["DB_PASSWORD"]["present"], true);
    assert_eq!(body["DB_PASSWORD"]["len"], 14);
    assert!(body["DB_PASSWORD"].get("sample").is_none());
    assert!(body["API_SECRET_KEY"].get("sample").is_none());

    assert_eq!(body["DB_HOST"]["sample"], "db.inter");

    let rendered = body.to_string();
    assert!(!rendered.contains("hunter2hunter2"));
    assert!(!rendered.contains("super-secret"));
}

/// Unset and empty keys are reported as absent, without a length.
#[tokio::test]
async fn env_check_reports_missing_keys() {
    let mut guard = EnvGuard::new();
    guard.set("DB_HOST", "db.example.com");
    guard.set("DB_USER", "");
    guard.remove("DB_PASSWORD");
    guard.set("API_SECRET_KEY", "shh");

    let app = test_router("");
    let response = app.oneshot(get_request("/env-check")).await.expect("request should run");

    let body = body_json(response).await;

    assert_eq!(body["DB_USER"]["present"], false);
    assert!(body["DB_USER"].get("len").is_none());
    assert_eq!(body["DB_PASSWORD"]["present"], false);
    assert_eq!(body["API_SECRET_KEY"]["present"], true);
}
