// Shared helpers for the integration tests. Not every test binary uses all of them.
#![allow(dead_code)]

use std::process::{Child, Command, Stdio};
use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use axum::{
    body::{to_bytes, Body},
    http::{header::CONTENT_TYPE, Method, Request},
    Router,
};
use chrono::{TimeZone, Utc};
use serde_json::Value;
use tower::ServiceExt;

use company_services::config::AppConfig;
use company_services::database::MemoryCompanyRepository;
use company_services::validation::{BusinessCalendar, FixedClock};
use company_services::{app, AppState};

pub const BASE: &str = "/CompanyServices";

/// Router over a fresh in-memory repository with "now" pinned to
/// Monday 2024-06-03 12:00 UTC.
#[derive(Clone)]
pub struct TestApp {
    router: Router,
}

impl TestApp {
    pub fn new() -> Self {
        let clock = FixedClock(Utc.with_ymd_and_hms(2024, 6, 3, 12, 0, 0).unwrap());
        let state = AppState::new(Arc::new(MemoryCompanyRepository::new()), BusinessCalendar::default())
            .with_clock(Arc::new(clock));
        Self {
            router: app(state, &AppConfig::development()),
        }
    }

    /// Send a request and decode the JSON body. Every response is expected to be 200.
    pub async fn send(&self, request: Request<Body>) -> Value {
        let response = self.router.clone().oneshot(request).await.unwrap();
        assert_eq!(response.status(), 200);
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    pub async fn get(&self, path: &str) -> Value {
        self.send(Request::get(format!("{}{}", BASE, path)).body(Body::empty()).unwrap())
            .await
    }

    pub async fn delete(&self, path: &str) -> Value {
        self.send(Request::delete(format!("{}{}", BASE, path)).body(Body::empty()).unwrap())
            .await
    }

    pub async fn post_json(&self, path: &str, body: Value) -> Value {
        self.json(Method::POST, path, body).await
    }

    pub async fn put_json(&self, path: &str, body: Value) -> Value {
        self.json(Method::PUT, path, body).await
    }

    pub async fn post_form(&self, path: &str, body: &str) -> Value {
        let request = Request::post(format!("{}{}", BASE, path))
            .header(CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(Body::from(body.to_string()))
            .unwrap();
        self.send(request).await
    }

    async fn json(&self, method: Method, path: &str, body: Value) -> Value {
        let request = Request::builder()
            .method(method)
            .uri(format!("{}{}", BASE, path))
            .header(CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap();
        self.send(request).await
    }
}

/// The `error` text of a response, panicking if it succeeded
pub fn error_of(body: &Value) -> &str {
    body.get("error")
        .and_then(Value::as_str)
        .unwrap_or_else(|| panic!("expected an error, got {}", body))
}

/// The `success` payload of a response, panicking if it failed
pub fn success_of(body: &Value) -> &Value {
    body.get("success")
        .unwrap_or_else(|| panic!("expected success, got {}", body))
}

/// Create department "Eng" for ab1234 and return its id
pub async fn seed_department(app: &TestApp, dept_no: &str) -> i64 {
    let body = app
        .post_json(
            "/department",
            serde_json::json!({
                "company": "ab1234",
                "dept_name": "Eng",
                "dept_no": dept_no,
                "location": "NY"
            }),
        )
        .await;
    success_of(&body)["dept_id"].as_i64().unwrap()
}

/// Create an employee in `dept_id` and return its id
pub async fn seed_employee(app: &TestApp, dept_id: i64, emp_no: &str) -> i64 {
    let body = app
        .post_json(
            "/employee",
            serde_json::json!({
                "company": "ab1234",
                "emp_name": "Ada",
                "emp_no": emp_no,
                "hire_date": "2020-03-02",
                "job": "Engineer",
                "salary": 52000,
                "dept_id": dept_id,
                "mng_id": 0
            }),
        )
        .await;
    success_of(&body)["emp_id"].as_i64().unwrap()
}

/// The server binary running on a free port with in-memory storage.
/// Killed on drop.
pub struct TestServer {
    pub port: u16,
    pub base_url: String,
    child: Child,
}

impl TestServer {
    pub async fn spawn() -> Result<Self> {
        // Pick an unused port for isolation
        let port = portpicker::pick_unused_port().context("failed to pick free port")?;
        let base_url = format!("http://127.0.0.1:{}", port);

        let child = Command::new(env!("CARGO_BIN_EXE_company-services"))
            .args(["--storage", "memory", "--port", &port.to_string()])
            .env("RUST_LOG", "warn")
            .stdin(Stdio::null())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .spawn()
            .context("failed to spawn server binary")?;

        let server = Self { port, base_url, child };
        server.wait_ready(Duration::from_secs(10)).await?;
        Ok(server)
    }

    async fn wait_ready(&self, timeout: Duration) -> Result<()> {
        let client = reqwest::Client::new();
        let deadline = Instant::now() + timeout;
        let url = format!("{}/health", self.base_url);
        while Instant::now() < deadline {
            if let Ok(resp) = client.get(&url).send().await {
                if resp.status().is_success() {
                    return Ok(());
                }
            }
            tokio::time::sleep(Duration::from_millis(150)).await;
        }
        anyhow::bail!("server did not become ready on {} within {:?}", self.base_url, timeout)
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}{}", self.base_url, BASE, path)
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        let _ = self.child.kill();
        let _ = self.child.wait();
    }
}
