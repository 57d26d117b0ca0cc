//! HTTP scenario runner for the task server
//!
//! Drives a running server through the public API only: create, read,
//! update, list and delete a task, then checks the error surface.

use anyhow::{ensure, Context, Result};
use reqwest::{Client, Method, StatusCode};
use serde_json::{json, Value};
use std::{path::PathBuf, time::Duration};
use tokio::{
    process::{Child, Command},
    time::sleep,
};
use tracing::{debug, info};

/// Number of `/health` polls before giving up on startup
const READY_ATTEMPTS: u32 = 30;

/// Delay between `/health` polls
const READY_INTERVAL: Duration = Duration::from_millis(500);

/// Test harness bound to one server
pub struct SmokeHarness {
    client: Client,
    base_url: String,
    server_process: Option<Child>,
}

impl SmokeHarness {
    /// Use an already running server
    pub fn attach(base_url: impl Into<String>) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            server_process: None,
        })
    }

    /// Start the server binary on `port` and attach to it
    ///
    /// Database settings are inherited from the environment (`DB_HOST`, ...).
    pub fn spawn(server_binary: PathBuf, port: u16) -> Result<Self> {
        info!("Starting task server {:?} on port {}", server_binary, port);

        let child = Command::new(&server_binary)
            .arg("--port")
            .arg(port.to_string())
            .arg("--listen-addr")
            .arg("127.0.0.1")
            .env("RUST_LOG", "info")
            .kill_on_drop(true)
            .spawn()
            .with_context(|| format!("Failed to start {}", server_binary.display()))?;

        let mut harness = Self::attach(format!("http://127.0.0.1:{port}"))?;
        harness.server_process = Some(child);
        Ok(harness)
    }

    /// Poll `/health` until the server answers
    pub async fn wait_until_ready(&self) -> Result<()> {
        let url = format!("{}/health", self.base_url);
        info!("Waiting for server to be ready at {}", url);

        for attempt in 1..=READY_ATTEMPTS {
            if let Ok(response) = self
                .client
                .get(&url)
                .timeout(Duration::from_secs(2))
                .send()
                .await
            {
                if response.status().is_success() {
                    info!("Server ready");
                    return Ok(());
                }
            }

            if attempt % 5 == 0 {
                info!("Server not ready yet, attempt {}/{}", attempt, READY_ATTEMPTS);
            }
            sleep(READY_INTERVAL).await;
        }

        Err(anyhow::anyhow!(
            "Server did not become ready within {} seconds",
            READY_INTERVAL.as_secs_f32() * READY_ATTEMPTS as f32
        ))
    }

    /// Send a request and return status plus parsed JSON body
    async fn call(&self, method: Method, path: &str, body: Option<Value>) -> Result<(StatusCode, Value)> {
        let url = format!("{}{}", self.base_url, path);
        debug!("{} {}", method, url);

        let mut request = self.client.request(method.clone(), &url);
        if let Some(body) = body {
            request = request.json(&body);
        }

        let response = request
            .send()
            .await
            .with_context(|| format!("{method} {path} failed"))?;
        let status = response.status();
        let text = response.text().await.context("Failed to read response body")?;
        debug!("{} {} -> {} {}", method, path, status, text);

        let json = serde_json::from_str(&text)
            .with_context(|| format!("{method} {path} returned non-JSON body: {text}"))?;
        Ok((status, json))
    }

    /// Run every scenario, stopping at the first failure
    pub async fn run_all(&self) -> Result<()> {
        self.test_connectivity().await?;
        self.test_task_lifecycle().await?;
        self.test_validation_errors().await?;
        self.test_unknown_ids().await?;
        info!("All API smoke scenarios passed");
        Ok(())
    }

    async fn test_connectivity(&self) -> Result<()> {
        let (status, body) = self.call(Method::GET, "/api/test-db", None).await?;
        ensure!(status == StatusCode::OK, "test-db returned {status}: {body}");
        ensure!(body["success"] == json!(true), "test-db not successful: {body}");
        info!("test-db - PASSED");
        Ok(())
    }

    async fn test_task_lifecycle(&self) -> Result<()> {
        let (status, body) = self
            .call(Method::POST, "/api/tasks", Some(json!({"title": "Buy milk"})))
            .await?;
        ensure!(status == StatusCode::CREATED, "create returned {status}: {body}");

        let task = &body["data"];
        let id = task["id"].as_i64().context("created task has no id")?;
        ensure!(task["title"] == "Buy milk", "unexpected title: {task}");
        ensure!(task["description"] == "", "unexpected description: {task}");
        ensure!(task["status"] == "pending", "unexpected status: {task}");
        info!("Created task {}", id);

        let (status, body) = self.call(Method::GET, &format!("/api/tasks/{id}"), None).await?;
        ensure!(status == StatusCode::OK, "get returned {status}: {body}");
        ensure!(body["data"]["title"] == "Buy milk", "get mismatch: {body}");

        let (status, body) = self
            .call(
                Method::PUT,
                &format!("/api/tasks/{id}"),
                Some(json!({"title": "Buy milk", "status": "completed"})),
            )
            .await?;
        ensure!(status == StatusCode::OK, "update returned {status}: {body}");
        ensure!(body["data"]["status"] == "completed", "update mismatch: {body}");
        ensure!(
            body["data"]["updated_at"] != task["updated_at"],
            "updated_at did not advance: {body}"
        );

        let (status, body) = self.call(Method::GET, "/api/tasks", None).await?;
        ensure!(status == StatusCode::OK, "list returned {status}: {body}");
        let listed = body["data"].as_array().context("list data is not an array")?;
        ensure!(
            listed.iter().any(|t| t["id"].as_i64() == Some(id)),
            "created task missing from list"
        );

        let (status, body) = self.call(Method::DELETE, &format!("/api/tasks/{id}"), None).await?;
        ensure!(status == StatusCode::OK, "delete returned {status}: {body}");
        ensure!(
            body["message"] == "Task deleted successfully",
            "unexpected delete message: {body}"
        );

        let (status, _) = self.call(Method::GET, &format!("/api/tasks/{id}"), None).await?;
        ensure!(status == StatusCode::NOT_FOUND, "deleted task still readable: {status}");

        let (status, _) = self.call(Method::DELETE, &format!("/api/tasks/{id}"), None).await?;
        ensure!(status == StatusCode::NOT_FOUND, "second delete returned {status}");

        info!("Task lifecycle - PASSED");
        Ok(())
    }

    async fn test_validation_errors(&self) -> Result<()> {
        for body in [json!({}), json!({"title": ""}), json!({"title": "   "})] {
            let (status, response) = self.call(Method::POST, "/api/tasks", Some(body.clone())).await?;
            ensure!(
                status == StatusCode::BAD_REQUEST,
                "create with {body} returned {status}"
            );
            ensure!(response["success"] == json!(false), "not an error envelope: {response}");
            ensure!(response["error"] == "Title is required", "unexpected error: {response}");
        }

        let (status, response) = self
            .call(
                Method::POST,
                "/api/tasks",
                Some(json!({"title": "x", "status": "archived"})),
            )
            .await?;
        ensure!(status == StatusCode::BAD_REQUEST, "bad status returned {status}: {response}");

        info!("Validation errors - PASSED");
        Ok(())
    }

    async fn test_unknown_ids(&self) -> Result<()> {
        for path in ["/api/tasks/999999999", "/api/tasks/abc", "/api/tasks/0"] {
            let (status, body) = self.call(Method::GET, path, None).await?;
            ensure!(status == StatusCode::NOT_FOUND, "GET {path} returned {status}");
            ensure!(body["error"] == "Task not found", "unexpected error: {body}");
        }

        let (status, _) = self
            .call(
                Method::PUT,
                "/api/tasks/999999999",
                Some(json!({"title": "ghost"})),
            )
            .await?;
        ensure!(status == StatusCode::NOT_FOUND, "update of unknown id returned {status}");

        info!("Unknown ids - PASSED");
        Ok(())
    }
}

impl Drop for SmokeHarness {
    fn drop(&mut self) {
        if let Some(mut child) = self.server_process.take() {
            let _ = child.start_kill();
        }
    }
}
