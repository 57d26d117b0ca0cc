//! HTTP API for the task service
//!
//! This crate exposes a [`TaskRepository`](task_core::TaskRepository) over a
//! JSON/HTTP interface built on axum:
//!
//! - `GET /api/tasks`, `POST /api/tasks`
//! - `GET`, `PUT`, `DELETE /api/tasks/:id`
//! - `GET /api/test-db` for a database round trip, `GET /health` for liveness
//! - Static client files for every other path
//!
//! Every `/api` response uses the envelope in [`envelope::ApiResponse`].
//!
//! # Usage
//!
//! ```no_run
//! use http_api::TaskApiServer;
//! use mocks::MockTaskRepository;
//! use std::sync::Arc;
//!
//! # async fn run() -> std::io::Result<()> {
//! let repository = Arc::new(MockTaskRepository::new());
//! let listener = tokio::net::TcpListener::bind("127.0.0.1:3000").await?;
//!
//! TaskApiServer::new(repository)
//!     .with_static_dir("public")
//!     .serve(listener, async {
//!         let _ = tokio::signal::ctrl_c().await;
//!     })
//!     .await
//! # }
//! ```

pub mod envelope;
pub mod error;
pub mod handler;
pub mod request_logger;
pub mod server;

pub use envelope::ApiResponse;
pub use error::{ApiError, Operation};
pub use handler::{TaskPayload, TaskResourceHandler};
pub use server::{TaskApiServer, CONNECTION_CONFIRMATION, DELETE_CONFIRMATION};
