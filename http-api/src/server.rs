//! HTTP server for the task API
//!
//! Routes `/api/tasks` CRUD requests to the [`TaskResourceHandler`], serves
//! the static client from a directory for every other path, and shuts down
//! gracefully when the supplied signal resolves.

use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection},
        Path, State,
    },
    http::StatusCode,
    middleware,
    routing::get,
    Json, Router,
};
use std::{future::Future, path::PathBuf, sync::Arc};
use task_core::{Task, TaskRepository};
use tokio::net::TcpListener;
use tower_http::{
    cors::{Any, CorsLayer},
    services::ServeDir,
    trace::TraceLayer,
};
use tracing::{info, warn};

use crate::{
    envelope::ApiResponse,
    error::{ApiError, INVALID_BODY, METHOD_NOT_ALLOWED, ROUTE_NOT_FOUND},
    handler::{TaskPayload, TaskResourceHandler},
    request_logger::api_request_logging_middleware,
};

/// Confirmation returned by a successful delete
pub const DELETE_CONFIRMATION: &str = "Task deleted successfully";

/// Confirmation returned by a successful connectivity check
pub const CONNECTION_CONFIRMATION: &str = "Database connection successful";

type ApiResult<T> = Result<(StatusCode, Json<ApiResponse<T>>), ApiError>;

/// Shared server state for route handlers
pub struct ApiState<R> {
    pub handler: TaskResourceHandler<R>,
}

/// Task API server
pub struct TaskApiServer<R> {
    handler: TaskResourceHandler<R>,
    static_dir: Option<PathBuf>,
}

impl<R: TaskRepository + 'static> TaskApiServer<R> {
    /// Create a server without static file serving
    pub fn new(repository: Arc<R>) -> Self {
        Self {
            handler: TaskResourceHandler::new(repository),
            static_dir: None,
        }
    }

    /// Serve files from `dir` for any path not matched by an API route
    pub fn with_static_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.static_dir = Some(dir.into());
        self
    }

    /// Run until `shutdown` resolves, then finish in-flight requests and return
    ///
    /// # Arguments
    /// * `listener` - An already bound listener
    /// * `shutdown` - Future that resolves when the server should stop accepting
    pub async fn serve<F>(self, listener: TcpListener, shutdown: F) -> std::io::Result<()>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let local_addr = listener.local_addr()?;
        let app = self.router();

        info!("Task API listening on http://{}", local_addr);

        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown)
            .await?;

        info!("Task API stopped accepting connections");
        Ok(())
    }

    /// Create the router with all endpoints
    pub fn router(self) -> Router {
        let state = Arc::new(ApiState {
            handler: self.handler,
        });

        let cors = CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any);

        // Everything under /api answers with the envelope, including misses
        let api = Router::new()
            .route(
                "/tasks",
                get(list_tasks::<R>)
                    .post(create_task::<R>)
                    .fallback(method_not_allowed),
            )
            .route(
                "/tasks/:id",
                get(get_task::<R>)
                    .put(update_task::<R>)
                    .delete(delete_task::<R>)
                    .fallback(method_not_allowed),
            )
            .route("/test-db", get(test_db::<R>).fallback(method_not_allowed))
            .fallback(api_not_found)
            .with_state(state);

        let router = Router::new()
            .nest("/api", api)
            .route("/health", get(health_handler));

        let router = match self.static_dir {
            Some(dir) => {
                if !dir.is_dir() {
                    warn!(dir = %dir.display(), "Static directory does not exist");
                }
                router.fallback_service(ServeDir::new(dir))
            }
            None => router,
        };

        router
            .layer(middleware::from_fn(api_request_logging_middleware))
            .layer(TraceLayer::new_for_http())
            .layer(cors)
    }
}

/// Path ids that cannot even be decoded name no task
fn id_or_404(id: Result<Path<String>, PathRejection>) -> Result<String, ApiError> {
    match id {
        Ok(Path(id)) => Ok(id),
        Err(rejection) => {
            tracing::debug!(reason = %rejection.body_text(), "Rejected path id");
            Err(ApiError::NotFound)
        }
    }
}

fn body_or_400(payload: Result<Json<TaskPayload>, JsonRejection>) -> Result<TaskPayload, ApiError> {
    match payload {
        Ok(Json(payload)) => Ok(payload),
        Err(rejection) => {
            tracing::debug!(reason = %rejection.body_text(), "Rejected request body");
            Err(ApiError::BadRequest(INVALID_BODY.to_string()))
        }
    }
}

async fn list_tasks<R: TaskRepository>(
    State(state): State<Arc<ApiState<R>>>,
) -> ApiResult<Vec<Task>> {
    let tasks = state.handler.list_tasks().await?;
    Ok((StatusCode::OK, Json(ApiResponse::data(tasks))))
}

async fn get_task<R: TaskRepository>(
    State(state): State<Arc<ApiState<R>>>,
    id: Result<Path<String>, PathRejection>,
) -> ApiResult<Task> {
    let id = id_or_404(id)?;
    let task = state.handler.get_task(&id).await?;
    Ok((StatusCode::OK, Json(ApiResponse::data(task))))
}

async fn create_task<R: TaskRepository>(
    State(state): State<Arc<ApiState<R>>>,
    payload: Result<Json<TaskPayload>, JsonRejection>,
) -> ApiResult<Task> {
    let payload = body_or_400(payload)?;
    let task = state.handler.create_task(payload).await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::data(task))))
}

async fn update_task<R: TaskRepository>(
    State(state): State<Arc<ApiState<R>>>,
    id: Result<Path<String>, PathRejection>,
    payload: Result<Json<TaskPayload>, JsonRejection>,
) -> ApiResult<Task> {
    let id = id_or_404(id)?;
    // An unknown id wins over a bad body
    crate::handler::parse_id(&id)?;
    let payload = body_or_400(payload)?;
    let task = state.handler.update_task(&id, payload).await?;
    Ok((StatusCode::OK, Json(ApiResponse::data(task))))
}

async fn delete_task<R: TaskRepository>(
    State(state): State<Arc<ApiState<R>>>,
    id: Result<Path<String>, PathRejection>,
) -> ApiResult<()> {
    let id = id_or_404(id)?;
    state.handler.delete_task(&id).await?;
    Ok((
        StatusCode::OK,
        Json(ApiResponse::message(DELETE_CONFIRMATION)),
    ))
}

async fn test_db<R: TaskRepository>(State(state): State<Arc<ApiState<R>>>) -> ApiResult<()> {
    state.handler.test_connection().await?;
    Ok((
        StatusCode::OK,
        Json(ApiResponse::message(CONNECTION_CONFIRMATION)),
    ))
}

async fn api_not_found() -> (StatusCode, Json<ApiResponse<()>>) {
    (
        StatusCode::NOT_FOUND,
        Json(ApiResponse::error(ROUTE_NOT_FOUND)),
    )
}

async fn method_not_allowed() -> (StatusCode, Json<ApiResponse<()>>) {
    (
        StatusCode::METHOD_NOT_ALLOWED,
        Json(ApiResponse::error(METHOD_NOT_ALLOWED)),
    )
}

/// Liveness probe; does not touch the database
async fn health_handler() -> &'static str {
    "OK"
}
