//! Task Server Library
//!
//! Configuration loading, telemetry and startup wiring for the `task-server`
//! binary: bootstrap the MySQL schema, open the pool, and build the HTTP server.

pub mod config;
pub mod setup;
pub mod telemetry;

pub use config::Config;
pub use setup::{create_repository, create_server, initialize_app};
pub use telemetry::init_telemetry;
