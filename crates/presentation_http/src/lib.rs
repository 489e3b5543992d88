//! Talkscribe HTTP presentation layer
//!
//! This crate provides the HTTP API for Talkscribe.

pub mod error;
pub mod handlers;
pub mod middleware;
pub mod routes;
pub mod state;
pub mod tasks;

pub use error::ApiError;
pub use middleware::{RateLimiterConfig, RateLimiterLayer, spawn_bucket_cleanup_task};
pub use routes::create_router;
pub use state::AppState;
pub use tasks::spawn_job_cleanup_task;
