//! HTTP middleware

pub mod rate_limit;

pub use rate_limit::{RateLimiterConfig, RateLimiterLayer, spawn_bucket_cleanup_task};
