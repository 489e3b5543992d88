//! Rate limiting middleware
//!
//! Token bucket rate limiter keyed by client IP. Buckets refill
//! continuously at `max_requests` per `window`, so a client that bursts
//! through its allowance is throttled until tokens accumulate again.

use std::{
    collections::HashMap,
    future::Future,
    net::IpAddr,
    pin::Pin,
    sync::Arc,
    task::{Context, Poll},
    time::{Duration, Instant},
};

use axum::{
    extract::Request,
    response::{IntoResponse, Response},
};
use tokio::sync::RwLock;
use tower::{Layer, Service};

use crate::error::ApiError;

/// Rate limiter configuration
#[derive(Clone, Debug)]
pub struct RateLimiterConfig {
    /// Maximum requests per client per window
    pub max_requests: u32,
    /// Length of the window
    pub window: Duration,
    /// Enable rate limiting
    pub enabled: bool,
}

impl Default for RateLimiterConfig {
    fn default() -> Self {
        Self {
            max_requests: 10,
            window: Duration::from_secs(300),
            enabled: true,
        }
    }
}

/// Token bucket entry for a single IP
#[derive(Debug, Clone)]
struct TokenBucket {
    tokens: f64,
    last_update: Instant,
}

impl TokenBucket {
    fn new(max_tokens: f64) -> Self {
        Self {
            tokens: max_tokens,
            last_update: Instant::now(),
        }
    }

    /// Try to consume a token, returning true if allowed
    fn try_consume(&mut self, tokens_per_second: f64, max_tokens: f64) -> bool {
        let now = Instant::now();
        let elapsed = now.duration_since(self.last_update).as_secs_f64();

        self.tokens = elapsed
            .mul_add(tokens_per_second, self.tokens)
            .min(max_tokens);
        self.last_update = now;

        if self.tokens >= 1.0 {
            self.tokens -= 1.0;
            true
        } else {
            false
        }
    }
}

/// Shared rate limiter state
#[derive(Debug)]
pub struct RateLimiterState {
    buckets: RwLock<HashMap<IpAddr, TokenBucket>>,
    tokens_per_second: f64,
    max_tokens: f64,
}

impl RateLimiterState {
    /// Create a new rate limiter state
    #[must_use]
    pub fn new(max_requests: u32, window: Duration) -> Self {
        let max_tokens = f64::from(max_requests);
        Self {
            buckets: RwLock::new(HashMap::new()),
            tokens_per_second: max_tokens / window.as_secs_f64().max(1.0),
            max_tokens,
        }
    }

    /// Check if a request from the given IP is allowed
    #[allow(clippy::significant_drop_tightening)]
    pub async fn check(&self, ip: IpAddr) -> bool {
        let mut buckets = self.buckets.write().await;

        let bucket = buckets
            .entry(ip)
            .or_insert_with(|| TokenBucket::new(self.max_tokens));

        let tokens_per_second = self.tokens_per_second;
        let max_tokens = self.max_tokens;
        bucket.try_consume(tokens_per_second, max_tokens)
    }

    /// Clean up stale entries older than the specified duration
    pub async fn cleanup(&self, older_than: Duration) {
        let mut buckets = self.buckets.write().await;
        let cutoff = Instant::now()
            .checked_sub(older_than)
            .unwrap_or_else(Instant::now);

        buckets.retain(|_, bucket| bucket.last_update > cutoff);
    }
}

/// Layer that applies rate limiting
#[derive(Clone, Debug)]
pub struct RateLimiterLayer {
    state: Arc<RateLimiterState>,
    enabled: bool,
    excluded_paths: Vec<String>,
}

impl RateLimiterLayer {
    /// Create a new rate limiter layer.
    ///
    /// `/health` is excluded so load balancer probes are never throttled.
    #[must_use]
    pub fn new(config: &RateLimiterConfig) -> Self {
        Self {
            state: Arc::new(RateLimiterState::new(config.max_requests, config.window)),
            enabled: config.enabled,
            excluded_paths: vec!["/health".to_string()],
        }
    }

    /// Get a reference to the rate limiter state for cleanup tasks
    #[must_use]
    pub fn state(&self) -> Arc<RateLimiterState> {
        Arc::clone(&self.state)
    }
}

/// Spawn a background task that periodically evicts idle client buckets.
///
/// The bucket map gains an entry per distinct client IP, so it must be
/// swept. A bucket idle for a full window has refilled completely and is
/// indistinguishable from a fresh one, so evicting it never changes what
/// a client is allowed to do. Returns a `JoinHandle` to abort on shutdown.
pub fn spawn_bucket_cleanup_task(
    state: Arc<RateLimiterState>,
    window: Duration,
) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(window.max(Duration::from_millis(10)));
        ticker.tick().await;

        loop {
            ticker.tick().await;
            state.cleanup(window).await;
        }
    })
}

impl<S> Layer<S> for RateLimiterLayer {
    type Service = RateLimiter<S>;

    fn layer(&self, inner: S) -> Self::Service {
        RateLimiter {
            inner,
            state: Arc::clone(&self.state),
            enabled: self.enabled,
            excluded_paths: self.excluded_paths.clone(),
        }
    }
}

/// Middleware service for rate limiting
#[derive(Clone, Debug)]
pub struct RateLimiter<S> {
    inner: S,
    state: Arc<RateLimiterState>,
    enabled: bool,
    excluded_paths: Vec<String>,
}

impl<S> Service<Request> for RateLimiter<S>
where
    S: Service<Request, Response = Response> + Clone + Send + 'static,
    S::Future: Send,
{
    type Response = Response;
    type Error = S::Error;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>> + Send>>;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, req: Request) -> Self::Future {
        let enabled = self.enabled;
        let state = Arc::clone(&self.state);
        let excluded_paths = self.excluded_paths.clone();
        let mut inner = self.inner.clone();

        Box::pin(async move {
            if !enabled {
                return inner.call(req).await;
            }

            let path = req.uri().path().to_string();
            if excluded_paths.iter().any(|p| path.starts_with(p)) {
                return inner.call(req).await;
            }

            let client_ip = extract_client_ip(&req);

            if state.check(client_ip).await {
                inner.call(req).await
            } else {
                Ok(ApiError::RateLimited { path }.into_response())
            }
        })
    }
}

fn extract_client_ip(req: &Request) -> IpAddr {
    // X-Forwarded-For first, for reverse proxy setups
    if let Some(forwarded) = req
        .headers()
        .get("x-forwarded-for")
        .and_then(|v| v.to_str().ok())
    {
        // First IP in the chain is the original client
        if let Some(ip_str) = forwarded.split(',').next() {
            if let Ok(ip) = ip_str.trim().parse::<IpAddr>() {
                return ip;
            }
        }
    }

    "127.0.0.1"
        .parse()
        .unwrap_or(IpAddr::V4(std::net::Ipv4Addr::LOCALHOST))
}

#[cfg(test)]
mod tests {
    use axum::{Router, body::Body, routing::get};
    use tower::ServiceExt;

    use super::*;

    async fn test_handler() -> &'static str {
        "ok"
    }

    fn test_config(enabled: bool, max_requests: u32) -> RateLimiterConfig {
        RateLimiterConfig {
            enabled,
            max_requests,
            window: Duration::from_secs(300),
        }
    }

    #[tokio::test]
    async fn disabled_limiter_passes_all_requests() {
        let app = Router::new()
            .route("/test", get(test_handler))
            .layer(RateLimiterLayer::new(&test_config(false, 1)));

        for _ in 0..10 {
            let response = app
                .clone()
                .oneshot(Request::builder().uri("/test").body(Body::empty()).unwrap())
                .await
                .unwrap();
            assert_eq!(response.status(), axum::http::StatusCode::OK);
        }
    }

    #[tokio::test]
    async fn blocks_requests_over_the_limit() {
        let app = Router::new()
            .route("/test", get(test_handler))
            .layer(RateLimiterLayer::new(&test_config(true, 2)));

        for _ in 0..3 {
            let response = app
                .clone()
                .oneshot(Request::builder().uri("/test").body(Body::empty()).unwrap())
                .await
                .unwrap();
            if response.status() == axum::http::StatusCode::TOO_MANY_REQUESTS {
                return;
            }
        }

        unreachable!("Expected the third request to be throttled");
    }

    #[tokio::test]
    async fn throttled_response_carries_request_path() {
        let app = Router::new()
            .route("/test", get(test_handler))
            .layer(RateLimiterLayer::new(&test_config(true, 1)));

        let _ = app
            .clone()
            .oneshot(Request::builder().uri("/test").body(Body::empty()).unwrap())
            .await
            .unwrap();
        let response = app
            .clone()
            .oneshot(Request::builder().uri("/test").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), axum::http::StatusCode::TOO_MANY_REQUESTS);

        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["status"], 429);
        assert_eq!(json["path"], "/test");
        assert!(json["timestamp"].as_str().is_some());
    }

    #[tokio::test]
    async fn health_endpoint_is_never_throttled() {
        let app = Router::new()
            .route("/health", get(test_handler))
            .layer(RateLimiterLayer::new(&test_config(true, 1)));

        for _ in 0..5 {
            let response = app
                .clone()
                .oneshot(
                    Request::builder()
                        .uri("/health")
                        .body(Body::empty())
                        .unwrap(),
                )
                .await
                .unwrap();
            assert_eq!(response.status(), axum::http::StatusCode::OK);
        }
    }

    #[tokio::test]
    async fn clients_are_tracked_separately() {
        let app = Router::new()
            .route("/test", get(test_handler))
            .layer(RateLimiterLayer::new(&test_config(true, 1)));

        // Exhaust the first client's allowance.
        let first = app
            .clone()
            .oneshot(
                Request::builder()
                    .uri("/test")
                    .header("x-forwarded-for", "10.0.0.1")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(first.status(), axum::http::StatusCode::OK);

        // A different client still gets through.
        let other = app
            .clone()
            .oneshot(
                Request::builder()
                    .uri("/test")
                    .header("x-forwarded-for", "10.0.0.2")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(other.status(), axum::http::StatusCode::OK);
    }

    #[tokio::test]
    async fn token_bucket_refills_over_time() {
        let mut bucket = TokenBucket::new(1.0);

        assert!(bucket.try_consume(1.0, 1.0));
        assert!(!bucket.try_consume(1.0, 1.0));

        bucket.last_update = Instant::now()
            .checked_sub(Duration::from_secs(2))
            .expect("Time subtraction should succeed");

        assert!(bucket.try_consume(1.0, 1.0));
    }

    #[tokio::test]
    async fn cleanup_keeps_fresh_entries() {
        let state = RateLimiterState::new(10, Duration::from_secs(300));
        let ip: IpAddr = "192.168.1.1".parse().unwrap();

        state.check(ip).await;
        state.cleanup(Duration::from_secs(3600)).await;
        assert_eq!(state.buckets.read().await.len(), 1);
    }

    #[tokio::test]
    async fn cleanup_evicts_idle_clients() {
        let state = RateLimiterState::new(10, Duration::from_secs(300));
        let stale: IpAddr = "10.0.0.1".parse().unwrap();
        let fresh: IpAddr = "10.0.0.2".parse().unwrap();

        // The map grows by one bucket per distinct client.
        state.check(stale).await;
        state.check(fresh).await;
        assert_eq!(state.buckets.read().await.len(), 2);

        state
            .buckets
            .write()
            .await
            .get_mut(&stale)
            .unwrap()
            .last_update = Instant::now()
            .checked_sub(Duration::from_secs(600))
            .expect("Time subtraction should succeed");

        state.cleanup(Duration::from_secs(300)).await;

        let buckets = state.buckets.read().await;
        assert_eq!(buckets.len(), 1);
        assert!(buckets.contains_key(&fresh));
    }

    #[tokio::test]
    async fn bucket_cleanup_task_sweeps_periodically() {
        let state = Arc::new(RateLimiterState::new(10, Duration::from_millis(20)));
        let ip: IpAddr = "10.0.0.3".parse().unwrap();

        state.check(ip).await;
        state
            .buckets
            .write()
            .await
            .get_mut(&ip)
            .unwrap()
            .last_update = Instant::now()
            .checked_sub(Duration::from_secs(60))
            .expect("Time subtraction should succeed");

        let handle = spawn_bucket_cleanup_task(Arc::clone(&state), Duration::from_millis(20));
        tokio::time::sleep(Duration::from_millis(120)).await;
        handle.abort();

        assert!(state.buckets.read().await.is_empty());
    }
}
