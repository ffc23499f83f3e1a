//! Request tagging, bearer auth and throttling for the `/api/v1` routes.

use std::{
    collections::HashSet,
    sync::Arc,
    time::{Duration, Instant},
};

use axum::{
    extract::{Request, State},
    http::{header::AUTHORIZATION, HeaderValue},
    middleware::Next,
    response::{IntoResponse, Response},
    Extension,
};
use procure_core::{Environment, ServerSettings};
use tokio::sync::Mutex;
use uuid::Uuid;

use crate::api::ApiError;

const REQUEST_ID_HEADER: &str = "x-request-id";

/// Correlates log lines and response envelopes for one request.
#[derive(Debug, Clone)]
pub struct RequestId(pub String);

/// Who may call the protected routes.
#[derive(Debug, Clone)]
pub enum BearerAuth {
    /// Development without configured keys: every caller is let through.
    Open,
    Keys(Arc<HashSet<String>>),
}

impl BearerAuth {
    /// # Errors
    ///
    /// Fails when no API keys are configured outside development.
    pub fn for_environment(settings: &ServerSettings, env: Environment) -> anyhow::Result<Self> {
        if !settings.api_keys.is_empty() {
            return Ok(Self::Keys(Arc::new(
                settings.api_keys.iter().cloned().collect(),
            )));
        }
        if env.is_development() {
            tracing::warn!("PROCURE_API_KEYS is empty; nearest-supplier routes are unauthenticated");
            return Ok(Self::Open);
        }
        anyhow::bail!("PROCURE_API_KEYS must list at least one bearer token in {env}")
    }

    fn admits(&self, authorization: Option<&HeaderValue>) -> bool {
        match self {
            Self::Open => true,
            Self::Keys(keys) => bearer_token(authorization).is_some_and(|t| keys.contains(t)),
        }
    }
}

/// Shared request budget: at most `limit` calls per `window`, counted from
/// the first call of the window.
#[derive(Debug, Clone)]
pub struct RateLimiter {
    limit: usize,
    window: Duration,
    current: Arc<Mutex<(Instant, usize)>>,
}

impl RateLimiter {
    #[must_use]
    pub fn new(limit: usize, window: Duration) -> Self {
        Self {
            limit,
            window,
            current: Arc::new(Mutex::new((Instant::now(), 0))),
        }
    }

    #[must_use]
    pub fn per_minute(limit: usize) -> Self {
        Self::new(limit, Duration::from_secs(60))
    }

    /// Spend one unit of the budget at `now`; `false` once it is exhausted.
    async fn try_acquire(&self, now: Instant) -> bool {
        let mut current = self.current.lock().await;
        let (started, used) = &mut *current;
        if now.saturating_duration_since(*started) >= self.window {
            *started = now;
            *used = 0;
        }
        if *used >= self.limit {
            return false;
        }
        *used += 1;
        true
    }
}

/// Reuse the caller's `x-request-id` or mint a `UUIDv4`, then echo it back.
pub async fn request_id(mut req: Request, next: Next) -> Response {
    let id = req
        .headers()
        .get(REQUEST_ID_HEADER)
        .and_then(|v| v.to_str().ok())
        .filter(|v| !v.is_empty())
        .map_or_else(|| Uuid::new_v4().to_string(), String::from);

    req.extensions_mut().insert(RequestId(id.clone()));
    let mut res = next.run(req).await;
    if let Ok(val) = HeaderValue::from_str(&id) {
        res.headers_mut().insert(REQUEST_ID_HEADER, val);
    }
    res
}

pub async fn require_bearer_auth(
    State(auth): State<BearerAuth>,
    Extension(req_id): Extension<RequestId>,
    req: Request,
    next: Next,
) -> Response {
    if auth.admits(req.headers().get(AUTHORIZATION)) {
        return next.run(req).await;
    }
    ApiError::new(req_id.0, "unauthorized", "missing or invalid bearer token").into_response()
}

pub async fn enforce_rate_limit(
    State(limiter): State<RateLimiter>,
    Extension(req_id): Extension<RequestId>,
    req: Request,
    next: Next,
) -> Response {
    if limiter.try_acquire(Instant::now()).await {
        return next.run(req).await;
    }
    tracing::warn!(request_id = %req_id.0, "rate limit exceeded");
    ApiError::new(req_id.0, "rate_limited", "rate limit exceeded").into_response()
}

fn bearer_token(value: Option<&HeaderValue>) -> Option<&str> {
    value?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|t| !t.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::net::SocketAddr;

    fn settings(keys: &[&str]) -> ServerSettings {
        ServerSettings {
            bind_addr: SocketAddr::from(([127, 0, 0, 1], 3000)),
            api_keys: keys.iter().map(ToString::to_string).collect(),
            rate_limit_per_minute: 120,
        }
    }

    #[test]
    fn bearer_token_requires_the_bearer_scheme() {
        let ok = HeaderValue::from_static("Bearer ops-key");
        let basic = HeaderValue::from_static("Basic b3BzOmtleQ==");
        let blank = HeaderValue::from_static("Bearer   ");
        assert_eq!(bearer_token(Some(&ok)), Some("ops-key"));
        assert_eq!(bearer_token(Some(&basic)), None);
        assert_eq!(bearer_token(Some(&blank)), None);
        assert_eq!(bearer_token(None), None);
    }

    #[test]
    fn no_keys_means_open_in_development_only() {
        let empty = settings(&[]);
        assert!(matches!(
            BearerAuth::for_environment(&empty, Environment::Development),
            Ok(BearerAuth::Open)
        ));
        assert!(BearerAuth::for_environment(&empty, Environment::Test).is_err());
        assert!(BearerAuth::for_environment(&empty, Environment::Production).is_err());
    }

    #[test]
    fn configured_keys_are_enforced_even_in_development() {
        let auth = BearerAuth::for_environment(&settings(&["ops-key"]), Environment::Development)
            .expect("keys configured");
        let good = HeaderValue::from_static("Bearer ops-key");
        let bad = HeaderValue::from_static("Bearer buyer-key");
        assert!(auth.admits(Some(&good)));
        assert!(!auth.admits(Some(&bad)));
        assert!(!auth.admits(None));
    }

    #[tokio::test]
    async fn rate_limiter_resets_after_the_window() {
        let limiter = RateLimiter::new(2, Duration::from_secs(60));
        let start = Instant::now();

        assert!(limiter.try_acquire(start).await);
        assert!(limiter.try_acquire(start).await);
        assert!(!limiter.try_acquire(start + Duration::from_secs(59)).await);
        assert!(limiter.try_acquire(start + Duration::from_secs(61)).await);
    }
}
