//! Per-client token bucket rate limiting.
//!
//! Clients are keyed by IP: the socket peer, or the first `X-Forwarded-For`
//! entry when the deployment trusts that header.

use std::{
    net::{IpAddr, SocketAddr},
    num::NonZeroU32,
    sync::Arc,
    time::Duration,
};

use axum::{
    extract::{ConnectInfo, Request, State},
    http::{HeaderValue, StatusCode, header::RETRY_AFTER},
    middleware::Next,
    response::Response,
};
use governor::{
    Quota, RateLimiter,
    clock::{Clock, DefaultClock},
    state::keyed::DashMapStateStore,
};
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use crate::error::error_response;

/// Rate limiter keyed by client IP address.
pub type IpRateLimiter = Arc<RateLimiter<IpAddr, DashMapStateStore<IpAddr>, DefaultClock>>;

/// Middleware state: the shared limiter and how to key clients.
#[derive(Clone)]
pub struct ClientRateLimit {
    /// Token buckets per client.
    pub limiter: IpRateLimiter,
    /// Whether `X-Forwarded-For` identifies the client.
    pub trust_forwarded_for: bool,
}

impl ClientRateLimit {
    /// Builds the limiter from `per_second` and `burst`.
    pub fn new(per_second: u32, burst: u32, trust_forwarded_for: bool) -> Self {
        Self {
            limiter: create_ip_rate_limiter(per_second, burst),
            trust_forwarded_for,
        }
    }
}

/// Creates a keyed limiter refilling `per_second` tokens with capacity `burst`.
///
/// Zero values are raised to one.
pub fn create_ip_rate_limiter(per_second: u32, burst: u32) -> IpRateLimiter {
    let rate = NonZeroU32::new(per_second).unwrap_or(NonZeroU32::MIN);
    let burst = NonZeroU32::new(burst).unwrap_or(NonZeroU32::MIN);
    let quota = Quota::per_second(rate).allow_burst(burst);

    Arc::new(RateLimiter::dashmap(quota))
}

/// Resolves the client address for rate limiting.
fn client_ip(request: &Request, trust_forwarded_for: bool) -> Option<IpAddr> {
    let forwarded = if trust_forwarded_for {
        request.headers().get("x-forwarded-for")
    } else {
        None
    };
    let forwarded_ip = forwarded
        .and_then(|v| v.to_str().ok())
        .and_then(|s| s.split(',').next())
        .and_then(|s| s.trim().parse::<IpAddr>().ok());

    forwarded_ip.or_else(|| {
        request
            .extensions()
            .get::<ConnectInfo<SocketAddr>>()
            .map(|ConnectInfo(addr)| addr.ip())
    })
}

/// Middleware for IP-based rate limiting.
pub async fn ip_rate_limit_middleware(
    State(rate_limit): State<ClientRateLimit>,
    request: Request,
    next: Next,
) -> Response {
    let Some(ip) = client_ip(&request, rate_limit.trust_forwarded_for) else {
        warn!("Could not determine IP for rate limiting");
        return next.run(request).await;
    };

    match rate_limit.limiter.check_key(&ip) {
        Ok(()) => next.run(request).await,
        Err(negative) => {
            let wait = negative.wait_time_from(DefaultClock::default().now());
            debug!(client_ip = %ip, wait_ms = wait.as_millis(), "Rate limited");

            let mut response = error_response(
                StatusCode::TOO_MANY_REQUESTS,
                "rate_limited",
                "rate limit exceeded",
            );
            let retry_after = wait.as_secs().max(1);
            response
                .headers_mut()
                .insert(RETRY_AFTER, HeaderValue::from(retry_after));
            response
        }
    }
}

/// Periodically evicts idle client entries from `limiter`.
pub fn spawn_sweeper(limiter: IpRateLimiter, every: Duration) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(every.max(Duration::from_secs(1)));
        // First tick completes immediately.
        ticker.tick().await;
        loop {
            ticker.tick().await;
            limiter.retain_recent();
            limiter.shrink_to_fit();
            debug!(tracked_clients = limiter.len(), "Rate limiter sweep");
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;

    #[test]
    fn test_burst_then_reject() {
        let limiter = create_ip_rate_limiter(1, 3);
        let ip: IpAddr = "10.0.0.1".parse().unwrap();

        assert!(limiter.check_key(&ip).is_ok());
        assert!(limiter.check_key(&ip).is_ok());
        assert!(limiter.check_key(&ip).is_ok());
        assert!(limiter.check_key(&ip).is_err());
    }

    #[test]
    fn test_clients_have_separate_buckets() {
        let limiter = create_ip_rate_limiter(1, 1);
        let a: IpAddr = "10.0.0.1".parse().unwrap();
        let b: IpAddr = "10.0.0.2".parse().unwrap();

        assert!(limiter.check_key(&a).is_ok());
        assert!(limiter.check_key(&a).is_err());
        assert!(limiter.check_key(&b).is_ok());
    }

    #[test]
    fn test_zero_config_is_clamped() {
        let limiter = create_ip_rate_limiter(0, 0);
        let ip: IpAddr = "::1".parse().unwrap();

        assert!(limiter.check_key(&ip).is_ok());
        assert!(limiter.check_key(&ip).is_err());
    }

    #[test]
    fn test_client_ip_prefers_forwarded_for() {
        let mut request = Request::builder()
            .header("x-forwarded-for", "203.0.113.7, 10.0.0.1")
            .body(Body::empty())
            .unwrap();
        request
            .extensions_mut()
            .insert(ConnectInfo(SocketAddr::from(([127, 0, 0, 1], 4000))));

        assert_eq!(client_ip(&request, true), Some("203.0.113.7".parse().unwrap()));
    }

    #[test]
    fn test_client_ip_ignores_untrusted_forwarded_for() {
        let mut request = Request::builder()
            .header("x-forwarded-for", "203.0.113.7")
            .body(Body::empty())
            .unwrap();
        request
            .extensions_mut()
            .insert(ConnectInfo(SocketAddr::from(([127, 0, 0, 1], 4000))));

        assert_eq!(client_ip(&request, false), Some("127.0.0.1".parse().unwrap()));
    }

    #[test]
    fn test_client_ip_falls_back_to_peer() {
        let mut request = Request::builder()
            .header("x-forwarded-for", "not-an-ip")
            .body(Body::empty())
            .unwrap();
        request
            .extensions_mut()
            .insert(ConnectInfo(SocketAddr::from(([192, 168, 1, 9], 4000))));

        assert_eq!(client_ip(&request, true), Some("192.168.1.9".parse().unwrap()));
    }

    #[test]
    fn test_client_ip_unknown() {
        let request = Request::builder().body(Body::empty()).unwrap();
        assert_eq!(client_ip(&request, true), None);
    }

    #[tokio::test(start_paused = true)]
    async fn test_sweeper_evicts_idle_clients() {
        let limiter = create_ip_rate_limiter(100, 1);
        let ip: IpAddr = "10.1.1.1".parse().unwrap();
        assert!(limiter.check_key(&ip).is_ok());
        assert_eq!(limiter.len(), 1);

        let handle = spawn_sweeper(Arc::clone(&limiter), Duration::from_secs(1));
        // Governor uses its own clock, so wait on real time for the bucket to refill.
        std::thread::sleep(Duration::from_millis(30));
        tokio::time::sleep(Duration::from_secs(2)).await;
        tokio::task::yield_now().await;

        assert_eq!(limiter.len(), 0);
        handle.abort();
    }
}
