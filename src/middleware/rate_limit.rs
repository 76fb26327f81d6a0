use std::collections::HashMap;
use std::net::{IpAddr, SocketAddr};
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use axum::{
    extract::{ConnectInfo, Request, State},
    middleware::Next,
    response::Response,
};

use crate::error::ApiError;

const SWEEP_THRESHOLD: usize = 1024;

#[derive(Debug, Clone, Copy)]
struct Window {
    started: Instant,
    count: u32,
}

/// Fixed-window request counter keyed by client address.
///
/// Shared process-wide, reset when the window elapses; counters do not
/// survive a restart.
#[derive(Debug)]
pub struct FixedWindowLimiter {
    window: Duration,
    max_requests: u32,
    message: String,
    windows: Mutex<HashMap<IpAddr, Window>>,
}

impl FixedWindowLimiter {
    pub fn new(window: Duration, max_requests: u32, message: impl Into<String>) -> Self {
        Self {
            window,
            max_requests,
            message: message.into(),
            windows: Mutex::new(HashMap::new()),
        }
    }

    /// Count one request for `key`; false when over the window's budget.
    pub fn check(&self, key: IpAddr) -> bool {
        let now = Instant::now();
        let mut windows = self.windows.lock().unwrap_or_else(|e| e.into_inner());

        if windows.len() > SWEEP_THRESHOLD {
            let window = self.window;
            windows.retain(|_, w| now.duration_since(w.started) < window);
        }

        let entry = windows.entry(key).or_insert(Window { started: now, count: 0 });
        if now.duration_since(entry.started) >= self.window {
            entry.started = now;
            entry.count = 0;
        }

        entry.count += 1;
        entry.count <= self.max_requests
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

/// Rate-limiting gate; rejections flow through the error funnel as 429.
pub async fn rate_limit(
    State(limiter): State<Arc<FixedWindowLimiter>>,
    ConnectInfo(addr): ConnectInfo<SocketAddr>,
    request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    if !limiter.check(addr.ip()) {
        return Err(ApiError::too_many_requests(limiter.message()));
    }

    Ok(next.run(request).await)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ip(last: u8) -> IpAddr {
        IpAddr::from([127, 0, 0, last])
    }

    #[test]
    fn allows_up_to_max_then_rejects() {
        let limiter = FixedWindowLimiter::new(Duration::from_secs(60), 3, "demasiadas");
        let client = ip(1);

        assert!(limiter.check(client));
        assert!(limiter.check(client));
        assert!(limiter.check(client));
        assert!(!limiter.check(client));
    }

    #[test]
    fn keys_are_independent() {
        let limiter = FixedWindowLimiter::new(Duration::from_secs(60), 1, "demasiadas");

        assert!(limiter.check(ip(1)));
        assert!(!limiter.check(ip(1)));
        assert!(limiter.check(ip(2)));
    }

    #[test]
    fn window_resets_after_elapsing() {
        let limiter = FixedWindowLimiter::new(Duration::from_millis(20), 1, "demasiadas");
        let client = ip(1);

        assert!(limiter.check(client));
        assert!(!limiter.check(client));

        std::thread::sleep(Duration::from_millis(30));
        assert!(limiter.check(client));
    }
}
