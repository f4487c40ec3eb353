//! Per-author cooldown rate limiter.

use parking_lot::Mutex;
use std::collections::HashMap;
use std::time::{Duration, Instant};

use super::traits::RateLimiter;
use crate::router::Ctx;

/// Rejects an author's invocations until `cooldown` has passed since their
/// last accepted one.
pub struct CooldownRateLimiter {
    cooldown: Duration,
    last_accepted: Mutex<HashMap<String, Instant>>,
}

impl CooldownRateLimiter {
    pub fn new(cooldown: Duration) -> Self {
        Self {
            cooldown,
            last_accepted: Mutex::new(HashMap::new()),
        }
    }

    pub fn cooldown(&self) -> Duration {
        self.cooldown
    }

    /// Record an attempt by `key` at `now`.
    fn check(&self, key: &str, now: Instant) -> bool {
        let mut last_accepted = self.last_accepted.lock();
        // Expired entries carry no information any more.
        last_accepted.retain(|_, at| now.duration_since(*at) < self.cooldown);
        if last_accepted.contains_key(key) {
            return false;
        }
        last_accepted.insert(key.to_string(), now);
        true
    }
}

impl RateLimiter for CooldownRateLimiter {
    fn notify_execution(&self, ctx: &Ctx) -> bool {
        let author = &ctx.author().id;
        let accepted = self.check(author, Instant::now());
        if !accepted {
            tracing::debug!(%author, cooldown = ?self.cooldown, "cooldown active");
        }
        accepted
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn second_attempt_within_cooldown_is_rejected() {
        let limiter = CooldownRateLimiter::new(Duration::from_secs(60));
        let now = Instant::now();
        assert!(limiter.check("alice", now));
        assert!(!limiter.check("alice", now + Duration::from_secs(1)));
    }

    #[test]
    fn authors_are_tracked_independently() {
        let limiter = CooldownRateLimiter::new(Duration::from_secs(60));
        let now = Instant::now();
        assert!(limiter.check("alice", now));
        assert!(limiter.check("bob", now));
    }

    #[test]
    fn attempt_after_cooldown_is_accepted() {
        let limiter = CooldownRateLimiter::new(Duration::from_secs(5));
        let now = Instant::now();
        assert!(limiter.check("alice", now));
        assert!(limiter.check("alice", now + Duration::from_secs(5)));
    }

    #[test]
    fn zero_cooldown_never_rejects() {
        let limiter = CooldownRateLimiter::new(Duration::ZERO);
        let now = Instant::now();
        assert!(limiter.check("alice", now));
        assert!(limiter.check("alice", now));
    }
}
