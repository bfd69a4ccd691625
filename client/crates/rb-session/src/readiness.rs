//! Readiness polling before sign-in.
//!
//! The service may be cold-starting, so the loop never gives up on its own.
//! Only cancellation ends it early.

use crate::{AuthService, SessionError, SessionResult};

use rb_config::ReadinessConfig;

use std::time::Duration;

use log::{debug, info};
use tokio_util::sync::CancellationToken;

const DEFAULT_PROBE_TIMEOUT: Duration = Duration::from_secs(3);
const DEFAULT_INTERVAL: Duration = Duration::from_secs(5);

/// Timing for the readiness loop.
///
/// With `backoff_multiplier` at 1.0 every retry waits exactly `interval`.
/// Larger multipliers grow the delay geometrically up to `max_interval`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ReadinessPolicy {
    pub probe_timeout: Duration,
    pub interval: Duration,
    pub backoff_multiplier: f64,
    pub max_interval: Duration,
}

impl Default for ReadinessPolicy {
    fn default() -> Self {
        Self {
            probe_timeout: DEFAULT_PROBE_TIMEOUT,
            interval: DEFAULT_INTERVAL,
            backoff_multiplier: 1.0,
            max_interval: DEFAULT_INTERVAL,
        }
    }
}

impl From<&ReadinessConfig> for ReadinessPolicy {
    fn from(config: &ReadinessConfig) -> Self {
        Self {
            probe_timeout: config.probe_timeout(),
            interval: config.interval(),
            backoff_multiplier: config.backoff_multiplier,
            max_interval: config.max_interval(),
        }
    }
}

impl ReadinessPolicy {
    /// Fixed-interval policy.
    pub fn fixed(probe_timeout: Duration, interval: Duration) -> Self {
        Self {
            probe_timeout,
            interval,
            backoff_multiplier: 1.0,
            max_interval: interval,
        }
    }

    /// Delay to use after `current`; never below `interval`.
    pub fn next_delay(&self, current: Duration) -> Duration {
        if !self.backoff_multiplier.is_finite() || self.backoff_multiplier <= 1.0 {
            return self.interval;
        }

        let cap = self.max_interval.max(self.interval);
        Duration::try_from_secs_f64(current.as_secs_f64() * self.backoff_multiplier)
            .unwrap_or(cap)
            .clamp(self.interval, cap)
    }
}

/// Probe until the service answers.
///
/// `on_retry` runs after every failed probe with the number of failures so
/// far, before the loop sleeps. Returns that same count once a probe
/// succeeds.
pub async fn wait_until_ready<S, F>(
    service: &S,
    policy: &ReadinessPolicy,
    cancel: &CancellationToken,
    mut on_retry: F,
) -> SessionResult<u32>
where
    S: AuthService + ?Sized,
    F: FnMut(u32),
{
    let mut failures: u32 = 0;
    let mut delay = policy.interval;

    loop {
        let probe = tokio::select! {
            biased;
            _ = cancel.cancelled() => return Err(SessionError::cancelled()),
            result = tokio::time::timeout(policy.probe_timeout, service.ping(policy.probe_timeout)) => result,
        };

        match probe {
            Ok(Ok(())) => {
                if failures > 0 {
                    info!("Service ready after {failures} failed probe(s)");
                }
                return Ok(failures);
            }
            Ok(Err(e)) => debug!("Readiness probe failed: {e}"),
            Err(_) => debug!("Readiness probe timed out after {:?}", policy.probe_timeout),
        }

        failures = failures.saturating_add(1);
        on_retry(failures);
        debug!("Retrying readiness probe in {delay:?}");

        tokio::select! {
            biased;
            _ = cancel.cancelled() => return Err(SessionError::cancelled()),
            _ = tokio::time::sleep(delay) => {}
        }

        delay = policy.next_delay(delay);
    }
}
