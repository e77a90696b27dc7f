// src/fetch/retry.rs
use std::{thread::sleep, time::Duration};
use tracing::{debug, error, warn};

use crate::error::{Result, ScrapeError};

/// One HTTP response, reduced to what the pipeline looks at.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fetched {
    pub status: u16,
    pub body: String,
}

impl Fetched {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

#[derive(Debug, Clone)]
pub struct RetryPolicy {
    pub max_attempts: u32,
    pub initial_backoff: Duration,
    /// Return the last non-success response instead of failing once attempts run out.
    pub allow_failed_status: bool,
}

impl RetryPolicy {
    fn backoff(&self, attempt: u32) -> Duration {
        self.initial_backoff * 2u32.saturating_pow(attempt.saturating_sub(1))
    }
}

/// Call `attempt` until it returns a 2xx response or `policy.max_attempts` is reached.
///
/// Non-success statuses and transport errors are both retried. When the final
/// attempt is a transport error that error is returned as-is. When it is a
/// non-success status the outcome depends on `allow_failed_status`.
pub fn get_with_retry<F>(url: &str, policy: &RetryPolicy, mut attempt: F) -> Result<Fetched>
where
    F: FnMut(u32) -> Result<Fetched>,
{
    let max = policy.max_attempts.max(1);
    let mut last: Option<Fetched> = None;

    for n in 1..=max {
        match attempt(n) {
            Ok(resp) if resp.is_success() => {
                debug!(%url, attempt = n, status = resp.status, "fetched");
                return Ok(resp);
            }
            Ok(resp) => {
                warn!(%url, attempt = n, status = resp.status, "non-success status");
                last = Some(resp);
            }
            Err(e) if n < max => {
                warn!(%url, attempt = n, error = %e, "request failed");
                last = None;
            }
            Err(e) => {
                error!(%url, attempt = n, error = %e, "request failed, no attempts left");
                return Err(e);
            }
        }

        if n < max {
            let delay = policy.backoff(n);
            debug!(%url, delay_ms = delay.as_millis() as u64, "retrying");
            sleep(delay);
        }
    }

    // the loop only falls through when the final attempt returned a response
    match last {
        Some(resp) if policy.allow_failed_status => {
            warn!(%url, status = resp.status, "attempts exhausted, continuing with last response");
            Ok(resp)
        }
        Some(resp) => Err(ScrapeError::RetriesExhausted {
            url: url.to_string(),
            attempts: max,
            last_status: resp.status.to_string(),
        }),
        None => Err(ScrapeError::RetriesExhausted {
            url: url.to_string(),
            attempts: max,
            last_status: "none".to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn policy(max_attempts: u32, allow_failed_status: bool) -> RetryPolicy {
        RetryPolicy {
            max_attempts,
            initial_backoff: Duration::ZERO,
            allow_failed_status,
        }
    }

    fn resp(status: u16) -> Fetched {
        Fetched {
            status,
            body: format!("<p>{}</p>", status),
        }
    }

    #[test]
    fn stops_at_first_success() {
        let mut calls = 0;
        let got = get_with_retry("https://example.com", &policy(3, false), |n| {
            calls += 1;
            Ok(if n == 2 { resp(200) } else { resp(503) })
        })
        .unwrap();
        assert_eq!(got.status, 200);
        assert_eq!(calls, 2);
    }

    #[test]
    fn exhaustion_is_fatal_by_default() {
        let mut calls = 0;
        let err = get_with_retry("https://example.com", &policy(3, false), |_| {
            calls += 1;
            Ok(resp(502))
        })
        .unwrap_err();
        assert_eq!(calls, 3);
        match err {
            ScrapeError::RetriesExhausted {
                attempts,
                last_status,
                ..
            } => {
                assert_eq!(attempts, 3);
                assert_eq!(last_status, "502");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn exhaustion_can_fall_through_to_last_response() {
        let got = get_with_retry("https://example.com", &policy(3, true), |n| {
            Ok(resp(500 + n as u16))
        })
        .unwrap();
        assert_eq!(got.status, 503);
    }

    #[test]
    fn transport_error_on_last_attempt_is_returned() {
        let err = get_with_retry("https://example.com", &policy(2, true), |n| {
            if n == 1 {
                Ok(resp(500))
            } else {
                Err(ScrapeError::Config("connection refused".into()))
            }
        })
        .unwrap_err();
        assert!(matches!(err, ScrapeError::Config(_)));
    }

    #[test]
    fn transport_error_then_success_recovers() {
        let got = get_with_retry("https://example.com", &policy(3, false), |n| {
            if n == 1 {
                Err(ScrapeError::Config("timed out".into()))
            } else {
                Ok(resp(200))
            }
        })
        .unwrap();
        assert_eq!(got.status, 200);
    }

    #[test]
    fn backoff_doubles() {
        let p = RetryPolicy {
            max_attempts: 4,
            initial_backoff: Duration::from_millis(100),
            allow_failed_status: false,
        };
        assert_eq!(p.backoff(1), Duration::from_millis(100));
        assert_eq!(p.backoff(2), Duration::from_millis(200));
        assert_eq!(p.backoff(3), Duration::from_millis(400));
    }
}
