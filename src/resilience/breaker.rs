//! Circuit breaker guarding an outbound dependency.
//!
//! State transitions:
//! ```text
//! Closed   -> Open     (failure_count reaches threshold)
//! Open     -> HalfOpen (reset timeout elapsed; next `allow` admits one trial)
//! HalfOpen -> Closed   (trial succeeds, failure count resets)
//! HalfOpen -> Open     (trial fails, cooldown restarts)
//! ```
//!
//! One instance guards one named dependency. All state lives behind a mutex;
//! callers only get `allow` / `record_success` / `record_failure` plus a
//! read-only `state` snapshot.

use std::fmt;
use std::sync::{Mutex, MutexGuard};
use std::time::{Duration, Instant};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CircuitState {
    /// Normal operation, calls allowed.
    Closed,
    /// Dependency assumed down, calls fail fast.
    Open,
    /// One trial call is out, probing for recovery.
    HalfOpen,
}

impl fmt::Display for CircuitState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Closed => write!(f, "closed"),
            Self::Open => write!(f, "open"),
            Self::HalfOpen => write!(f, "half_open"),
        }
    }
}

#[derive(Debug)]
struct BreakerInner {
    state: CircuitState,
    failure_count: u32,
    /// Meaningful only while `state` is `Open`.
    opened_at: Instant,
    /// Meaningful only while `state` is `HalfOpen`.
    half_open_at: Instant,
}

#[derive(Debug)]
pub struct CircuitBreaker {
    name: String,
    failure_threshold: u32,
    reset_timeout: Duration,
    inner: Mutex<BreakerInner>,
}

impl CircuitBreaker {
    pub fn new(name: impl Into<String>, failure_threshold: u32, reset_timeout: Duration) -> Self {
        Self {
            name: name.into(),
            failure_threshold,
            reset_timeout,
            inner: Mutex::new(BreakerInner {
                state: CircuitState::Closed,
                failure_count: 0,
                opened_at: Instant::now(),
                half_open_at: Instant::now(),
            }),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Whether the next call to the dependency may proceed.
    ///
    /// In `Open`, this flips to `HalfOpen` once the reset timeout has elapsed
    /// and the flipping call itself is the single admitted trial; concurrent
    /// callers keep being denied until the trial reports. A trial whose
    /// outcome never arrives (caller dropped mid-flight) is re-armed after
    /// another full reset timeout so a lost probe cannot wedge the breaker.
    pub fn allow(&self) -> bool {
        let mut inner = self.lock();
        match inner.state {
            CircuitState::Closed => true,
            CircuitState::Open => {
                if inner.opened_at.elapsed() >= self.reset_timeout {
                    inner.state = CircuitState::HalfOpen;
                    inner.half_open_at = Instant::now();
                    tracing::info!(
                        dependency = %self.name,
                        "circuit half-open, admitting trial call"
                    );
                    true
                } else {
                    false
                }
            }
            CircuitState::HalfOpen => {
                if inner.half_open_at.elapsed() >= self.reset_timeout {
                    inner.half_open_at = Instant::now();
                    tracing::warn!(
                        dependency = %self.name,
                        "trial call never reported, admitting a new one"
                    );
                    true
                } else {
                    false
                }
            }
        }
    }

    /// Record that a call answered correctly (including a negative answer).
    pub fn record_success(&self) {
        let mut inner = self.lock();
        match inner.state {
            CircuitState::Closed => {
                inner.failure_count = 0;
            }
            CircuitState::HalfOpen => {
                inner.state = CircuitState::Closed;
                inner.failure_count = 0;
                tracing::info!(dependency = %self.name, "circuit closed after successful trial");
            }
            // Late result from a call admitted before the circuit opened;
            // must not disturb the cooldown clock.
            CircuitState::Open => {}
        }
    }

    /// Record a dependency failure (timeout, connect error, unexpected status).
    pub fn record_failure(&self) {
        let mut inner = self.lock();
        match inner.state {
            CircuitState::Closed => {
                inner.failure_count += 1;
                if inner.failure_count >= self.failure_threshold {
                    inner.state = CircuitState::Open;
                    inner.opened_at = Instant::now();
                    tracing::warn!(
                        dependency = %self.name,
                        failures = inner.failure_count,
                        "failure threshold reached, circuit opened"
                    );
                }
            }
            CircuitState::HalfOpen => {
                inner.state = CircuitState::Open;
                inner.opened_at = Instant::now();
                tracing::warn!(dependency = %self.name, "trial call failed, circuit reopened");
            }
            CircuitState::Open => {}
        }
    }

    pub fn state(&self) -> CircuitState {
        self.lock().state
    }

    fn lock(&self) -> MutexGuard<'_, BreakerInner> {
        // A poisoned lock only means a panic elsewhere while holding it;
        // the state itself is still a consistent machine.
        self.inner.lock().unwrap_or_else(|e| e.into_inner())
    }
}
