//! Outbound calls to the users service, gated by the circuit breaker.
//!
//! Every failure mode of the existence check is folded into the tri-state
//! [`UserCheck`] so callers never see a transport error: "the user is absent"
//! (a correct negative answer) stays distinct from "the service is down",
//! and only the latter counts against the breaker.

use std::fmt;
use std::sync::Arc;

use reqwest::StatusCode;

use crate::config::UsersConfig;
use crate::error::Result;
use crate::resilience::{CircuitBreaker, CircuitState};

/// Breaker instance name for the one dependency this service calls.
const USERS_DEPENDENCY: &str = "users-service";

/// Why a user check could not be completed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// The breaker denied the call before any network activity.
    CircuitOpen,
    /// The call was attempted and the service failed to answer.
    UsersDown,
}

impl SkipReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::CircuitOpen => "skipped_circuit_open",
            Self::UsersDown => "skipped_users_down",
        }
    }
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outcome of "does user X exist?".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UserCheck {
    Exists,
    NotFound,
    Unknown(SkipReason),
}

#[derive(Clone)]
pub struct UsersGateway {
    client: reqwest::Client,
    base_url: String,
    breaker: Arc<CircuitBreaker>,
}

impl UsersGateway {
    pub fn new(config: &UsersConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(config.check_timeout())
            .build()?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            breaker: Arc::new(CircuitBreaker::new(
                USERS_DEPENDENCY,
                config.failure_threshold,
                config.reset_timeout(),
            )),
        })
    }

    /// Read-only breaker state, for the health endpoint and logs.
    pub fn circuit_state(&self) -> CircuitState {
        self.breaker.state()
    }

    /// Check whether a user exists upstream.
    ///
    /// Breaker denial short-circuits without touching the network and is not
    /// a failure. A 404 answer calls `record_success` on the breaker: the
    /// dependency itself answered correctly.
    pub async fn check_user_exists(&self, user_id: i64) -> UserCheck {
        if !self.breaker.allow() {
            tracing::warn!(user_id, "user check skipped, circuit open");
            return UserCheck::Unknown(SkipReason::CircuitOpen);
        }

        let url = format!("{}/api/users/{}", self.base_url, user_id);
        match self.client.get(&url).send().await {
            Ok(response) if response.status() == StatusCode::NOT_FOUND => {
                self.breaker.record_success();
                UserCheck::NotFound
            }
            Ok(response) if response.status().is_success() => {
                self.breaker.record_success();
                UserCheck::Exists
            }
            Ok(response) => {
                self.breaker.record_failure();
                tracing::warn!(
                    user_id,
                    status = %response.status(),
                    "users service answered with unexpected status"
                );
                UserCheck::Unknown(SkipReason::UsersDown)
            }
            Err(e) => {
                self.breaker.record_failure();
                tracing::warn!(user_id, error = %e, "users service unreachable");
                UserCheck::Unknown(SkipReason::UsersDown)
            }
        }
    }

    /// Plain pass-through to the users service `/greet` endpoint.
    ///
    /// Not breaker-gated: a failure here is surfaced to the caller instead of
    /// being absorbed into a degraded booking status.
    pub async fn greet(&self, name: &str) -> Result<serde_json::Value> {
        let url = format!("{}/greet", self.base_url);
        let response = self
            .client
            .get(&url)
            .query(&[("name", name)])
            .send()
            .await?
            .error_for_status()?;

        Ok(response.json().await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn skip_reasons_keep_their_wire_spelling() {
        assert_eq!(SkipReason::CircuitOpen.as_str(), "skipped_circuit_open");
        assert_eq!(SkipReason::UsersDown.as_str(), "skipped_users_down");
        assert_eq!(SkipReason::UsersDown.to_string(), "skipped_users_down");
    }
}
