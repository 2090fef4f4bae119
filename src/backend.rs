//! Token metadata backend client
//!
//! After a creation transaction confirms, the derived token/pool addresses
//! are registered with the metadata backend. Chain finality and backend
//! persistence are separate failure domains: the chain-side effect already
//! succeeded, so registration retries with bounded exponential backoff
//! instead of failing the operation outright.

use crate::constants::{BACKEND_MAX_ATTEMPTS, BACKEND_RETRY_BASE, BACKEND_RETRY_MAX};
use crate::error::LaunchpadError;
use alloy::primitives::{Address, TxHash};
use eyre::{Context, Result};
use serde::Serialize;
use std::time::Duration;

/// Payload registered with the backend after a confirmed launch
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LaunchRegistration {
    pub token: Address,
    pub pool: Address,
    pub creator: Address,
    pub tx_hash: TxHash,
    pub name: String,
    pub symbol: String,
}

/// Capped doubling backoff for retry delays
#[derive(Debug)]
pub(crate) struct ExponentialBackoff {
    current: Duration,
    max: Duration,
}

impl ExponentialBackoff {
    pub(crate) fn new(base: Duration, max: Duration) -> Self {
        Self { current: base, max }
    }

    /// The delay to sleep before the next attempt
    pub(crate) fn next_delay(&mut self) -> Duration {
        let delay = self.current;
        self.current = (self.current * 2).min(self.max);
        delay
    }
}

/// Metadata backend HTTP client
pub struct BackendClient {
    base_url: String,
    client: reqwest::Client,
}

impl BackendClient {
    /// Create a new backend client
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            client: reqwest::Client::builder()
                .timeout(std::time::Duration::from_secs(15))
                .use_rustls_tls()
                .build()
                .unwrap(),
        }
    }

    /// Register a confirmed launch, retrying transient failures
    pub async fn register_launch(
        &self,
        registration: &LaunchRegistration,
    ) -> Result<(), LaunchpadError> {
        let mut backoff = ExponentialBackoff::new(BACKEND_RETRY_BASE, BACKEND_RETRY_MAX);
        let mut last_error = String::new();

        for attempt in 1..=BACKEND_MAX_ATTEMPTS {
            match self.try_register(registration).await {
                Ok(()) => {
                    tracing::info!(token = %registration.token, attempt, "launch registered");
                    return Ok(());
                }
                Err(e) => {
                    last_error = format!("{e:#}");
                    tracing::warn!(
                        token = %registration.token,
                        attempt,
                        error = %last_error,
                        "launch registration attempt failed"
                    );
                    if attempt < BACKEND_MAX_ATTEMPTS {
                        tokio::time::sleep(backoff.next_delay()).await;
                    }
                }
            }
        }

        Err(LaunchpadError::Backend {
            attempts: BACKEND_MAX_ATTEMPTS,
            detail: last_error,
        })
    }

    async fn try_register(&self, registration: &LaunchRegistration) -> Result<()> {
        let response = self
            .client
            .post(format!("{}/launches", self.base_url))
            .json(registration)
            .send()
            .await
            .context("Failed to reach backend")?;

        let status = response.status();
        if !status.is_success() {
            eyre::bail!("backend returned {}", status);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_backoff_doubles_and_caps() {
        let mut backoff = ExponentialBackoff::new(
            Duration::from_millis(500),
            Duration::from_secs(8),
        );
        assert_eq!(backoff.next_delay(), Duration::from_millis(500));
        assert_eq!(backoff.next_delay(), Duration::from_secs(1));
        assert_eq!(backoff.next_delay(), Duration::from_secs(2));
        assert_eq!(backoff.next_delay(), Duration::from_secs(4));
        assert_eq!(backoff.next_delay(), Duration::from_secs(8));
        // Capped from here on
        assert_eq!(backoff.next_delay(), Duration::from_secs(8));
    }

    #[test]
    fn test_registration_serializes_camel_case() {
        let registration = LaunchRegistration {
            token: Address::repeat_byte(0x01),
            pool: Address::repeat_byte(0x02),
            creator: Address::repeat_byte(0x03),
            tx_hash: TxHash::repeat_byte(0x04),
            name: "Ember".into(),
            symbol: "EMB".into(),
        };
        let json = serde_json::to_value(&registration).unwrap();
        assert!(json.get("txHash").is_some());
        assert!(json.get("tx_hash").is_none());
        assert_eq!(json["symbol"], "EMB");
    }
}
