//! Subgraph client for confirmed participation history
//!
//! The indexer is the authoritative read model of on-chain events, but it is
//! eventually consistent; the optimistic ledger reconciles against this feed
//! by transaction hash on a polling interval.

use crate::ledger::OptimisticLedger;
use crate::types::AuthoritativeParticipant;
use alloy::primitives::{Address, TxHash, U256};
use eyre::{Context, Result};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;

/// Confirmed participation record from the subgraph
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Participation {
    pub id: String,
    pub user: String,
    pub amount: String,
    pub tx_hash: String,
    pub timestamp: String,
}

impl Participation {
    /// Amount in 18-decimal base units
    pub fn amount_base_units(&self) -> U256 {
        U256::from_str_radix(&self.amount, 10).unwrap_or(U256::ZERO)
    }

    /// Amount as f64 for display
    pub fn amount_f64(&self) -> f64 {
        crate::constants::unscale_amount(self.amount_base_units())
    }

    /// Confirmation timestamp in unix seconds
    pub fn timestamp_secs(&self) -> u64 {
        self.timestamp.parse().unwrap_or(0)
    }

    /// Contributor wallet
    pub fn wallet(&self) -> Address {
        self.user.parse().unwrap_or(Address::ZERO)
    }

    /// Recorded transaction hash
    pub fn transaction_hash(&self) -> Option<TxHash> {
        self.tx_hash.parse().ok()
    }

    /// Convert to the record shape the ledger merges against
    pub fn to_record(&self) -> AuthoritativeParticipant {
        AuthoritativeParticipant {
            wallet: self.wallet(),
            amount: self.amount_base_units(),
            tx_hash: self.transaction_hash(),
            timestamp: self.timestamp_secs(),
        }
    }
}

#[derive(Serialize)]
struct GraphQLRequest {
    query: String,
    variables: serde_json::Value,
}

#[derive(Deserialize)]
struct GraphQLResponse<T> {
    data: Option<T>,
    errors: Option<Vec<GraphQLError>>,
}

#[derive(Deserialize, Debug)]
struct GraphQLError {
    message: String,
}

#[derive(Deserialize)]
struct ParticipationsData {
    participations: Vec<Participation>,
}

/// Subgraph client for querying participation history
pub struct SubgraphClient {
    url: String,
    client: reqwest::Client,
}

impl SubgraphClient {
    /// Create a new subgraph client
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            client: reqwest::Client::builder()
                .timeout(std::time::Duration::from_secs(30))
                .connect_timeout(std::time::Duration::from_secs(10))
                .use_rustls_tls()
                .build()
                .unwrap(),
        }
    }

    /// Get confirmed participations for a pool, newest first
    pub async fn get_participations(&self, pool: Address) -> Result<Vec<Participation>> {
        let query = r#"
            query participations($pool: Bytes!) {
                participations(
                    where: { pool: $pool }
                    orderBy: timestamp
                    orderDirection: desc
                ) {
                    id
                    user
                    amount
                    txHash
                    timestamp
                }
            }
        "#;

        let request = GraphQLRequest {
            query: query.to_string(),
            variables: serde_json::json!({
                "pool": format!("{pool:#x}")
            }),
        };

        let response = self
            .client
            .post(&self.url)
            .header("Content-Type", "application/json")
            .header("Accept", "application/json")
            .json(&request)
            .send()
            .await
            .context("Failed to query subgraph")?;

        let result: GraphQLResponse<ParticipationsData> = response
            .json()
            .await
            .context("Failed to parse subgraph response")?;

        if let Some(errors) = result.errors {
            let error_msgs: Vec<_> = errors.iter().map(|e| e.message.clone()).collect();
            eyre::bail!("Subgraph errors: {:?}", error_msgs);
        }

        Ok(result.data.map(|d| d.participations).unwrap_or_default())
    }
}

/// Cancel handle for the background reconciliation poll
pub struct ReconcilerHandle {
    task: tokio::task::JoinHandle<()>,
}

impl ReconcilerHandle {
    /// Stop polling
    pub fn cancel(&self) {
        self.task.abort();
    }
}

impl Drop for ReconcilerHandle {
    fn drop(&mut self) {
        self.task.abort();
    }
}

/// Poll the feed on an interval and reconcile the ledger against it
///
/// Fetch failures are logged and retried next tick; the feed being behind is
/// normal and handled by the ledger's hash matching.
pub fn spawn_reconciler(
    client: Arc<SubgraphClient>,
    ledger: Arc<OptimisticLedger>,
    pool: Address,
    interval: Duration,
) -> ReconcilerHandle {
    let task = tokio::spawn(async move {
        let mut ticker = tokio::time::interval(interval);
        ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);
        loop {
            ticker.tick().await;
            match client.get_participations(pool).await {
                Ok(participations) => {
                    let records: Vec<_> = participations.iter().map(|p| p.to_record()).collect();
                    ledger.reconcile(&records);
                }
                Err(e) => {
                    tracing::warn!(%pool, error = %e, "subgraph poll failed");
                }
            }
        }
    });
    ReconcilerHandle { task }
}
