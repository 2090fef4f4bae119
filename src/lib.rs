//! Launchpad SDK for Rust
//!
//! A Rust SDK for interacting with token launchpad pools: bonding curve
//! pools and fixed-price presale pools, plus the factory that deploys them.
//!
//! # Features
//!
//! - Contribute to fixed-price presale pools (approve, verify, contribute)
//! - Buy/sell on bonding curves with 1% slippage-bounded quotes
//! - Claim, refund, and creator reward/DEX fee operations
//! - Optimistic participant ledger reconciled against the subgraph
//! - Classified errors with user-facing guidance
//!
//! # Example
//!
//! ```rust,ignore
//! use launchpad_sdk::{LaunchpadClient, LocalSigner, NetworkConfig};
//! use launchpad_sdk::constants::scale_amount;
//!
//! #[tokio::main]
//! async fn main() -> eyre::Result<()> {
//!     dotenvy::dotenv().ok();
//!     let config = NetworkConfig::from_env()?;
//!     let signer = LocalSigner::from_private_key("0x...", &config.rpc_url).await?;
//!     let client = LaunchpadClient::new(signer, config).await?;
//!
//!     // Contribute 100 base-asset units to a presale pool
//!     let pool = "0x...".parse()?;
//!     let result = client.contribute(pool, scale_amount(100.0)).await?;
//!     println!("confirmed in block {}", result.block_number);
//!
//!     Ok(())
//! }
//! ```

pub mod allowance;
pub mod backend;
pub mod client;
pub mod config;
pub mod constants;
pub mod contracts;
pub mod error;
pub mod events;
pub mod executor;
pub mod ledger;
pub mod quote;
pub mod session;
pub mod signer;
pub mod status;
pub mod subgraph;
pub mod types;
pub mod validate;

// Re-export main types for convenience
pub use backend::{BackendClient, LaunchRegistration};
pub use client::LaunchpadClient;
pub use config::NetworkConfig;
pub use error::{Context, LaunchpadError, Report};
pub use executor::Executor;
pub use ledger::{OptimisticEntry, OptimisticLedger, SweeperHandle};
pub use quote::{Quote, TradeDirection, TradeMode};
pub use session::Session;
pub use signer::{LocalSigner, TransactionSigner, TxRequest};
pub use status::{OperationStatus, StatusBoard};
pub use subgraph::{Participation, ReconcilerHandle, SubgraphClient};
pub use types::{
    AuthoritativeParticipant, CurveSnapshot, EventPayload, LaunchParams, MergedHistory,
    OperationFamily, OperationPlan, ParticipantView, PoolKind, PoolSnapshot, PresaleSnapshot,
    TransactionResult,
};
