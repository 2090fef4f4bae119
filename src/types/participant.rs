//! Participant records: authoritative history and the merged display list

use alloy::primitives::{Address, TxHash, U256};

/// Confirmed participation record owned by the subgraph indexer
///
/// The SDK only reads and merges these; it never writes them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthoritativeParticipant {
    /// Contributor wallet
    pub wallet: Address,
    /// Contribution amount in base units
    pub amount: U256,
    /// Transaction hash the indexer recorded
    pub tx_hash: Option<TxHash>,
    /// Confirmation timestamp (unix seconds)
    pub timestamp: u64,
}

/// One row of the merged participant list
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParticipantView {
    /// Contributor wallet
    pub wallet: Address,
    /// Contribution amount in base units
    pub amount: U256,
    /// Row timestamp (unix seconds)
    pub timestamp: u64,
    /// Transaction hash when known
    pub tx_hash: Option<TxHash>,
    /// True for optimistic rows not yet confirmed by the indexer
    pub pending: bool,
}

/// Merged participant list with aggregate totals
#[derive(Debug, Clone)]
pub struct MergedHistory {
    /// Rows sorted by timestamp, newest first
    pub participants: Vec<ParticipantView>,
    /// Authoritative total plus currently-active optimistic amounts
    pub total_amount: U256,
    /// Authoritative count plus currently-active optimistic count
    pub count: usize,
}
