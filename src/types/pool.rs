//! Pool state snapshots used by the validation gate

use alloy::primitives::{Address, U256};

/// Point-in-time state of a bonding curve pool
#[derive(Debug, Clone)]
pub struct CurveSnapshot {
    /// Whether the pool has graduated
    pub graduated: bool,
    /// Tokens still available on the curve
    pub remaining_supply: U256,
    /// Launched token address
    pub token: Address,
    /// Pool creator
    pub creator: Address,
    /// Caller's base-asset balance
    pub base_balance: U256,
    /// Caller's launched-token balance
    pub token_balance: U256,
}

/// Point-in-time state of a fixed-price presale pool
#[derive(Debug, Clone)]
pub struct PresaleSnapshot {
    /// Whether the raise has been finalized
    pub finalized: bool,
    /// Whether the funding goal was reached
    pub goal_reached: bool,
    /// Whether refunds are open
    pub refunds_enabled: bool,
    /// Caller's recorded contribution
    pub contribution: U256,
    /// Whether the caller has already claimed
    pub has_claimed: bool,
    /// Whether the caller has already been refunded
    pub has_refunded: bool,
    /// Caller's base-asset balance
    pub base_balance: U256,
}

/// Snapshot of whichever pool flavor the operation targets
#[derive(Debug, Clone)]
pub enum PoolSnapshot {
    Curve(CurveSnapshot),
    Presale(PresaleSnapshot),
}
