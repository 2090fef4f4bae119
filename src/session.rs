//! Explicit session context for pipeline operations
//!
//! Wallet and chain state are passed into each operation instead of read
//! from ambient globals, so the validation gate stays a pure function.

use crate::error::LaunchpadError;
use alloy::primitives::Address;

/// Wallet-side state at the moment an operation is requested
#[derive(Debug, Clone, Copy)]
pub struct Session {
    /// Connected wallet address, if any
    pub wallet: Option<Address>,
    /// Chain the wallet is currently on
    pub chain_id: u64,
}

impl Session {
    /// Create a session
    pub fn new(wallet: Option<Address>, chain_id: u64) -> Self {
        Self { wallet, chain_id }
    }

    /// The connected wallet, or a typed failure
    pub fn wallet(&self) -> Result<Address, LaunchpadError> {
        self.wallet.ok_or(LaunchpadError::WalletNotConnected)
    }
}
