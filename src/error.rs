//! Classified error taxonomy for the launchpad SDK
//!
//! Low-level plumbing (signer, provider calls, HTTP) reports failures as
//! `eyre::Report` with context. At the pipeline boundary every raw failure is
//! mapped into the closed [`LaunchpadError`] taxonomy so callers get one
//! stable set of kinds with user-facing guidance attached.

use alloy::primitives::{Address, TxHash, U256};
use thiserror::Error;

pub use eyre::{eyre, Context, Report};

/// Classified failure for any pipeline operation
#[derive(Debug, Clone, Error)]
pub enum LaunchpadError {
    /// No wallet is connected to the session
    #[error("wallet not connected")]
    WalletNotConnected,

    /// Wallet is on a different chain than the configured one
    #[error("wrong network: wallet is on chain {actual}, expected {expected}")]
    WrongNetwork { expected: u64, actual: u64 },

    /// The chain id is not in the supported set
    #[error("unsupported chain id {0}")]
    UnsupportedChain(u64),

    /// No configuration exists for the chain id
    #[error("no configuration for chain id {0}")]
    ChainNotConfigured(u64),

    /// Request amount is zero or otherwise unusable
    #[error("amount must be greater than zero")]
    InvalidAmount,

    /// Token balance too low for the planned spend
    #[error("insufficient balance: have {balance}, need {required}")]
    InsufficientFunds { balance: U256, required: U256 },

    /// Native token balance too low to cover gas
    #[error("insufficient native token for gas")]
    InsufficientNativeToken,

    /// The wallet prompt was declined
    #[error("transaction rejected in wallet")]
    UserRejected,

    /// Caller does not hold the required role
    #[error("unauthorized: {0}")]
    Unauthorized(String),

    /// On-chain precondition failed (graduated pool, slippage exceeded, zero inventory)
    #[error("contract rejected the operation: {0}")]
    ContractRevert(String),

    /// Pool reports no launched token at the expected address
    #[error("token not found for pool {0}")]
    TokenNotFound(Address),

    /// Signing failed before submission
    #[error("signing failed: {0}")]
    SignatureFailed(String),

    /// Transport or node failure
    #[error("rpc error: {0}")]
    Rpc(String),

    /// The transaction was mined but reverted; gas was spent
    #[error("transaction {hash} reverted on-chain")]
    Reverted { hash: TxHash },

    /// No receipt within the confirmation window; outcome unknown
    #[error("timed out waiting for receipt of {hash}")]
    Timeout { hash: TxHash },

    /// Allowance re-read at the approval's block came back short
    #[error("allowance verification failed: granted {granted}, required {required}")]
    StaleAllowance { granted: U256, required: U256 },

    /// The confirmed receipt does not carry the expected event
    #[error("expected event `{0}` not found in receipt logs")]
    EventNotFound(&'static str),

    /// Backend persistence failed after the chain-side effect succeeded
    #[error("backend registration failed after {attempts} attempts: {detail}")]
    Backend { attempts: u32, detail: String },
}

impl LaunchpadError {
    /// Map a raw wallet/RPC/contract failure into the taxonomy
    ///
    /// Wallet and node errors arrive as heterogeneous message strings; this
    /// matches the substrings the common providers emit. Anything
    /// unrecognized lands in [`LaunchpadError::Rpc`].
    pub fn classify(report: &Report) -> Self {
        let message = format!("{report:#}");
        let lower = message.to_lowercase();

        if lower.contains("user rejected")
            || lower.contains("user denied")
            || lower.contains("rejected by user")
            || lower.contains("request rejected")
        {
            Self::UserRejected
        } else if lower.contains("insufficient funds for gas")
            || lower.contains("insufficient funds for intrinsic")
            || lower.contains("gas required exceeds allowance")
        {
            Self::InsufficientNativeToken
        } else if lower.contains("transfer amount exceeds balance")
            || lower.contains("insufficient balance")
        {
            Self::InsufficientFunds {
                balance: U256::ZERO,
                required: U256::ZERO,
            }
        } else if lower.contains("caller is not") || lower.contains("unauthorized") {
            Self::Unauthorized(message)
        } else if lower.contains("chain id mismatch") || lower.contains("wrong chain") {
            Self::WrongNetwork {
                expected: 0,
                actual: 0,
            }
        } else if lower.contains("execution reverted") || lower.contains("revert") {
            Self::ContractRevert(message)
        } else if lower.contains("signature") || lower.contains("signing") {
            Self::SignatureFailed(message)
        } else {
            Self::Rpc(message)
        }
    }

    /// True when the failure indicates the user declined the wallet prompt
    pub fn is_user_rejection(&self) -> bool {
        matches!(self, Self::UserRejected)
    }

    /// True when the failure happened after submission, so gas may be spent
    ///
    /// Pre-signature failures (validation, classification of a submit error)
    /// cost the user nothing; these must be labeled differently in the UI.
    pub fn gas_may_be_spent(&self) -> bool {
        matches!(
            self,
            Self::Reverted { .. }
                | Self::Timeout { .. }
                | Self::StaleAllowance { .. }
                | Self::EventNotFound(_)
                | Self::Backend { .. }
        )
    }

    /// Short user-facing guidance for this failure kind
    pub fn user_message(&self) -> &'static str {
        match self {
            Self::WalletNotConnected => "Connect a wallet to continue.",
            Self::WrongNetwork { .. } => "Switch your wallet to the supported network.",
            Self::UnsupportedChain(_) | Self::ChainNotConfigured(_) => {
                "This network is not supported."
            }
            Self::InvalidAmount => "Enter an amount greater than zero.",
            Self::InsufficientFunds { .. } => "Your balance is too low for this amount.",
            Self::InsufficientNativeToken => "Not enough native token to cover gas.",
            Self::UserRejected => "Transaction cancelled.",
            Self::Unauthorized(_) => "This action is restricted to the pool creator.",
            Self::ContractRevert(_) => {
                "The pool rejected this operation. It may have graduated or the price moved."
            }
            Self::TokenNotFound(_) => "Token not found for this pool.",
            Self::SignatureFailed(_) => "Signing failed. Try again.",
            Self::Rpc(_) => "Network error. Check your connection and try again.",
            Self::Reverted { .. } => {
                "The transaction was mined but reverted. Gas was spent; funds did not move."
            }
            Self::Timeout { .. } => {
                "Confirmation is taking longer than expected. Do not resubmit until it settles."
            }
            Self::StaleAllowance { .. } => "Approval did not take effect. Start over.",
            Self::EventNotFound(_) => "The transaction confirmed but its outcome could not be read.",
            Self::Backend { .. } => "On-chain action succeeded but saving metadata failed.",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_user_rejection() {
        let report = eyre!("MetaMask Tx Signature: User denied transaction signature.");
        assert!(LaunchpadError::classify(&report).is_user_rejection());

        let report = eyre!("Request rejected");
        assert!(LaunchpadError::classify(&report).is_user_rejection());
    }

    #[test]
    fn test_classify_revert_and_gas() {
        let report = eyre!("server returned an error response: execution reverted: graduated");
        let err = LaunchpadError::classify(&report);
        assert!(matches!(err, LaunchpadError::ContractRevert(_)));
        assert!(!err.gas_may_be_spent());

        let err = LaunchpadError::Reverted {
            hash: TxHash::ZERO,
        };
        assert!(err.gas_may_be_spent());
    }

    #[test]
    fn test_classify_funds() {
        let report = eyre!("insufficient funds for gas * price + value");
        assert!(matches!(
            LaunchpadError::classify(&report),
            LaunchpadError::InsufficientNativeToken
        ));

        let report = eyre!("execution reverted: ERC20: transfer amount exceeds balance");
        assert!(matches!(
            LaunchpadError::classify(&report),
            LaunchpadError::InsufficientFunds { .. }
        ));
    }

    #[test]
    fn test_classify_fallback_is_rpc() {
        let report = eyre!("connection refused");
        assert!(matches!(
            LaunchpadError::classify(&report),
            LaunchpadError::Rpc(_)
        ));
    }

    #[test]
    fn test_post_submission_marking() {
        assert!(LaunchpadError::Timeout { hash: TxHash::ZERO }.gas_may_be_spent());
        assert!(LaunchpadError::EventNotFound("LaunchCreated").gas_may_be_spent());
        assert!(!LaunchpadError::UserRejected.gas_may_be_spent());
        assert!(!LaunchpadError::InvalidAmount.gas_may_be_spent());
    }
}
