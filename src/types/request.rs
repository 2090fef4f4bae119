//! Operation plans and results for the transaction pipeline

use alloy::primitives::{Address, TxHash, U256};

/// Pool flavor deployed by the factory
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[repr(u8)]
pub enum PoolKind {
    /// Bonding curve pool - price moves with reserves until graduation
    #[default]
    Curve = 0,
    /// Fixed-price presale pool - contribute until goal/deadline, then claim or refund
    FixedPrice = 1,
}

impl From<PoolKind> for u8 {
    fn from(kind: PoolKind) -> u8 {
        kind as u8
    }
}

/// Coarse operation grouping; one active transaction is tracked per family
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OperationFamily {
    /// Fixed-price pool contributions
    Contribute,
    /// Curve buys and sells
    Trade,
    /// Claims, refunds, creator rewards, DEX fees
    Claim,
    /// Token/pool creation
    Launch,
}

/// A single pipeline operation, immutable once built
///
/// Amounts are 18-decimal base units. The exact-out variants optionally carry
/// a caller-chosen bound that overrides the computed 1% slippage bound.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OperationPlan {
    /// Contribute base asset to a fixed-price presale pool
    Contribute { pool: Address, amount: U256 },
    /// Spend an exact base-asset amount on a curve pool
    Buy { pool: Address, amount_in: U256 },
    /// Receive an exact token amount from a curve pool
    BuyExactOut {
        pool: Address,
        amount_out: U256,
        max_in: Option<U256>,
    },
    /// Sell an exact token amount to a curve pool
    Sell { pool: Address, amount_in: U256 },
    /// Receive an exact base-asset amount from a curve pool
    SellExactOut {
        pool: Address,
        amount_out: U256,
        max_in: Option<U256>,
    },
    /// Claim tokens from a finalized presale pool
    Claim { pool: Address },
    /// Recover a contribution from a failed presale pool
    Refund { pool: Address },
    /// Claim the creator reward from a graduated curve pool
    ClaimCreatorReward { pool: Address },
    /// Claim accrued DEX fees from a graduated curve pool
    ClaimDexFees { pool: Address },
}

impl OperationPlan {
    /// Target pool address
    pub fn pool(&self) -> Address {
        match self {
            Self::Contribute { pool, .. }
            | Self::Buy { pool, .. }
            | Self::BuyExactOut { pool, .. }
            | Self::Sell { pool, .. }
            | Self::SellExactOut { pool, .. }
            | Self::Claim { pool }
            | Self::Refund { pool }
            | Self::ClaimCreatorReward { pool }
            | Self::ClaimDexFees { pool } => *pool,
        }
    }

    /// The family this operation's status and active hash are tracked under
    pub fn family(&self) -> OperationFamily {
        match self {
            Self::Contribute { .. } => OperationFamily::Contribute,
            Self::Buy { .. }
            | Self::BuyExactOut { .. }
            | Self::Sell { .. }
            | Self::SellExactOut { .. } => OperationFamily::Trade,
            Self::Claim { .. }
            | Self::Refund { .. }
            | Self::ClaimCreatorReward { .. }
            | Self::ClaimDexFees { .. } => OperationFamily::Claim,
        }
    }

    /// The user-entered amount, where the operation has one
    pub fn primary_amount(&self) -> Option<U256> {
        match self {
            Self::Contribute { amount, .. } => Some(*amount),
            Self::Buy { amount_in, .. } | Self::Sell { amount_in, .. } => Some(*amount_in),
            Self::BuyExactOut { amount_out, .. } | Self::SellExactOut { amount_out, .. } => {
                Some(*amount_out)
            }
            _ => None,
        }
    }

    /// Caller-supplied slippage bound override, if any
    pub fn explicit_bound(&self) -> Option<U256> {
        match self {
            Self::BuyExactOut { max_in, .. } | Self::SellExactOut { max_in, .. } => *max_in,
            _ => None,
        }
    }
}

/// Parameters for creating a new launch
#[derive(Debug, Clone)]
pub struct LaunchParams {
    /// Token name
    pub name: String,
    /// Token symbol
    pub symbol: String,
    /// Pool flavor
    pub kind: PoolKind,
    /// Funding goal in base units (presale pools only)
    pub goal: U256,
}

impl LaunchParams {
    /// Create a bonding curve launch
    pub fn curve(name: impl Into<String>, symbol: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            symbol: symbol.into(),
            kind: PoolKind::Curve,
            goal: U256::ZERO,
        }
    }

    /// Create a fixed-price presale launch with a funding goal
    pub fn presale(name: impl Into<String>, symbol: impl Into<String>, goal: U256) -> Self {
        Self {
            name: name.into(),
            symbol: symbol.into(),
            kind: PoolKind::FixedPrice,
            goal,
        }
    }
}

/// Decoded domain event recovered from a confirmed receipt
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EventPayload {
    /// Presale contribution landed
    Contributed { contributor: Address, amount: U256 },
    /// Curve buy executed
    Purchased {
        buyer: Address,
        amount_in: U256,
        amount_out: U256,
    },
    /// Curve sell executed
    Sold {
        seller: Address,
        amount_in: U256,
        amount_out: U256,
    },
    /// Presale tokens claimed
    Claimed {
        contributor: Address,
        token_amount: U256,
    },
    /// Presale contribution refunded
    Refunded { contributor: Address, amount: U256 },
    /// Creator reward claimed
    CreatorRewardClaimed { creator: Address, amount: U256 },
    /// DEX fees claimed
    DexFeesClaimed { creator: Address, amount: U256 },
    /// Token and pool deployed
    LaunchCreated {
        token: Address,
        pool: Address,
        creator: Address,
    },
}

/// Outcome of a confirmed pipeline operation
#[derive(Debug, Clone)]
pub struct TransactionResult {
    /// Transaction hash
    pub hash: TxHash,
    /// Block the transaction confirmed in
    pub block_number: u64,
    /// Decoded domain event
    pub payload: EventPayload,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_family_mapping() {
        let pool = Address::ZERO;
        let amount = U256::from(1u64);

        assert_eq!(
            OperationPlan::Contribute { pool, amount }.family(),
            OperationFamily::Contribute
        );
        assert_eq!(
            OperationPlan::Buy {
                pool,
                amount_in: amount
            }
            .family(),
            OperationFamily::Trade
        );
        assert_eq!(
            OperationPlan::Refund { pool }.family(),
            OperationFamily::Claim
        );
        assert_eq!(
            OperationPlan::ClaimDexFees { pool }.family(),
            OperationFamily::Claim
        );
    }

    #[test]
    fn test_explicit_bound_only_on_exact_out() {
        let pool = Address::ZERO;
        let plan = OperationPlan::BuyExactOut {
            pool,
            amount_out: U256::from(10u64),
            max_in: Some(U256::from(12u64)),
        };
        assert_eq!(plan.explicit_bound(), Some(U256::from(12u64)));

        let plan = OperationPlan::Buy {
            pool,
            amount_in: U256::from(10u64),
        };
        assert_eq!(plan.explicit_bound(), None);
    }
}
