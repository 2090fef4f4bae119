//! Quote and slippage bound calculator
//!
//! Reads the pool's deterministic pricing function and derives the on-chain
//! guard value. The tolerance is fixed at 1% and applied asymmetrically:
//! exact-in trades bound the minimum acceptable output, exact-out trades
//! bound the maximum acceptable input. A caller-supplied explicit bound
//! overrides the computed one.

use crate::constants::{BPS_DENOMINATOR, SLIPPAGE_TOLERANCE_BPS};
use crate::contracts::{view_call, ICurvePool};
use crate::error::LaunchpadError;
use crate::types::CurveSnapshot;
use alloy::network::Ethereum;
use alloy::primitives::{Address, U256};
use alloy::providers::RootProvider;

/// Which leg of the trade is fixed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TradeMode {
    /// Input fixed, output bounded from below
    ExactIn,
    /// Output fixed, input bounded from above
    ExactOut,
}

/// Which asset is being spent
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TradeDirection {
    /// Spending base asset for tokens
    Buy,
    /// Spending tokens for base asset
    Sell,
}

/// A priced trade with its on-chain slippage guard
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Quote {
    pub direction: TradeDirection,
    pub mode: TradeMode,
    /// Input amount (expected, for exact-out trades)
    pub input: U256,
    /// Output amount (expected, for exact-in trades)
    pub output: U256,
    /// Guard passed on-chain: min output for exact-in, max input for exact-out
    pub bound: U256,
}

/// Worst acceptable output for an exact-in trade (expected x 0.99)
pub fn min_output_bound(expected_out: U256) -> U256 {
    expected_out * U256::from(BPS_DENOMINATOR - SLIPPAGE_TOLERANCE_BPS)
        / U256::from(BPS_DENOMINATOR)
}

/// Worst acceptable input for an exact-out trade (expected x 1.01)
pub fn max_input_bound(expected_in: U256) -> U256 {
    expected_in * U256::from(BPS_DENOMINATOR + SLIPPAGE_TOLERANCE_BPS)
        / U256::from(BPS_DENOMINATOR)
}

fn ensure_quotable(snapshot: &CurveSnapshot) -> Result<(), LaunchpadError> {
    if snapshot.graduated {
        return Err(LaunchpadError::ContractRevert(
            "pool has already graduated".into(),
        ));
    }
    if snapshot.remaining_supply.is_zero() {
        return Err(LaunchpadError::ContractRevert(
            "no remaining inventory on the curve".into(),
        ));
    }
    Ok(())
}

/// Quote an exact-in buy
pub async fn quote_buy(
    provider: &RootProvider<Ethereum>,
    pool: Address,
    snapshot: &CurveSnapshot,
    amount_in: U256,
) -> Result<Quote, LaunchpadError> {
    ensure_quotable(snapshot)?;
    let expected_out = view_call(
        provider,
        pool,
        ICurvePool::previewBuyCall { amountIn: amount_in },
        None,
    )
    .await
    .map_err(|e| LaunchpadError::classify(&e))?;

    Ok(Quote {
        direction: TradeDirection::Buy,
        mode: TradeMode::ExactIn,
        input: amount_in,
        output: expected_out,
        bound: min_output_bound(expected_out),
    })
}

/// Quote an exact-out buy; `max_in` overrides the computed input bound
pub async fn quote_buy_exact_out(
    provider: &RootProvider<Ethereum>,
    pool: Address,
    snapshot: &CurveSnapshot,
    amount_out: U256,
    max_in: Option<U256>,
) -> Result<Quote, LaunchpadError> {
    ensure_quotable(snapshot)?;
    let expected_in = view_call(
        provider,
        pool,
        ICurvePool::previewBuyExactOutCall {
            amountOut: amount_out,
        },
        None,
    )
    .await
    .map_err(|e| LaunchpadError::classify(&e))?;

    Ok(Quote {
        direction: TradeDirection::Buy,
        mode: TradeMode::ExactOut,
        input: expected_in,
        output: amount_out,
        bound: max_in.unwrap_or_else(|| max_input_bound(expected_in)),
    })
}

/// Quote an exact-in sell
pub async fn quote_sell(
    provider: &RootProvider<Ethereum>,
    pool: Address,
    snapshot: &CurveSnapshot,
    amount_in: U256,
) -> Result<Quote, LaunchpadError> {
    ensure_quotable(snapshot)?;
    let expected_out = view_call(
        provider,
        pool,
        ICurvePool::previewSellCall { amountIn: amount_in },
        None,
    )
    .await
    .map_err(|e| LaunchpadError::classify(&e))?;

    Ok(Quote {
        direction: TradeDirection::Sell,
        mode: TradeMode::ExactIn,
        input: amount_in,
        output: expected_out,
        bound: min_output_bound(expected_out),
    })
}

/// Quote an exact-out sell; `max_in` overrides the computed input bound
pub async fn quote_sell_exact_out(
    provider: &RootProvider<Ethereum>,
    pool: Address,
    snapshot: &CurveSnapshot,
    amount_out: U256,
    max_in: Option<U256>,
) -> Result<Quote, LaunchpadError> {
    ensure_quotable(snapshot)?;
    let expected_in = view_call(
        provider,
        pool,
        ICurvePool::previewSellExactOutCall {
            amountOut: amount_out,
        },
        None,
    )
    .await
    .map_err(|e| LaunchpadError::classify(&e))?;

    Ok(Quote {
        direction: TradeDirection::Sell,
        mode: TradeMode::ExactOut,
        input: expected_in,
        output: amount_out,
        bound: max_in.unwrap_or_else(|| max_input_bound(expected_in)),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::scale_amount;

    #[test]
    fn test_exact_in_bound_is_99_percent() {
        // expected output 200 -> bound 198
        assert_eq!(min_output_bound(scale_amount(200.0)), scale_amount(198.0));
    }

    #[test]
    fn test_exact_out_bound_is_101_percent() {
        // expected input 100 -> bound 101
        assert_eq!(max_input_bound(scale_amount(100.0)), scale_amount(101.0));
    }

    #[test]
    fn test_bounds_bracket_expectation() {
        for raw in [1u64, 99, 1_000, 123_456_789] {
            let expected = U256::from(raw);
            assert!(min_output_bound(expected) <= expected);
            assert!(max_input_bound(expected) >= expected);
        }
    }

    #[test]
    fn test_quotable_preconditions() {
        use alloy::primitives::Address;

        let mut snapshot = CurveSnapshot {
            graduated: false,
            remaining_supply: U256::from(1u64),
            token: Address::ZERO,
            creator: Address::ZERO,
            base_balance: U256::ZERO,
            token_balance: U256::ZERO,
        };
        assert!(ensure_quotable(&snapshot).is_ok());

        snapshot.remaining_supply = U256::ZERO;
        assert!(ensure_quotable(&snapshot).is_err());

        snapshot.remaining_supply = U256::from(1u64);
        snapshot.graduated = true;
        assert!(ensure_quotable(&snapshot).is_err());
    }
}
