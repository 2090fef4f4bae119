//! Constants and precision values for the launchpad SDK

use alloy::primitives::U256;
use std::time::Duration;

/// Pool base asset and launched tokens both use 18 decimals
pub const TOKEN_DECIMALS: u8 = 18;

/// Slippage tolerance in basis points (1%)
pub const SLIPPAGE_TOLERANCE_BPS: u64 = 100;

/// Basis point denominator
pub const BPS_DENOMINATOR: u64 = 10_000;

/// Hard timeout for the main operation's receipt wait
pub const RECEIPT_TIMEOUT: Duration = Duration::from_secs(60);

/// Time-to-live for an optimistic ledger entry
pub const OPTIMISTIC_TTL: Duration = Duration::from_secs(60);

/// Interval between optimistic ledger sweeps
pub const SWEEP_INTERVAL: Duration = Duration::from_secs(5);

/// Interval between authoritative-history polls
pub const RECONCILE_INTERVAL: Duration = Duration::from_secs(5);

/// Maximum backend registration attempts
pub const BACKEND_MAX_ATTEMPTS: u32 = 5;

/// Initial backend retry delay (doubles per attempt)
pub const BACKEND_RETRY_BASE: Duration = Duration::from_millis(500);

/// Backend retry delay cap
pub const BACKEND_RETRY_MAX: Duration = Duration::from_secs(8);

/// Chain ids this SDK knows how to talk to (Base mainnet, Base Sepolia)
pub const SUPPORTED_CHAIN_IDS: &[u64] = &[8453, 84_532];

/// Scale a floating point value to U256 with specified decimals
pub fn scale_to_decimals(value: f64, decimals: u8) -> U256 {
    let multiplier = 10u64.pow(decimals as u32);
    let scaled = (value * multiplier as f64) as u128;
    U256::from(scaled)
}

/// Unscale a U256 value to floating point with specified decimals
pub fn unscale_from_decimals(value: U256, decimals: u8) -> f64 {
    let divisor = 10u64.pow(decimals as u32) as f64;
    let value_u128: u128 = value.try_into().unwrap_or(u128::MAX);
    value_u128 as f64 / divisor
}

/// Scale a human-readable amount to 18-decimal base units
pub fn scale_amount(amount: f64) -> U256 {
    scale_to_decimals(amount, TOKEN_DECIMALS)
}

/// Unscale 18-decimal base units to a human-readable amount
pub fn unscale_amount(amount: U256) -> f64 {
    unscale_from_decimals(amount, TOKEN_DECIMALS)
}

/// Whether a chain id is in the supported set
pub fn is_supported_chain(chain_id: u64) -> bool {
    SUPPORTED_CHAIN_IDS.contains(&chain_id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scale_amount() {
        // 100 tokens = 100e18 base units
        let expected = U256::from(100u64) * U256::from(10u64).pow(U256::from(18u64));
        assert_eq!(scale_amount(100.0), expected);
        // 0.5 tokens = 5e17
        assert_eq!(scale_amount(0.5), U256::from(500_000_000_000_000_000u64));
    }

    #[test]
    fn test_unscale_round_trip() {
        let scaled = scale_amount(42.25);
        assert!((unscale_amount(scaled) - 42.25).abs() < 1e-9);
    }

    #[test]
    fn test_supported_chains() {
        assert!(is_supported_chain(8453));
        assert!(is_supported_chain(84_532));
        assert!(!is_supported_chain(1));
    }
}
