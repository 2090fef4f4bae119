//! Event extraction from confirmed receipts
//!
//! Some outcomes only exist in logs - the factory's derived addresses, the
//! executed trade amounts. A confirmed receipt without the expected event is
//! treated like a revert: the operation's observable effect cannot be
//! confirmed, so the pipeline fails hard.

use crate::error::LaunchpadError;
use alloy::rpc::types::{Log, TransactionReceipt};
use alloy::sol_types::SolEvent;

/// Decode the first matching `E` from the receipt's logs
pub fn extract_event<E: SolEvent>(receipt: &TransactionReceipt) -> Result<E, LaunchpadError> {
    extract_from_logs(receipt.inner.logs())
}

/// Decode the first matching `E` from a log slice
pub fn extract_from_logs<E: SolEvent>(logs: &[Log]) -> Result<E, LaunchpadError> {
    logs.iter()
        .find_map(|log| E::decode_log(&log.inner).ok())
        .map(|decoded| decoded.data)
        .ok_or(LaunchpadError::EventNotFound(E::SIGNATURE))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::contracts::{ICurvePool, IPresalePool};
    use alloy::primitives::{Address, U256};

    fn contributed_log(contributor: Address, amount: U256) -> Log {
        let event = IPresalePool::Contributed {
            contributor,
            amount,
        };
        Log {
            inner: alloy::primitives::Log {
                address: Address::repeat_byte(0xaa),
                data: event.encode_log_data(),
            },
            ..Default::default()
        }
    }

    #[test]
    fn test_extracts_first_match() {
        let contributor = Address::repeat_byte(0x11);
        let logs = vec![
            contributed_log(contributor, U256::from(100u64)),
            contributed_log(Address::repeat_byte(0x22), U256::from(7u64)),
        ];

        let event: IPresalePool::Contributed = extract_from_logs(&logs).unwrap();
        assert_eq!(event.contributor, contributor);
        assert_eq!(event.amount, U256::from(100u64));
    }

    #[test]
    fn test_missing_event_is_hard_failure() {
        // A Purchased log cannot satisfy a Contributed extraction
        let purchase = ICurvePool::TokensPurchased {
            buyer: Address::repeat_byte(0x33),
            amountIn: U256::from(1u64),
            amountOut: U256::from(2u64),
        };
        let logs = vec![Log {
            inner: alloy::primitives::Log {
                address: Address::repeat_byte(0xbb),
                data: purchase.encode_log_data(),
            },
            ..Default::default()
        }];

        let err = extract_from_logs::<IPresalePool::Contributed>(&logs).unwrap_err();
        assert!(matches!(err, LaunchpadError::EventNotFound(_)));
        assert!(err.gas_may_be_spent());
    }

    #[test]
    fn test_empty_logs() {
        let err = extract_from_logs::<IPresalePool::Contributed>(&[]).unwrap_err();
        assert!(matches!(err, LaunchpadError::EventNotFound(_)));
    }
}
