//! Transaction executor
//!
//! Submits guarded write calls and tracks exactly one active transaction per
//! operation family. A newer submission replaces the tracked hash rather
//! than queueing behind it; the superseded transaction remains confirmable
//! on-chain, the UI just stops reporting on it. The receipt wait is bounded
//! by a hard 60 second timeout - a timeout means unknown outcome, never an
//! implicit resubmission.

use crate::constants::RECEIPT_TIMEOUT;
use crate::error::LaunchpadError;
use crate::signer::{TransactionSigner, TxRequest};
use crate::types::OperationFamily;
use alloy::primitives::TxHash;
use alloy::rpc::types::TransactionReceipt;
use std::collections::HashMap;
use std::sync::Mutex;

/// Tracks in-flight transactions and drives submission/confirmation
#[derive(Debug, Default)]
pub struct Executor {
    active: Mutex<HashMap<OperationFamily, TxHash>>,
}

impl Executor {
    /// Create an executor with no tracked transactions
    pub fn new() -> Self {
        Self::default()
    }

    /// The hash currently tracked for a family, if any
    pub fn active_transaction(&self, family: OperationFamily) -> Option<TxHash> {
        self.active.lock().unwrap().get(&family).copied()
    }

    /// Drop the tracked hash for a family (part of an explicit status reset)
    pub(crate) fn clear(&self, family: OperationFamily) {
        self.active.lock().unwrap().remove(&family);
    }

    /// Sign and broadcast, recording the hash as the family's active transaction
    pub async fn submit<S: TransactionSigner>(
        &self,
        signer: &S,
        family: OperationFamily,
        tx: TxRequest,
    ) -> Result<TxHash, LaunchpadError> {
        let hash = signer
            .sign_and_send(tx)
            .await
            .map_err(|e| LaunchpadError::classify(&e))?;

        let previous = self.active.lock().unwrap().insert(family, hash);
        if let Some(previous) = previous {
            tracing::warn!(?family, %previous, %hash, "superseding tracked transaction");
        }
        tracing::info!(?family, %hash, "transaction submitted");
        Ok(hash)
    }

    /// Block on the receipt with the hard confirmation timeout
    ///
    /// A reverted receipt and a timeout are both post-submission failures:
    /// gas may have been spent, and the caller must label them as such.
    pub async fn confirm<S: TransactionSigner>(
        &self,
        signer: &S,
        hash: TxHash,
    ) -> Result<TransactionReceipt, LaunchpadError> {
        let receipt = tokio::time::timeout(RECEIPT_TIMEOUT, signer.wait_for_receipt(hash))
            .await
            .map_err(|_| LaunchpadError::Timeout { hash })?
            .map_err(|e| LaunchpadError::classify(&e))?;

        if !receipt.status() {
            return Err(LaunchpadError::Reverted { hash });
        }

        tracing::info!(%hash, block = receipt.block_number, "transaction confirmed");
        Ok(receipt)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy::primitives::{Address, U256};
    use eyre::{eyre, Result};
    use std::sync::atomic::{AtomicU8, Ordering};

    struct MockSigner {
        counter: AtomicU8,
        reject: bool,
    }

    impl MockSigner {
        fn new(reject: bool) -> Self {
            Self {
                counter: AtomicU8::new(0),
                reject,
            }
        }
    }

    impl TransactionSigner for MockSigner {
        fn address(&self) -> Address {
            Address::repeat_byte(0x01)
        }

        async fn sign_and_send(&self, _tx: TxRequest) -> Result<TxHash> {
            if self.reject {
                return Err(eyre!("User denied transaction signature"));
            }
            let n = self.counter.fetch_add(1, Ordering::SeqCst) + 1;
            Ok(TxHash::repeat_byte(n))
        }

        async fn wait_for_receipt(&self, _tx_hash: TxHash) -> Result<TransactionReceipt> {
            // Never resolves; confirmation timing is the caller's problem
            std::future::pending().await
        }

        async fn get_balance(&self) -> Result<U256> {
            Ok(U256::ZERO)
        }
    }

    fn request() -> TxRequest {
        TxRequest::new(Address::ZERO, vec![])
    }

    #[tokio::test]
    async fn test_newer_submission_replaces_tracked_hash() {
        let executor = Executor::new();
        let signer = MockSigner::new(false);

        let first = executor
            .submit(&signer, OperationFamily::Trade, request())
            .await
            .unwrap();
        let second = executor
            .submit(&signer, OperationFamily::Trade, request())
            .await
            .unwrap();

        assert_ne!(first, second);
        assert_eq!(
            executor.active_transaction(OperationFamily::Trade),
            Some(second)
        );
        // Other families are untracked
        assert_eq!(executor.active_transaction(OperationFamily::Claim), None);
    }

    #[tokio::test]
    async fn test_clear_drops_tracked_hash() {
        let executor = Executor::new();
        let signer = MockSigner::new(false);

        executor
            .submit(&signer, OperationFamily::Contribute, request())
            .await
            .unwrap();
        executor.clear(OperationFamily::Contribute);
        assert_eq!(
            executor.active_transaction(OperationFamily::Contribute),
            None
        );
    }

    #[tokio::test]
    async fn test_rejected_submission_classifies() {
        let executor = Executor::new();
        let signer = MockSigner::new(true);

        let err = executor
            .submit(&signer, OperationFamily::Trade, request())
            .await
            .unwrap_err();
        assert!(err.is_user_rejection());
        assert_eq!(executor.active_transaction(OperationFamily::Trade), None);
    }

    #[tokio::test(start_paused = true)]
    async fn test_confirmation_timeout() {
        let executor = Executor::new();
        let signer = MockSigner::new(false);
        let hash = TxHash::repeat_byte(0x42);

        let err = executor.confirm(&signer, hash).await.unwrap_err();
        match &err {
            LaunchpadError::Timeout { hash: timed_out } => assert_eq!(*timed_out, hash),
            other => panic!("expected timeout, got {other:?}"),
        }
        assert!(err.gas_may_be_spent());
    }
}
