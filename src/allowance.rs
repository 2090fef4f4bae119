//! Allowance manager
//!
//! Ensures the spender holds sufficient allowance before a spend call is
//! submitted. Approvals grant exactly the required amount - no unlimited
//! approvals - and the post-approval re-read is pinned to the approval's
//! confirmed block so a stale or reorg-affected "latest" read cannot let the
//! pipeline proceed on an insufficient allowance. If the pinned re-read
//! still comes back short, the whole operation fails closed.

use crate::contracts::{view_call, IERC20};
use crate::error::LaunchpadError;
use crate::signer::{TransactionSigner, TxRequest};
use alloy::eips::BlockId;
use alloy::network::Ethereum;
use alloy::primitives::{Address, U256};
use alloy::providers::RootProvider;
use alloy::sol_types::SolCall;

/// Ensure `spender` may spend `required` of `token` on behalf of the signer
pub async fn ensure_allowance<S: TransactionSigner>(
    provider: &RootProvider<Ethereum>,
    signer: &S,
    chain_id: u64,
    token: Address,
    spender: Address,
    required: U256,
) -> Result<(), LaunchpadError> {
    let owner = signer.address();

    let current = read_allowance(provider, token, owner, spender, None).await?;
    if current >= required {
        tracing::debug!(%token, %spender, %current, "allowance already sufficient");
        return Ok(());
    }

    let call = IERC20::approveCall {
        spender,
        amount: required,
    };
    let tx = TxRequest::new(token, call.abi_encode()).with_chain_id(chain_id);
    let hash = signer
        .sign_and_send(tx)
        .await
        .map_err(|e| LaunchpadError::classify(&e))?;
    tracing::info!(%token, %spender, %required, %hash, "approval submitted");

    let receipt = signer
        .wait_for_receipt(hash)
        .await
        .map_err(|e| LaunchpadError::classify(&e))?;
    if !receipt.status() {
        return Err(LaunchpadError::Reverted { hash });
    }

    let approval_block = receipt
        .block_number
        .ok_or_else(|| LaunchpadError::Rpc("approval receipt missing block number".into()))?;

    // Re-read pinned to the approval's block, not latest
    let granted = read_allowance(
        provider,
        token,
        owner,
        spender,
        Some(BlockId::number(approval_block)),
    )
    .await?;

    if granted < required {
        return Err(LaunchpadError::StaleAllowance { granted, required });
    }

    tracing::info!(%token, %spender, %granted, block = approval_block, "allowance verified");
    Ok(())
}

async fn read_allowance(
    provider: &RootProvider<Ethereum>,
    token: Address,
    owner: Address,
    spender: Address,
    block: Option<BlockId>,
) -> Result<U256, LaunchpadError> {
    view_call(provider, token, IERC20::allowanceCall { owner, spender }, block)
        .await
        .map_err(|e| LaunchpadError::classify(&e))
}
