//! Contract bindings for the launchpad protocol

pub mod curve_pool;
pub mod erc20;
pub mod factory;
pub mod presale_pool;

pub use curve_pool::*;
pub use erc20::*;
pub use factory::*;
pub use presale_pool::*;

use alloy::eips::BlockId;
use alloy::network::{Ethereum, TransactionBuilder};
use alloy::primitives::Address;
use alloy::providers::{Provider, RootProvider};
use alloy::sol_types::SolCall;
use eyre::{Context, Result};

/// Encode, submit, and decode a read-only contract call
///
/// `block` pins the read to a specific height; `None` reads latest.
pub(crate) async fn view_call<C: SolCall>(
    provider: &RootProvider<Ethereum>,
    to: Address,
    call: C,
    block: Option<BlockId>,
) -> Result<C::Return> {
    let request = alloy::rpc::types::TransactionRequest::default()
        .with_to(to)
        .with_input(call.abi_encode());

    let mut eth_call = provider.call(request);
    if let Some(block) = block {
        eth_call = eth_call.block(block);
    }

    let raw = eth_call.await.context("eth_call failed")?;
    C::abi_decode_returns(&raw).context("Failed to decode call return")
}
