//! LaunchpadClient - main entry point for the SDK
//!
//! Every operation runs the same pipeline: snapshot pool state, validate,
//! ensure allowance where the call spends tokens, quote and bound slippage
//! for curve trades, submit the guarded call, block on the receipt, decode
//! the domain event, and publish status transitions along the way.
//! Contributions additionally land in the optimistic ledger so the UI can
//! show them before the indexer catches up.

use crate::allowance::ensure_allowance;
use crate::backend::{BackendClient, LaunchRegistration};
use crate::config::NetworkConfig;
use crate::constants::{RECONCILE_INTERVAL, SWEEP_INTERVAL};
use crate::contracts::{view_call, ICurvePool, ILaunchFactory, IPresalePool, IERC20};
use crate::error::LaunchpadError;
use crate::events::extract_event;
use crate::executor::Executor;
use crate::ledger::{OptimisticLedger, SweeperHandle};
use crate::quote::{self, Quote};
use crate::session::Session;
use crate::signer::{TransactionSigner, TxRequest};
use crate::status::{OperationStatus, StatusBoard};
use crate::subgraph::{spawn_reconciler, ReconcilerHandle, SubgraphClient};
use crate::types::{
    CurveSnapshot, EventPayload, LaunchParams, MergedHistory, OperationFamily, OperationPlan,
    PoolSnapshot, PresaleSnapshot, TransactionResult,
};
use crate::validate::{validate, validate_launch};
use alloy::network::Ethereum;
use alloy::primitives::{Address, TxHash, U256};
use alloy::providers::{ProviderBuilder, RootProvider};
use alloy::rpc::types::TransactionReceipt;
use alloy::sol_types::SolCall;
use alloy::transports::http::reqwest::Url;
use eyre::{Context, Result};
use std::sync::Arc;
use tokio::sync::watch;

/// Type alias for read-only provider
type ReadProvider = Arc<RootProvider<Ethereum>>;

/// Main client for interacting with launchpad pools
pub struct LaunchpadClient<S: TransactionSigner> {
    signer: S,
    config: NetworkConfig,
    provider: ReadProvider,
    executor: Executor,
    status: StatusBoard,
    ledger: Arc<OptimisticLedger>,
    subgraph: Option<Arc<SubgraphClient>>,
    backend: Option<BackendClient>,
}

impl<S: TransactionSigner> LaunchpadClient<S> {
    /// Create a new LaunchpadClient
    pub async fn new(signer: S, config: NetworkConfig) -> Result<Self> {
        config.ensure_supported()?;

        let url: Url = config.rpc_url.parse().context("Invalid RPC URL")?;
        // Read-only provider without fillers (we only do eth_call operations)
        let provider = ProviderBuilder::new()
            .disable_recommended_fillers()
            .network::<Ethereum>()
            .connect_http(url);

        let subgraph = (!config.subgraph_url.is_empty())
            .then(|| Arc::new(SubgraphClient::new(config.subgraph_url.clone())));
        let backend =
            (!config.backend_url.is_empty()).then(|| BackendClient::new(config.backend_url.clone()));

        Ok(Self {
            signer,
            config,
            provider: Arc::new(provider),
            executor: Executor::new(),
            status: StatusBoard::new(),
            ledger: Arc::new(OptimisticLedger::new()),
            subgraph,
            backend,
        })
    }

    /// Get the signer's address
    pub fn address(&self) -> Address {
        self.signer.address()
    }

    /// Get the network configuration
    pub fn config(&self) -> &NetworkConfig {
        &self.config
    }

    /// The optimistic ledger backing participant displays
    pub fn ledger(&self) -> &Arc<OptimisticLedger> {
        &self.ledger
    }

    /// Current status of an operation family
    pub fn status(&self, family: OperationFamily) -> OperationStatus {
        self.status.current(family)
    }

    /// Subscribe to an operation family's status transitions
    pub fn subscribe_status(&self, family: OperationFamily) -> watch::Receiver<OperationStatus> {
        self.status.subscribe(family)
    }

    /// The hash currently tracked for a family, if any
    pub fn active_transaction(&self, family: OperationFamily) -> Option<TxHash> {
        self.executor.active_transaction(family)
    }

    /// Explicitly reset a family to idle, clearing its tracked hash
    pub fn reset(&self, family: OperationFamily) {
        self.executor.clear(family);
        self.status.reset(family);
    }

    fn session(&self) -> Session {
        Session::new(Some(self.signer.address()), self.config.chain_id)
    }

    // ========== Pool Operations ==========

    /// Contribute base asset to a fixed-price presale pool
    pub async fn contribute(
        &self,
        pool: Address,
        amount: U256,
    ) -> Result<TransactionResult, LaunchpadError> {
        let family = OperationFamily::Contribute;
        self.status.begin(family);
        let result = self.contribute_inner(family, pool, amount).await;
        self.settle(family, result)
    }

    /// Buy curve tokens with an exact base-asset amount
    pub async fn buy(
        &self,
        pool: Address,
        amount_in: U256,
    ) -> Result<TransactionResult, LaunchpadError> {
        let family = OperationFamily::Trade;
        self.status.begin(family);
        let result = self.buy_inner(family, pool, amount_in).await;
        self.settle(family, result)
    }

    /// Buy an exact amount of curve tokens; `max_in` caps the base-asset spend
    pub async fn buy_exact_out(
        &self,
        pool: Address,
        amount_out: U256,
        max_in: Option<U256>,
    ) -> Result<TransactionResult, LaunchpadError> {
        let family = OperationFamily::Trade;
        self.status.begin(family);
        let result = self
            .buy_exact_out_inner(family, pool, amount_out, max_in)
            .await;
        self.settle(family, result)
    }

    /// Sell an exact amount of curve tokens for base asset
    pub async fn sell(
        &self,
        pool: Address,
        amount_in: U256,
    ) -> Result<TransactionResult, LaunchpadError> {
        let family = OperationFamily::Trade;
        self.status.begin(family);
        let result = self.sell_inner(family, pool, amount_in).await;
        self.settle(family, result)
    }

    /// Sell curve tokens for an exact base-asset amount; `max_in` caps the token spend
    pub async fn sell_exact_out(
        &self,
        pool: Address,
        amount_out: U256,
        max_in: Option<U256>,
    ) -> Result<TransactionResult, LaunchpadError> {
        let family = OperationFamily::Trade;
        self.status.begin(family);
        let result = self
            .sell_exact_out_inner(family, pool, amount_out, max_in)
            .await;
        self.settle(family, result)
    }

    /// Claim tokens from a finalized presale pool
    pub async fn claim(&self, pool: Address) -> Result<TransactionResult, LaunchpadError> {
        let family = OperationFamily::Claim;
        self.status.begin(family);
        let result = self.claim_inner(family, pool).await;
        self.settle(family, result)
    }

    /// Recover a contribution from a failed presale pool
    pub async fn refund(&self, pool: Address) -> Result<TransactionResult, LaunchpadError> {
        let family = OperationFamily::Claim;
        self.status.begin(family);
        let result = self.refund_inner(family, pool).await;
        self.settle(family, result)
    }

    /// Claim the creator reward from a graduated curve pool
    pub async fn claim_creator_reward(
        &self,
        pool: Address,
    ) -> Result<TransactionResult, LaunchpadError> {
        let family = OperationFamily::Claim;
        self.status.begin(family);
        let result = self.claim_creator_reward_inner(family, pool).await;
        self.settle(family, result)
    }

    /// Claim accrued DEX fees from a graduated curve pool
    pub async fn claim_dex_fees(
        &self,
        pool: Address,
    ) -> Result<TransactionResult, LaunchpadError> {
        let family = OperationFamily::Claim;
        self.status.begin(family);
        let result = self.claim_dex_fees_inner(family, pool).await;
        self.settle(family, result)
    }

    /// Deploy a new token and pool through the factory
    ///
    /// The derived addresses only exist in the `LaunchCreated` event, so a
    /// confirmed receipt without it fails hard. Backend registration runs
    /// after confirmation and retries on its own schedule - the chain-side
    /// effect must not be lost to a metadata hiccup.
    pub async fn launch(
        &self,
        params: LaunchParams,
    ) -> Result<TransactionResult, LaunchpadError> {
        let family = OperationFamily::Launch;
        self.status.begin(family);
        let result = self.launch_inner(family, params).await;
        self.settle(family, result)
    }

    // ========== Pipeline Internals ==========

    fn settle(
        &self,
        family: OperationFamily,
        result: Result<TransactionResult, LaunchpadError>,
    ) -> Result<TransactionResult, LaunchpadError> {
        match result {
            Ok(result) => {
                self.status.advance(family, OperationStatus::Success);
                Ok(result)
            }
            Err(err) => {
                if self.status.settle_err(family, &err) {
                    tracing::warn!(
                        ?family,
                        error = %err,
                        gas_may_be_spent = err.gas_may_be_spent(),
                        guidance = err.user_message(),
                        "operation failed"
                    );
                }
                Err(err)
            }
        }
    }

    /// Submit the guarded call and block on its receipt, publishing status
    async fn execute(
        &self,
        family: OperationFamily,
        to: Address,
        data: Vec<u8>,
    ) -> Result<(TxHash, TransactionReceipt), LaunchpadError> {
        let tx = TxRequest::new(to, data).with_chain_id(self.config.chain_id);
        let hash = self.executor.submit(&self.signer, family, tx).await?;
        self.status.advance(family, OperationStatus::Pending);

        self.status.advance(family, OperationStatus::Confirming);
        let receipt = self.executor.confirm(&self.signer, hash).await?;
        Ok((hash, receipt))
    }

    async fn contribute_inner(
        &self,
        family: OperationFamily,
        pool: Address,
        amount: U256,
    ) -> Result<TransactionResult, LaunchpadError> {
        let plan = OperationPlan::Contribute { pool, amount };
        let snapshot = self.snapshot_presale(pool).await?;
        validate(
            &plan,
            &self.session(),
            self.config.chain_id,
            &PoolSnapshot::Presale(snapshot),
        )?;

        ensure_allowance(
            &self.provider,
            &self.signer,
            self.config.chain_id,
            self.config.base_token,
            pool,
            amount,
        )
        .await?;

        let call = IPresalePool::contributeCall { amount };
        let (hash, receipt) = self.execute(family, pool, call.abi_encode()).await?;
        let event: IPresalePool::Contributed = extract_event(&receipt)?;

        self.ledger
            .insert(self.signer.address(), event.amount, Some(hash));

        Ok(TransactionResult {
            hash,
            block_number: receipt.block_number.unwrap_or_default(),
            payload: EventPayload::Contributed {
                contributor: event.contributor,
                amount: event.amount,
            },
        })
    }

    async fn buy_inner(
        &self,
        family: OperationFamily,
        pool: Address,
        amount_in: U256,
    ) -> Result<TransactionResult, LaunchpadError> {
        let plan = OperationPlan::Buy { pool, amount_in };
        let snapshot = self.snapshot_curve(pool).await?;
        validate(
            &plan,
            &self.session(),
            self.config.chain_id,
            &PoolSnapshot::Curve(snapshot.clone()),
        )?;

        let quote = quote::quote_buy(&self.provider, pool, &snapshot, amount_in).await?;
        self.log_quote(&quote);

        ensure_allowance(
            &self.provider,
            &self.signer,
            self.config.chain_id,
            self.config.base_token,
            pool,
            amount_in,
        )
        .await?;

        let call = ICurvePool::buyCall {
            amountIn: amount_in,
            minAmountOut: quote.bound,
        };
        let (hash, receipt) = self.execute(family, pool, call.abi_encode()).await?;
        let event: ICurvePool::TokensPurchased = extract_event(&receipt)?;

        Ok(TransactionResult {
            hash,
            block_number: receipt.block_number.unwrap_or_default(),
            payload: EventPayload::Purchased {
                buyer: event.buyer,
                amount_in: event.amountIn,
                amount_out: event.amountOut,
            },
        })
    }

    async fn buy_exact_out_inner(
        &self,
        family: OperationFamily,
        pool: Address,
        amount_out: U256,
        max_in: Option<U256>,
    ) -> Result<TransactionResult, LaunchpadError> {
        let plan = OperationPlan::BuyExactOut {
            pool,
            amount_out,
            max_in,
        };
        let snapshot = self.snapshot_curve(pool).await?;
        validate(
            &plan,
            &self.session(),
            self.config.chain_id,
            &PoolSnapshot::Curve(snapshot.clone()),
        )?;

        let quote =
            quote::quote_buy_exact_out(&self.provider, pool, &snapshot, amount_out, max_in).await?;
        self.log_quote(&quote);

        // Approve the worst acceptable input - that is the planned spend
        ensure_allowance(
            &self.provider,
            &self.signer,
            self.config.chain_id,
            self.config.base_token,
            pool,
            quote.bound,
        )
        .await?;

        let call = ICurvePool::buyExactOutCall {
            amountOut: amount_out,
            maxAmountIn: quote.bound,
        };
        let (hash, receipt) = self.execute(family, pool, call.abi_encode()).await?;
        let event: ICurvePool::TokensPurchased = extract_event(&receipt)?;

        Ok(TransactionResult {
            hash,
            block_number: receipt.block_number.unwrap_or_default(),
            payload: EventPayload::Purchased {
                buyer: event.buyer,
                amount_in: event.amountIn,
                amount_out: event.amountOut,
            },
        })
    }

    async fn sell_inner(
        &self,
        family: OperationFamily,
        pool: Address,
        amount_in: U256,
    ) -> Result<TransactionResult, LaunchpadError> {
        let plan = OperationPlan::Sell { pool, amount_in };
        let snapshot = self.snapshot_curve(pool).await?;
        validate(
            &plan,
            &self.session(),
            self.config.chain_id,
            &PoolSnapshot::Curve(snapshot.clone()),
        )?;

        let quote = quote::quote_sell(&self.provider, pool, &snapshot, amount_in).await?;
        self.log_quote(&quote);

        // Selling spends the launched token, not the base asset
        ensure_allowance(
            &self.provider,
            &self.signer,
            self.config.chain_id,
            snapshot.token,
            pool,
            amount_in,
        )
        .await?;

        let call = ICurvePool::sellCall {
            amountIn: amount_in,
            minAmountOut: quote.bound,
        };
        let (hash, receipt) = self.execute(family, pool, call.abi_encode()).await?;
        let event: ICurvePool::TokensSold = extract_event(&receipt)?;

        Ok(TransactionResult {
            hash,
            block_number: receipt.block_number.unwrap_or_default(),
            payload: EventPayload::Sold {
                seller: event.seller,
                amount_in: event.amountIn,
                amount_out: event.amountOut,
            },
        })
    }

    async fn sell_exact_out_inner(
        &self,
        family: OperationFamily,
        pool: Address,
        amount_out: U256,
        max_in: Option<U256>,
    ) -> Result<TransactionResult, LaunchpadError> {
        let plan = OperationPlan::SellExactOut {
            pool,
            amount_out,
            max_in,
        };
        let snapshot = self.snapshot_curve(pool).await?;
        validate(
            &plan,
            &self.session(),
            self.config.chain_id,
            &PoolSnapshot::Curve(snapshot.clone()),
        )?;

        let quote =
            quote::quote_sell_exact_out(&self.provider, pool, &snapshot, amount_out, max_in)
                .await?;
        self.log_quote(&quote);

        ensure_allowance(
            &self.provider,
            &self.signer,
            self.config.chain_id,
            snapshot.token,
            pool,
            quote.bound,
        )
        .await?;

        let call = ICurvePool::sellExactOutCall {
            amountOut: amount_out,
            maxAmountIn: quote.bound,
        };
        let (hash, receipt) = self.execute(family, pool, call.abi_encode()).await?;
        let event: ICurvePool::TokensSold = extract_event(&receipt)?;

        Ok(TransactionResult {
            hash,
            block_number: receipt.block_number.unwrap_or_default(),
            payload: EventPayload::Sold {
                seller: event.seller,
                amount_in: event.amountIn,
                amount_out: event.amountOut,
            },
        })
    }

    async fn claim_inner(
        &self,
        family: OperationFamily,
        pool: Address,
    ) -> Result<TransactionResult, LaunchpadError> {
        let plan = OperationPlan::Claim { pool };
        let snapshot = self.snapshot_presale(pool).await?;
        validate(
            &plan,
            &self.session(),
            self.config.chain_id,
            &PoolSnapshot::Presale(snapshot),
        )?;

        let call = IPresalePool::claimCall {};
        let (hash, receipt) = self.execute(family, pool, call.abi_encode()).await?;
        let event: IPresalePool::Claimed = extract_event(&receipt)?;

        Ok(TransactionResult {
            hash,
            block_number: receipt.block_number.unwrap_or_default(),
            payload: EventPayload::Claimed {
                contributor: event.contributor,
                token_amount: event.tokenAmount,
            },
        })
    }

    async fn refund_inner(
        &self,
        family: OperationFamily,
        pool: Address,
    ) -> Result<TransactionResult, LaunchpadError> {
        let plan = OperationPlan::Refund { pool };
        let snapshot = self.snapshot_presale(pool).await?;
        validate(
            &plan,
            &self.session(),
            self.config.chain_id,
            &PoolSnapshot::Presale(snapshot),
        )?;

        let call = IPresalePool::refundCall {};
        let (hash, receipt) = self.execute(family, pool, call.abi_encode()).await?;
        let event: IPresalePool::Refunded = extract_event(&receipt)?;

        Ok(TransactionResult {
            hash,
            block_number: receipt.block_number.unwrap_or_default(),
            payload: EventPayload::Refunded {
                contributor: event.contributor,
                amount: event.amount,
            },
        })
    }

    async fn claim_creator_reward_inner(
        &self,
        family: OperationFamily,
        pool: Address,
    ) -> Result<TransactionResult, LaunchpadError> {
        let plan = OperationPlan::ClaimCreatorReward { pool };
        let snapshot = self.snapshot_curve(pool).await?;
        validate(
            &plan,
            &self.session(),
            self.config.chain_id,
            &PoolSnapshot::Curve(snapshot),
        )?;

        let call = ICurvePool::claimCreatorRewardCall {};
        let (hash, receipt) = self.execute(family, pool, call.abi_encode()).await?;
        let event: ICurvePool::CreatorRewardClaimed = extract_event(&receipt)?;

        Ok(TransactionResult {
            hash,
            block_number: receipt.block_number.unwrap_or_default(),
            payload: EventPayload::CreatorRewardClaimed {
                creator: event.creator,
                amount: event.amount,
            },
        })
    }

    async fn claim_dex_fees_inner(
        &self,
        family: OperationFamily,
        pool: Address,
    ) -> Result<TransactionResult, LaunchpadError> {
        let plan = OperationPlan::ClaimDexFees { pool };
        let snapshot = self.snapshot_curve(pool).await?;
        validate(
            &plan,
            &self.session(),
            self.config.chain_id,
            &PoolSnapshot::Curve(snapshot),
        )?;

        let call = ICurvePool::claimDexFeesCall {};
        let (hash, receipt) = self.execute(family, pool, call.abi_encode()).await?;
        let event: ICurvePool::DexFeesClaimed = extract_event(&receipt)?;

        Ok(TransactionResult {
            hash,
            block_number: receipt.block_number.unwrap_or_default(),
            payload: EventPayload::DexFeesClaimed {
                creator: event.creator,
                amount: event.amount,
            },
        })
    }

    async fn launch_inner(
        &self,
        family: OperationFamily,
        params: LaunchParams,
    ) -> Result<TransactionResult, LaunchpadError> {
        validate_launch(&params, &self.session(), self.config.chain_id)?;

        let call = ILaunchFactory::createLaunchCall {
            name: params.name.clone(),
            symbol: params.symbol.clone(),
            poolKind: params.kind.into(),
            goal: params.goal,
        };
        let (hash, receipt) = self
            .execute(family, self.config.factory, call.abi_encode())
            .await?;
        let event: ILaunchFactory::LaunchCreated = extract_event(&receipt)?;
        tracing::info!(token = %event.token, pool = %event.pool, "launch created");

        if let Some(backend) = &self.backend {
            backend
                .register_launch(&LaunchRegistration {
                    token: event.token,
                    pool: event.pool,
                    creator: event.creator,
                    tx_hash: hash,
                    name: params.name,
                    symbol: params.symbol,
                })
                .await?;
        }

        Ok(TransactionResult {
            hash,
            block_number: receipt.block_number.unwrap_or_default(),
            payload: EventPayload::LaunchCreated {
                token: event.token,
                pool: event.pool,
                creator: event.creator,
            },
        })
    }

    fn log_quote(&self, quote: &Quote) {
        tracing::debug!(
            direction = ?quote.direction,
            mode = ?quote.mode,
            input = %quote.input,
            output = %quote.output,
            bound = %quote.bound,
            "quote computed"
        );
    }

    // ========== Pool State Reads ==========

    async fn view<C: SolCall>(&self, to: Address, call: C) -> Result<C::Return, LaunchpadError> {
        view_call(&self.provider, to, call, None)
            .await
            .map_err(|e| LaunchpadError::classify(&e))
    }

    async fn snapshot_curve(&self, pool: Address) -> Result<CurveSnapshot, LaunchpadError> {
        let wallet = self.signer.address();

        let graduated = self.view(pool, ICurvePool::graduatedCall {}).await?;
        let remaining_supply = self.view(pool, ICurvePool::remainingSupplyCall {}).await?;
        let token = self.view(pool, ICurvePool::tokenCall {}).await?;
        if token == Address::ZERO {
            return Err(LaunchpadError::TokenNotFound(pool));
        }
        let creator = self.view(pool, ICurvePool::creatorCall {}).await?;
        let base_balance = self
            .view(
                self.config.base_token,
                IERC20::balanceOfCall { account: wallet },
            )
            .await?;
        let token_balance = self
            .view(token, IERC20::balanceOfCall { account: wallet })
            .await?;

        Ok(CurveSnapshot {
            graduated,
            remaining_supply,
            token,
            creator,
            base_balance,
            token_balance,
        })
    }

    async fn snapshot_presale(&self, pool: Address) -> Result<PresaleSnapshot, LaunchpadError> {
        let wallet = self.signer.address();

        let finalized = self.view(pool, IPresalePool::finalizedCall {}).await?;
        let goal_reached = self.view(pool, IPresalePool::goalReachedCall {}).await?;
        let refunds_enabled = self.view(pool, IPresalePool::refundsEnabledCall {}).await?;
        let contribution = self
            .view(pool, IPresalePool::contributionOfCall { account: wallet })
            .await?;
        let has_claimed = self
            .view(pool, IPresalePool::hasClaimedCall { account: wallet })
            .await?;
        let has_refunded = self
            .view(pool, IPresalePool::hasRefundedCall { account: wallet })
            .await?;
        let base_balance = self
            .view(
                self.config.base_token,
                IERC20::balanceOfCall { account: wallet },
            )
            .await?;

        Ok(PresaleSnapshot {
            finalized,
            goal_reached,
            refunds_enabled,
            contribution,
            has_claimed,
            has_refunded,
            base_balance,
        })
    }

    // ========== Participant History ==========

    /// Fetch confirmed history, reconcile the ledger, and return the merged view
    pub async fn participant_history(
        &self,
        pool: Address,
    ) -> Result<MergedHistory, LaunchpadError> {
        let subgraph = self
            .subgraph
            .as_ref()
            .ok_or_else(|| LaunchpadError::Rpc("no subgraph endpoint configured".into()))?;

        let participations = subgraph
            .get_participations(pool)
            .await
            .map_err(|e| LaunchpadError::classify(&e))?;
        let records: Vec<_> = participations.iter().map(|p| p.to_record()).collect();

        self.ledger.reconcile(&records);
        Ok(self.ledger.merge(&records))
    }

    /// Start the background sweep and reconciliation tasks for a pool
    ///
    /// Returns cancel handles; both tasks stop when the handles drop.
    pub fn start_maintenance(
        &self,
        pool: Address,
    ) -> Option<(SweeperHandle, ReconcilerHandle)> {
        let subgraph = self.subgraph.as_ref()?;
        let sweeper = OptimisticLedger::spawn_sweeper(Arc::clone(&self.ledger), SWEEP_INTERVAL);
        let reconciler = spawn_reconciler(
            Arc::clone(subgraph),
            Arc::clone(&self.ledger),
            pool,
            RECONCILE_INTERVAL,
        );
        Some((sweeper, reconciler))
    }

    // ========== Utility Methods ==========

    /// Wait for transaction confirmation
    pub async fn wait_for_receipt(&self, tx_hash: TxHash) -> Result<TransactionReceipt> {
        self.signer.wait_for_receipt(tx_hash).await
    }

    /// Get native token balance
    pub async fn get_native_balance(&self) -> Result<U256> {
        self.signer.get_balance().await
    }

    /// Get base-asset balance of the signer
    pub async fn get_base_balance(&self) -> Result<U256, LaunchpadError> {
        self.view(
            self.config.base_token,
            IERC20::balanceOfCall {
                account: self.signer.address(),
            },
        )
        .await
    }
}
