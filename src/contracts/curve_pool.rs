//! Bonding curve pool contract bindings
//!
//! Price is a deterministic function of reserves until graduation, at which
//! point trading stops and liquidity migrates to the DEX. Quotes come from
//! the preview functions; the buy/sell calls take the slippage bound as an
//! on-chain guard.

use alloy::sol;

sol! {
    /// Bonding curve pool interface
    #[sol(rpc)]
    interface ICurvePool {
        /// Spend an exact base-asset amount, revert below `minAmountOut`
        function buy(uint256 amountIn, uint256 minAmountOut) external returns (uint256 amountOut);

        /// Receive an exact token amount, revert above `maxAmountIn`
        function buyExactOut(uint256 amountOut, uint256 maxAmountIn) external returns (uint256 amountIn);

        /// Sell an exact token amount, revert below `minAmountOut`
        function sell(uint256 amountIn, uint256 minAmountOut) external returns (uint256 amountOut);

        /// Receive an exact base-asset amount, revert above `maxAmountIn`
        function sellExactOut(uint256 amountOut, uint256 maxAmountIn) external returns (uint256 amountIn);

        /// Quote: tokens received for an exact base-asset input
        function previewBuy(uint256 amountIn) external view returns (uint256 amountOut);

        /// Quote: base asset required for an exact token output
        function previewBuyExactOut(uint256 amountOut) external view returns (uint256 amountIn);

        /// Quote: base asset received for an exact token input
        function previewSell(uint256 amountIn) external view returns (uint256 amountOut);

        /// Quote: tokens required for an exact base-asset output
        function previewSellExactOut(uint256 amountOut) external view returns (uint256 amountIn);

        /// Whether the pool has graduated (irreversible)
        function graduated() external view returns (bool);

        /// Tokens still available on the curve
        function remainingSupply() external view returns (uint256);

        /// The launched token this pool trades
        function token() external view returns (address);

        /// Pool creator (receives creator rewards)
        function creator() external view returns (address);

        /// Unclaimed creator reward, available after graduation
        function pendingCreatorReward() external view returns (uint256);

        /// Unclaimed DEX fee share, available after graduation
        function pendingDexFees() external view returns (uint256);

        /// Claim the creator reward (creator only, after graduation)
        function claimCreatorReward() external returns (uint256 amount);

        /// Claim accrued DEX fees (creator only, after graduation)
        function claimDexFees() external returns (uint256 amount);

        /// Emitted on a completed buy
        event TokensPurchased(address indexed buyer, uint256 amountIn, uint256 amountOut);

        /// Emitted on a completed sell
        event TokensSold(address indexed seller, uint256 amountIn, uint256 amountOut);

        /// Emitted once when the pool graduates
        event Graduated(uint256 totalRaised);

        /// Emitted when the creator reward is claimed
        event CreatorRewardClaimed(address indexed creator, uint256 amount);

        /// Emitted when DEX fees are claimed
        event DexFeesClaimed(address indexed creator, uint256 amount);
    }
}
