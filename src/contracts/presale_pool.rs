//! Fixed-price presale pool contract bindings
//!
//! Accepts base-asset contributions at a fixed rate until the goal or the
//! deadline. After finalization participants claim tokens; if the raise
//! fails, refunds open instead.

use alloy::sol;

sol! {
    /// Fixed-price presale pool interface
    #[sol(rpc)]
    interface IPresalePool {
        /// Contribute base asset to the raise
        function contribute(uint256 amount) external;

        /// Claim tokens after a successful, finalized raise
        function claim() external returns (uint256 tokenAmount);

        /// Recover a contribution after a failed raise
        function refund() external returns (uint256 amount);

        /// Total contributed by an account
        function contributionOf(address account) external view returns (uint256);

        /// Total base asset raised
        function totalRaised() external view returns (uint256);

        /// Whether the raise has been finalized
        function finalized() external view returns (bool);

        /// Whether the funding goal was reached
        function goalReached() external view returns (bool);

        /// Whether refunds are open (failed raise)
        function refundsEnabled() external view returns (bool);

        /// Whether an account has already claimed
        function hasClaimed(address account) external view returns (bool);

        /// Whether an account has already been refunded
        function hasRefunded(address account) external view returns (bool);

        /// Emitted on a contribution
        #[derive(Debug)]
        event Contributed(address indexed contributor, uint256 amount);

        /// Emitted on a successful claim
        event Claimed(address indexed contributor, uint256 tokenAmount);

        /// Emitted on a refund
        event Refunded(address indexed contributor, uint256 amount);
    }
}
