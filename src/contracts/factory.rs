//! Launch factory contract bindings

use alloy::sol;

sol! {
    /// Factory deploying a token and its pool in one call
    #[sol(rpc)]
    interface ILaunchFactory {
        /// Deploy a token and pool
        ///
        /// `poolKind`: 0 = bonding curve, 1 = fixed-price presale.
        /// `goal` applies to presale pools only (0 for curve pools).
        function createLaunch(
            string calldata name,
            string calldata symbol,
            uint8 poolKind,
            uint256 goal
        ) external returns (address token, address pool);

        /// Emitted once per launch; the only place the derived addresses appear
        event LaunchCreated(
            address indexed token,
            address indexed pool,
            address indexed creator,
            uint8 poolKind
        );
    }
}
