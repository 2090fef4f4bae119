//! Network configuration for the launchpad SDK

use crate::error::LaunchpadError;
use alloy::primitives::Address;

/// Network configuration containing RPC URLs and contract addresses
#[derive(Debug, Clone)]
pub struct NetworkConfig {
    /// Chain ID (8453 for Base mainnet)
    pub chain_id: u64,
    /// RPC endpoint URL
    pub rpc_url: String,
    /// Base asset token address (the ERC20 spent into pools)
    pub base_token: Address,
    /// Launch factory contract address
    pub factory: Address,
    /// Subgraph endpoint for confirmed participation history
    pub subgraph_url: String,
    /// Token metadata backend endpoint
    pub backend_url: String,
}

impl NetworkConfig {
    /// Create a configuration with explicit addresses
    pub fn new(
        chain_id: u64,
        rpc_url: impl Into<String>,
        base_token: Address,
        factory: Address,
    ) -> Self {
        Self {
            chain_id,
            rpc_url: rpc_url.into(),
            base_token,
            factory,
            subgraph_url: String::new(),
            backend_url: String::new(),
        }
    }

    /// Build a configuration from environment variables
    ///
    /// Reads `LAUNCHPAD_RPC_URL`, `LAUNCHPAD_CHAIN_ID`, `LAUNCHPAD_BASE_TOKEN`,
    /// `LAUNCHPAD_FACTORY`, and optionally `LAUNCHPAD_SUBGRAPH_URL` /
    /// `LAUNCHPAD_BACKEND_URL`.
    pub fn from_env() -> eyre::Result<Self> {
        use eyre::Context;

        let chain_id: u64 = std::env::var("LAUNCHPAD_CHAIN_ID")
            .context("LAUNCHPAD_CHAIN_ID must be set")?
            .parse()
            .context("Invalid LAUNCHPAD_CHAIN_ID")?;
        let rpc_url = std::env::var("LAUNCHPAD_RPC_URL").context("LAUNCHPAD_RPC_URL must be set")?;
        let base_token: Address = std::env::var("LAUNCHPAD_BASE_TOKEN")
            .context("LAUNCHPAD_BASE_TOKEN must be set")?
            .parse()
            .context("Invalid LAUNCHPAD_BASE_TOKEN address")?;
        let factory: Address = std::env::var("LAUNCHPAD_FACTORY")
            .context("LAUNCHPAD_FACTORY must be set")?
            .parse()
            .context("Invalid LAUNCHPAD_FACTORY address")?;

        let mut config = Self::new(chain_id, rpc_url, base_token, factory);
        if let Ok(url) = std::env::var("LAUNCHPAD_SUBGRAPH_URL") {
            config.subgraph_url = url;
        }
        if let Ok(url) = std::env::var("LAUNCHPAD_BACKEND_URL") {
            config.backend_url = url;
        }
        Ok(config)
    }

    /// Fail unless the configured chain id is one this SDK supports
    pub fn ensure_supported(&self) -> Result<(), LaunchpadError> {
        if !crate::constants::is_supported_chain(self.chain_id) {
            return Err(LaunchpadError::ChainNotConfigured(self.chain_id));
        }
        Ok(())
    }

    /// Set the subgraph endpoint
    pub fn with_subgraph_url(mut self, url: impl Into<String>) -> Self {
        self.subgraph_url = url.into();
        self
    }

    /// Set the backend endpoint
    pub fn with_backend_url(mut self, url: impl Into<String>) -> Self {
        self.backend_url = url.into();
        self
    }

    /// Override the RPC URL
    pub fn with_rpc_url(mut self, rpc_url: impl Into<String>) -> Self {
        self.rpc_url = rpc_url.into();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dummy() -> NetworkConfig {
        NetworkConfig::new(8453, "http://localhost:8545", Address::ZERO, Address::ZERO)
    }

    #[test]
    fn test_ensure_supported() {
        assert!(dummy().ensure_supported().is_ok());

        let mut config = dummy();
        config.chain_id = 1;
        assert!(matches!(
            config.ensure_supported(),
            Err(LaunchpadError::ChainNotConfigured(1))
        ));
    }

    #[test]
    fn test_builders() {
        let config = dummy()
            .with_subgraph_url("https://graph.example/launchpad")
            .with_backend_url("https://api.example");
        assert_eq!(config.subgraph_url, "https://graph.example/launchpad");
        assert_eq!(config.backend_url, "https://api.example");
    }
}
