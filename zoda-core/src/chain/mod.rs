// ========================================================
// File: zoda-core/src/chain/mod.rs
// ========================================================

pub mod abi;
pub mod minter;
pub mod rpc;
pub mod signer;
pub mod tx;

pub use minter::{MintOutcome, NftMinter};
pub use rpc::JsonRpcClient;
pub use signer::PrivateKeySigner;

use url::Url;
use zoda_common::Error;

/// Base Sepolia, where the fortune contract is deployed by default.
pub const DEFAULT_CHAIN_ID: u64 = 84532;
/// Fallback mint price when the contract's `mintFee()` cannot be read:
/// 0.0005 ETH in wei.
pub const DEFAULT_MINT_PRICE_WEI: u128 = 500_000_000_000_000;
pub const DEFAULT_GAS_LIMIT: u64 = 300_000;

/// Target-chain settings for the mint flow. Everything optional is
/// checked again at mint time so an unconfigured server can still run the
/// generation pipeline.
#[derive(Debug, Clone)]
pub struct ChainConfig {
    pub rpc_url: Option<String>,
    pub chain_id: u64,
    pub contract_address: Option<String>,
    pub private_key: Option<String>,
    pub mint_price_wei: u128,
    pub gas_limit: u64,
}

impl Default for ChainConfig {
    fn default() -> Self {
        Self {
            rpc_url: None,
            chain_id: DEFAULT_CHAIN_ID,
            contract_address: None,
            private_key: None,
            mint_price_wei: DEFAULT_MINT_PRICE_WEI,
            gas_limit: DEFAULT_GAS_LIMIT,
        }
    }
}

impl ChainConfig {
    /// Reads the `ZODA_*` chain settings, validating whatever is present.
    pub fn from_env() -> Result<Self, Error> {
        let mut config = Self::default();
        if let Some(raw) = env_nonempty("ZODA_RPC_URL") {
            Url::parse(&raw).map_err(|e| Error::Config(format!("ZODA_RPC_URL is invalid: {}", e)))?;
            config.rpc_url = Some(raw);
        }
        if let Some(raw) = env_nonempty("ZODA_CHAIN_ID") {
            config.chain_id = raw
                .parse()
                .map_err(|e| Error::Config(format!("ZODA_CHAIN_ID is invalid: {}", e)))?;
        }
        config.contract_address = env_nonempty("ZODA_CONTRACT_ADDRESS");
        config.private_key = env_nonempty("ZODA_PRIVATE_KEY");
        if let Some(raw) = env_nonempty("ZODA_MINT_PRICE_WEI") {
            config.mint_price_wei = raw
                .parse()
                .map_err(|e| Error::Config(format!("ZODA_MINT_PRICE_WEI is invalid: {}", e)))?;
        }
        if let Some(raw) = env_nonempty("ZODA_GAS_LIMIT") {
            config.gas_limit = raw
                .parse()
                .map_err(|e| Error::Config(format!("ZODA_GAS_LIMIT is invalid: {}", e)))?;
        }
        Ok(config)
    }
}

fn env_nonempty(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.trim().is_empty())
}

/// Display name used in operator-facing logs and errors.
pub fn network_name(chain_id: u64) -> String {
    match chain_id {
        8453 => "Base".to_string(),
        84532 => "Base Sepolia".to_string(),
        other => format!("chain {}", other),
    }
}

/// Parses a 20-byte `0x` address.
pub fn parse_address(address: &str) -> Result<[u8; 20], Error> {
    let digits = address.trim().strip_prefix("0x").unwrap_or(address.trim());
    let bytes =
        hex::decode(digits).map_err(|e| Error::Parse(format!("invalid address hex: {}", e)))?;
    bytes
        .try_into()
        .map_err(|_| Error::Parse(format!("address must be 20 bytes: {}", address)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_network_names() {
        assert_eq!(network_name(8453), "Base");
        assert_eq!(network_name(84532), "Base Sepolia");
        assert_eq!(network_name(1), "chain 1");
    }

    #[test]
    fn test_parse_address() {
        let parsed = parse_address("0x7e5f4552091a69125d5dfcb7b8c2659029395bdf").unwrap();
        assert_eq!(parsed[0], 0x7e);
        assert_eq!(parsed[19], 0xdf);
        assert!(parse_address("0x1234").is_err());
        assert!(parse_address("not an address").is_err());
    }

    #[test]
    fn test_default_config() {
        let config = ChainConfig::default();
        assert_eq!(config.chain_id, DEFAULT_CHAIN_ID);
        assert_eq!(config.mint_price_wei, 500_000_000_000_000);
        assert_eq!(config.gas_limit, 300_000);
        assert!(config.rpc_url.is_none());
    }
}
