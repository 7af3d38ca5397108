// ========================================================
// File: zoda-core/src/chain/minter.rs
// ========================================================

use std::time::Duration;

use serde::Serialize;
use serde_json::Value;
use tracing::{debug, info, warn};
use zoda_common::Error;

use super::abi;
use super::rpc::JsonRpcClient;
use super::signer::PrivateKeySigner;
use super::tx::LegacyTransaction;
use super::{network_name, parse_address, ChainConfig};
use crate::ipfs::ensure_ipfs_uri;

const MINT_SIGNATURE: &str = "mint(address,string)";
const MINT_FEE_SIGNATURE: &str = "mintFee()";
const TOKEN_URI_SIGNATURE: &str = "tokenURI(uint256)";
const OWNER_OF_SIGNATURE: &str = "ownerOf(uint256)";
const NFT_MINTED_SIGNATURE: &str = "NFTMinted(address,uint256,string)";

const RECEIPT_POLL_INTERVAL: Duration = Duration::from_secs(2);
const RECEIPT_POLL_ATTEMPTS: u32 = 60;

/// A confirmed mint, including the post-mint verification reads.
#[derive(Debug, Clone, Serialize)]
pub struct MintOutcome {
    pub transaction_hash: String,
    pub block_number: u64,
    pub token_id: u128,
    pub token_uri: String,
    pub owner: String,
}

/// Drives the full mint flow: precondition checks, fee discovery,
/// transaction submission, and receipt verification.
pub struct NftMinter {
    config: ChainConfig,
    rpc: Option<JsonRpcClient>,
    signer: Option<PrivateKeySigner>,
}

impl NftMinter {
    /// A present-but-malformed private key is rejected here rather than at
    /// mint time.
    pub fn new(config: ChainConfig) -> Result<Self, Error> {
        let rpc = config.rpc_url.as_ref().map(JsonRpcClient::new);
        let signer = match config.private_key.as_deref() {
            Some(key) => Some(PrivateKeySigner::from_hex(key)?),
            None => None,
        };
        Ok(Self { config, rpc, signer })
    }

    pub fn signer_address(&self) -> Option<String> {
        self.signer.as_ref().map(PrivateKeySigner::address_hex)
    }

    pub fn chain_id(&self) -> u64 {
        self.config.chain_id
    }

    /// Checks every mint precondition in a fixed order so failures are
    /// reported consistently: signer, contract address, RPC endpoint and
    /// chain id, then the metadata URI itself.
    async fn check_preconditions(
        &self,
        metadata_uri: &str,
    ) -> Result<(&JsonRpcClient, &PrivateKeySigner, [u8; 20]), Error> {
        let signer = self
            .signer
            .as_ref()
            .ok_or_else(|| Error::Chain("no signing key configured".to_string()))?;
        let contract_hex = self
            .config
            .contract_address
            .as_deref()
            .ok_or_else(|| Error::Chain("no contract address configured".to_string()))?;
        let contract = parse_address(contract_hex)
            .map_err(|_| Error::Chain(format!("invalid contract address: {}", contract_hex)))?;
        let rpc = self
            .rpc
            .as_ref()
            .ok_or_else(|| Error::Chain("no RPC URL configured".to_string()))?;
        let actual = rpc.chain_id().await?;
        if actual != self.config.chain_id {
            return Err(Error::NetworkMismatch {
                expected: self.config.chain_id,
                actual,
            });
        }
        ensure_ipfs_uri(metadata_uri)?;
        Ok((rpc, signer, contract))
    }

    /// Mints a token carrying `metadata_uri` to `recipient`, or to the
    /// signer's own address when no recipient is given. Returns only after
    /// the transaction is confirmed and the token has been read back.
    pub async fn mint(
        &self,
        recipient: Option<&str>,
        metadata_uri: &str,
    ) -> Result<MintOutcome, Error> {
        let (rpc, signer, contract) = self.check_preconditions(metadata_uri).await?;
        let to = match recipient {
            Some(address) => parse_address(address)
                .map_err(|_| Error::Validation(format!("invalid recipient address: {}", address)))?,
            None => signer.address(),
        };
        let contract_hex = format!("0x{}", hex::encode(contract));

        let fee = match self.read_mint_fee(rpc, &contract_hex).await {
            Ok(fee) => fee,
            Err(e) => {
                warn!(error = %e, "mintFee() read failed, using configured price");
                self.config.mint_price_wei
            }
        };

        let nonce = rpc.transaction_count(&signer.address_hex()).await?;
        let gas_price = rpc.gas_price().await?;
        let calldata =
            abi::encode_call_address_string(abi::selector(MINT_SIGNATURE), &to, metadata_uri);
        let tx = LegacyTransaction {
            nonce,
            gas_price,
            gas_limit: self.config.gas_limit,
            to: contract,
            value: fee,
            data: calldata,
            chain_id: self.config.chain_id,
        };
        let raw = tx.sign(signer.key())?;
        let transaction_hash = rpc.send_raw_transaction(&raw).await?;
        info!(
            tx = %transaction_hash,
            network = %network_name(self.config.chain_id),
            value_wei = fee,
            "mint transaction submitted"
        );

        let receipt = self.wait_for_receipt(rpc, &transaction_hash).await?;
        let status = receipt.get("status").and_then(Value::as_str).unwrap_or("");
        if status != "0x1" {
            return Err(Error::Chain(format!(
                "mint transaction {} reverted",
                transaction_hash
            )));
        }
        let block_hex = receipt
            .get("blockNumber")
            .and_then(Value::as_str)
            .ok_or_else(|| Error::Chain("receipt missing blockNumber".to_string()))?;
        let block_number = u64::try_from(abi::decode_uint(block_hex)?)
            .map_err(|_| Error::Parse(format!("block number out of range: {}", block_hex)))?;
        let token_id = decode_minted_token_id(&receipt)?;
        info!(token_id, block_number, "mint confirmed");

        let token_uri = self.read_token_uri(rpc, &contract_hex, token_id).await?;
        let owner = self.read_owner(rpc, &contract_hex, token_id).await?;
        Ok(MintOutcome {
            transaction_hash,
            block_number,
            token_id,
            token_uri,
            owner,
        })
    }

    async fn read_mint_fee(&self, rpc: &JsonRpcClient, contract: &str) -> Result<u128, Error> {
        let data = abi::encode_call_no_args(abi::selector(MINT_FEE_SIGNATURE));
        let result = rpc.eth_call(contract, &data).await?;
        abi::decode_uint(&result)
    }

    async fn read_token_uri(
        &self,
        rpc: &JsonRpcClient,
        contract: &str,
        token_id: u128,
    ) -> Result<String, Error> {
        let data = abi::encode_call_uint(abi::selector(TOKEN_URI_SIGNATURE), token_id);
        let result = rpc.eth_call(contract, &data).await?;
        abi::decode_string_return(&result)
    }

    async fn read_owner(
        &self,
        rpc: &JsonRpcClient,
        contract: &str,
        token_id: u128,
    ) -> Result<String, Error> {
        let data = abi::encode_call_uint(abi::selector(OWNER_OF_SIGNATURE), token_id);
        let result = rpc.eth_call(contract, &data).await?;
        abi::decode_address_word(&result)
    }

    async fn wait_for_receipt(
        &self,
        rpc: &JsonRpcClient,
        tx_hash: &str,
    ) -> Result<Value, Error> {
        for attempt in 1..=RECEIPT_POLL_ATTEMPTS {
            if let Some(receipt) = rpc.transaction_receipt(tx_hash).await? {
                return Ok(receipt);
            }
            debug!(tx = %tx_hash, attempt, "receipt not yet available");
            tokio::time::sleep(RECEIPT_POLL_INTERVAL).await;
        }
        Err(Error::Chain(format!(
            "timed out waiting for receipt of {}",
            tx_hash
        )))
    }
}

/// Pulls the minted token id out of the `NFTMinted` event. The token id is
/// the second indexed topic.
fn decode_minted_token_id(receipt: &Value) -> Result<u128, Error> {
    let expected_topic = format!("0x{}", hex::encode(abi::event_topic(NFT_MINTED_SIGNATURE)));
    let logs = receipt
        .get("logs")
        .and_then(Value::as_array)
        .ok_or_else(|| Error::Chain("receipt has no logs".to_string()))?;
    for log in logs {
        let Some(topics) = log.get("topics").and_then(Value::as_array) else {
            continue;
        };
        let matches_event = topics
            .first()
            .and_then(Value::as_str)
            .map(|topic| topic.eq_ignore_ascii_case(&expected_topic))
            .unwrap_or(false);
        if matches_event {
            let raw = topics
                .get(2)
                .and_then(Value::as_str)
                .ok_or_else(|| Error::Chain("mint event missing token id topic".to_string()))?;
            return abi::decode_uint(raw);
        }
    }
    Err(Error::Chain("no mint event found in receipt".to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const MINT_TOPIC: &str = "0xd35bb95e09c04b219e35047ce7b7b300e3384264ef84a40456943dbc0fc17c14";

    fn receipt_with_logs(logs: Value) -> Value {
        json!({ "status": "0x1", "blockNumber": "0x10", "logs": logs })
    }

    #[test]
    fn test_token_id_from_mint_event() {
        let receipt = receipt_with_logs(json!([
            {
                // An unrelated Transfer-style log that must be skipped.
                "topics": ["0xddf252ad1be2c89b69c2b068fc378daa952ba7f163c4a11628f55a4df523b3ef"]
            },
            {
                "topics": [
                    MINT_TOPIC,
                    "0x0000000000000000000000007e5f4552091a69125d5dfcb7b8c2659029395bdf",
                    "0x0000000000000000000000000000000000000000000000000000000000000007"
                ]
            }
        ]));
        assert_eq!(decode_minted_token_id(&receipt).unwrap(), 7);
    }

    #[test]
    fn test_missing_mint_event_is_an_error() {
        let receipt = receipt_with_logs(json!([]));
        assert!(matches!(
            decode_minted_token_id(&receipt),
            Err(Error::Chain(_))
        ));
    }

    #[test]
    fn test_mint_event_without_token_topic_is_an_error() {
        let receipt = receipt_with_logs(json!([{ "topics": [MINT_TOPIC] }]));
        assert!(matches!(
            decode_minted_token_id(&receipt),
            Err(Error::Chain(_))
        ));
    }
}
