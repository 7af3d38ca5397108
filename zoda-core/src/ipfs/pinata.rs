// ========================================================
// File: zoda-core/src/ipfs/pinata.rs
// ========================================================

use async_trait::async_trait;
use reqwest::multipart;
use serde::Deserialize;
use serde_json::json;
use tracing::{debug, info};
use zoda_common::models::nft::NftMetadata;
use zoda_common::Error;

use super::{decode_data_uri, ensure_ipfs_uri, PinnedImage, PinningBackend};
use crate::media;

pub const DEFAULT_API_BASE: &str = "https://api.pinata.cloud";
pub const DEFAULT_GATEWAY_BASE: &str = "https://gateway.pinata.cloud";

/// Pinata credentials and endpoints, read from the environment.
#[derive(Debug, Clone)]
pub struct PinataConfig {
    pub api_key: String,
    pub secret_key: String,
    pub api_base: String,
    pub gateway_base: String,
}

impl PinataConfig {
    /// Builds a config from `PINATA_API_KEY` / `PINATA_SECRET_KEY`, or
    /// `None` when either credential is missing.
    pub fn from_env() -> Option<Self> {
        let api_key = std::env::var("PINATA_API_KEY")
            .ok()
            .filter(|k| !k.trim().is_empty())?;
        let secret_key = std::env::var("PINATA_SECRET_KEY")
            .ok()
            .filter(|k| !k.trim().is_empty())?;
        Some(Self {
            api_key,
            secret_key,
            api_base: std::env::var("PINATA_API_BASE").unwrap_or_else(|_| DEFAULT_API_BASE.to_string()),
            gateway_base: std::env::var("PINATA_GATEWAY_BASE")
                .unwrap_or_else(|_| DEFAULT_GATEWAY_BASE.to_string()),
        })
    }

    pub fn with_keys(api_key: impl Into<String>, secret_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            secret_key: secret_key.into(),
            api_base: DEFAULT_API_BASE.to_string(),
            gateway_base: DEFAULT_GATEWAY_BASE.to_string(),
        }
    }
}

/// Response shape of the classic pinning endpoints.
#[derive(Debug, Clone, Deserialize)]
pub struct PinResult {
    #[serde(rename = "IpfsHash")]
    pub ipfs_hash: String,
    #[serde(rename = "PinSize")]
    pub pin_size: u64,
    #[serde(rename = "Timestamp")]
    pub timestamp: String,
}

/// Client for Pinata's pinning API.
pub struct PinataClient {
    config: PinataConfig,
    client: reqwest::Client,
}

impl PinataClient {
    pub fn new(config: PinataConfig) -> Self {
        let config = PinataConfig {
            api_base: config.api_base.trim_end_matches('/').to_string(),
            gateway_base: config.gateway_base.trim_end_matches('/').to_string(),
            ..config
        };
        Self {
            config,
            client: reqwest::Client::new(),
        }
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/pinning/{}", self.config.api_base, path)
    }

    /// Public gateway URL for a pinned CID.
    pub fn gateway_url(&self, ipfs_hash: &str) -> String {
        format!("{}/ipfs/{}", self.config.gateway_base, ipfs_hash)
    }

    /// Pins raw file bytes under the given name, CIDv1.
    pub async fn pin_file(&self, data: Vec<u8>, file_name: &str) -> Result<PinResult, Error> {
        debug!("pinning {} bytes as '{}'", data.len(), file_name);
        let form = multipart::Form::new()
            .part(
                "file",
                multipart::Part::bytes(data).file_name(file_name.to_string()),
            )
            .text("pinataMetadata", json!({ "name": file_name }).to_string())
            .text("pinataOptions", json!({ "cidVersion": 1 }).to_string());

        let response = self
            .client
            .post(self.endpoint("pinFileToIPFS"))
            .header("pinata_api_key", &self.config.api_key)
            .header("pinata_secret_api_key", &self.config.secret_key)
            .multipart(form)
            .send()
            .await?;
        self.parse_pin_response(response).await
    }

    /// Pins a JSON document under the given name.
    pub async fn pin_json(&self, content: &serde_json::Value, name: &str) -> Result<PinResult, Error> {
        debug!("pinning JSON as '{}'", name);
        let body = json!({
            "pinataContent": content,
            "pinataMetadata": { "name": name },
        });
        let response = self
            .client
            .post(self.endpoint("pinJSONToIPFS"))
            .header("pinata_api_key", &self.config.api_key)
            .header("pinata_secret_api_key", &self.config.secret_key)
            .json(&body)
            .send()
            .await?;
        self.parse_pin_response(response).await
    }

    async fn parse_pin_response(&self, response: reqwest::Response) -> Result<PinResult, Error> {
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(Error::Upstream(format!(
                "Pinata returned status {}: {}",
                status, body
            )));
        }
        let result: PinResult = response.json().await?;
        info!(
            "pinned {} ({} bytes) at {}",
            result.ipfs_hash, result.pin_size, result.timestamp
        );
        Ok(result)
    }

    /// Resolves an image source to raw bytes. Base64 data URIs are decoded
    /// locally; anything else is fetched over HTTP.
    async fn load_image_bytes(&self, image_source: &str) -> Result<Vec<u8>, Error> {
        if image_source.starts_with("data:") {
            decode_data_uri(image_source)
        } else {
            media::fetch_remote_image(&self.client, image_source).await
        }
    }
}

#[async_trait]
impl PinningBackend for PinataClient {
    async fn pin_image(&self, image_source: &str) -> Result<PinnedImage, Error> {
        let bytes = self.load_image_bytes(image_source).await?;
        let file_name = format!("zoda-character-{}.png", chrono::Utc::now().timestamp_millis());
        let result = self.pin_file(bytes, &file_name).await?;
        Ok(PinnedImage {
            url: self.gateway_url(&result.ipfs_hash),
            ipfs_hash: result.ipfs_hash,
        })
    }

    async fn pin_metadata(&self, metadata: &NftMetadata) -> Result<String, Error> {
        let pin_name = format!("Zoda Fortune - {}", metadata.name);
        let content = serde_json::to_value(metadata)?;
        let result = self.pin_json(&content, &pin_name).await?;
        let uri = format!("ipfs://{}", result.ipfs_hash);
        ensure_ipfs_uri(&uri)?;
        Ok(uri)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_base_trailing_slash_is_trimmed() {
        let mut config = PinataConfig::with_keys("key", "secret");
        config.api_base = "https://api.pinata.cloud/".to_string();
        config.gateway_base = "https://gateway.pinata.cloud//".to_string();
        let client = PinataClient::new(config);
        assert_eq!(
            client.endpoint("pinFileToIPFS"),
            "https://api.pinata.cloud/pinning/pinFileToIPFS"
        );
        assert_eq!(
            client.gateway_url("QmHash"),
            "https://gateway.pinata.cloud/ipfs/QmHash"
        );
    }

    #[test]
    fn test_pin_result_parses_pinata_field_names() {
        let raw = r#"{"IpfsHash":"QmHash","PinSize":1234,"Timestamp":"2024-01-01T00:00:00Z"}"#;
        let result: PinResult = serde_json::from_str(raw).unwrap();
        assert_eq!(result.ipfs_hash, "QmHash");
        assert_eq!(result.pin_size, 1234);
    }
}
