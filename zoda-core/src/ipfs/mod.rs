// ========================================================
// File: zoda-core/src/ipfs/mod.rs
// ========================================================

pub mod pinata;

pub use pinata::{PinResult, PinataClient, PinataConfig};

use async_trait::async_trait;
use base64::Engine;
use zoda_common::models::nft::NftMetadata;
use zoda_common::Error;

/// A pinned character image: the bare CID plus a gateway URL the frontend
/// can render.
#[derive(Debug, Clone)]
pub struct PinnedImage {
    pub ipfs_hash: String,
    pub url: String,
}

/// Seam over the pinning service so the pipeline and drivers can be tested
/// without network access.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PinningBackend: Send + Sync {
    /// Pins the image behind `image_source`, which is either a base64
    /// `data:` URI or a remote URL.
    async fn pin_image(&self, image_source: &str) -> Result<PinnedImage, Error>;

    /// Pins NFT metadata as JSON and returns its `ipfs://` URI.
    async fn pin_metadata(&self, metadata: &NftMetadata) -> Result<String, Error>;
}

/// Decodes the payload of a base64 `data:` URI.
pub fn decode_data_uri(uri: &str) -> Result<Vec<u8>, Error> {
    let payload = uri
        .split_once(',')
        .map(|(_, payload)| payload)
        .ok_or_else(|| Error::Validation("malformed data URI: no comma separator".to_string()))?;
    base64::engine::general_purpose::STANDARD
        .decode(payload.trim())
        .map_err(|e| Error::Validation(format!("malformed data URI payload: {}", e)))
}

/// Token metadata handed to the mint flow must live on IPFS, not on an
/// HTTP gateway.
pub fn ensure_ipfs_uri(uri: &str) -> Result<(), Error> {
    if uri.starts_with("ipfs://") && uri.len() > "ipfs://".len() {
        Ok(())
    } else {
        Err(Error::InvalidUri(format!(
            "expected an ipfs:// URI, got '{}'",
            uri
        )))
    }
}
