//! zoda-server/src/context.rs
//!
//! Defines the runtime context (ServerContext) shared by the HTTP
//! handlers and the CLI runs.

use std::net::SocketAddr;
use std::sync::Arc;

use tracing::{info, warn};

use zoda_ai::service::FortuneService;
use zoda_ai::traits::{FortuneProvider, ImageProvider};
use zoda_ai::{
    FortuneProviderConfig, ImageProviderConfig, OpenAiImageProvider, OpenRouterFortuneProvider,
};
use zoda_common::Error;
use zoda_core::chain::{network_name, ChainConfig, NftMinter};
use zoda_core::ipfs::{PinataClient, PinataConfig, PinningBackend};
use zoda_core::services::GenerationPipeline;

pub const DEFAULT_BIND_ADDR: &str = "127.0.0.1:3000";

/// The bag of clients and services every request handler can reach. All
/// provider slots are optional so a partially configured server still
/// answers the endpoints it can.
pub struct ServerContext {
    pub bind_addr: SocketAddr,
    pub fortunes: Arc<FortuneService>,
    pub images: Option<Arc<dyn ImageProvider>>,
    pub pinning: Option<Arc<dyn PinningBackend>>,
    pub pipeline: Arc<GenerationPipeline>,
    pub minter: Arc<NftMinter>,
    pub http_client: reqwest::Client,
}

impl ServerContext {
    /// Builds the whole context from the process environment.
    pub fn new() -> Result<Self, Error> {
        // 1) Bind address
        let bind_addr: SocketAddr = std::env::var("ZODA_BIND_ADDR")
            .unwrap_or_else(|_| DEFAULT_BIND_ADDR.to_string())
            .parse()?;

        // 2) Fortune provider (optional; the service falls back to the
        //    static table without one)
        let fortune_provider: Option<Arc<dyn FortuneProvider>> =
            match FortuneProviderConfig::from_env() {
                Some(config) => {
                    let provider = OpenRouterFortuneProvider::new(config);
                    info!("fortune provider: {}", provider.name());
                    Some(Arc::new(provider))
                }
                None => {
                    warn!("OPENROUTER_API_KEY not set; serving fallback fortunes only");
                    None
                }
            };
        let fortunes = Arc::new(FortuneService::new(fortune_provider));

        // 3) Image provider
        let images: Option<Arc<dyn ImageProvider>> = match ImageProviderConfig::from_env() {
            Some(config) => {
                let provider = OpenAiImageProvider::new(config);
                info!("image provider: {}", provider.name());
                Some(Arc::new(provider))
            }
            None => {
                warn!("OPENAI_API_KEY not set; image generation disabled");
                None
            }
        };

        // 4) Pinning backend
        let pinning: Option<Arc<dyn PinningBackend>> = match PinataConfig::from_env() {
            Some(config) => Some(Arc::new(PinataClient::new(config))),
            None => {
                warn!("Pinata credentials not set; IPFS uploads disabled");
                None
            }
        };

        // 5) Chain client for the mint flow
        let chain_config = ChainConfig::from_env()?;
        info!(network = %network_name(chain_config.chain_id), "chain target");
        let minter = Arc::new(NftMinter::new(chain_config)?);
        if let Some(address) = minter.signer_address() {
            info!("mint signer: {}", address);
        }

        // 6) Pipeline over the assembled pieces
        let pipeline = Arc::new(GenerationPipeline::new(
            fortunes.clone(),
            images.clone(),
            pinning.clone(),
        ));

        Ok(Self {
            bind_addr,
            fortunes,
            images,
            pinning,
            pipeline,
            minter,
            http_client: reqwest::Client::new(),
        })
    }
}
