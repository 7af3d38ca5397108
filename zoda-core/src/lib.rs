// zoda-core/src/lib.rs

pub mod chain;
pub mod ipfs;
pub mod media;
pub mod services;

pub use chain::{ChainConfig, JsonRpcClient, MintOutcome, NftMinter, PrivateKeySigner};
pub use ipfs::{PinataClient, PinataConfig, PinnedImage, PinningBackend};
pub use services::GenerationPipeline;
