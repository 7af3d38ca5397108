// File: zoda-common/src/models/mod.rs
pub mod generation;
pub mod nft;
pub mod zodiac;

pub use generation::{GenerationReport, GenerationRequest, GenerationResult, GenerationStatus};
pub use nft::{NftAttribute, NftMetadata};
pub use zodiac::ZodiacSign;
