pub mod fallback;
pub mod models;
pub mod prompts;
pub mod provider;
pub mod service;
pub mod traits;

// Re-export public APIs
pub use models::{FortuneProviderConfig, ImageProviderConfig};
pub use provider::{OpenAiImageProvider, OpenRouterFortuneProvider};
pub use service::{FortuneOutcome, FortuneService};
pub use traits::{FortuneProvider, ImageProvider};
