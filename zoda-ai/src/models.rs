use serde::{Deserialize, Serialize};

pub const DEFAULT_FORTUNE_MODEL: &str = "openai/gpt-4o-mini";
pub const DEFAULT_REFERER: &str = "https://zoda.codalabs.xyz";
pub const APP_TITLE: &str = "Zoda Fortune Teller";
pub const DEFAULT_IMAGE_SIZE: &str = "512x512";

/// Configuration for the chat-completion fortune provider.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FortuneProviderConfig {
    /// API key for authentication
    pub api_key: String,

    /// Base URL for API requests; the provider default is used when unset
    pub api_base: Option<String>,

    /// Model to request
    pub model: String,

    /// Sent as HTTP-Referer, which OpenRouter uses for app attribution
    pub referer: String,

    /// Sent as X-Title alongside the referer
    pub app_title: String,
}

impl FortuneProviderConfig {
    /// Reads `OPENROUTER_*` variables; `None` when no key is configured,
    /// in which case the fortune service runs on fallbacks alone.
    pub fn from_env() -> Option<Self> {
        let api_key = std::env::var("OPENROUTER_API_KEY")
            .ok()
            .filter(|k| !k.is_empty())?;
        Some(Self {
            api_key,
            api_base: std::env::var("OPENROUTER_API_BASE").ok(),
            model: std::env::var("OPENROUTER_MODEL")
                .unwrap_or_else(|_| DEFAULT_FORTUNE_MODEL.to_string()),
            referer: std::env::var("ZODA_APP_URL").unwrap_or_else(|_| DEFAULT_REFERER.to_string()),
            app_title: APP_TITLE.to_string(),
        })
    }

    /// Configuration with defaults for everything but the key.
    pub fn with_key(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            api_base: None,
            model: DEFAULT_FORTUNE_MODEL.to_string(),
            referer: DEFAULT_REFERER.to_string(),
            app_title: APP_TITLE.to_string(),
        }
    }
}

/// Configuration for the image-generation provider.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImageProviderConfig {
    pub api_key: String,
    pub api_base: Option<String>,

    /// Requested output size, e.g. "512x512"
    pub size: String,
}

impl ImageProviderConfig {
    /// Reads `OPENAI_*` variables; `None` when no key is configured. Image
    /// generation has no fallback, so an unconfigured provider surfaces as
    /// a configuration error at request time.
    pub fn from_env() -> Option<Self> {
        let api_key = std::env::var("OPENAI_API_KEY")
            .ok()
            .filter(|k| !k.is_empty())?;
        Some(Self {
            api_key,
            api_base: std::env::var("OPENAI_API_BASE").ok(),
            size: DEFAULT_IMAGE_SIZE.to_string(),
        })
    }

    pub fn with_key(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            api_base: None,
            size: DEFAULT_IMAGE_SIZE.to_string(),
        }
    }
}
