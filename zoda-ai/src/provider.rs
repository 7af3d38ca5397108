use async_trait::async_trait;
use reqwest::Client;
use serde_json::json;

use crate::models::{FortuneProviderConfig, ImageProviderConfig};
use crate::prompts;
use crate::traits::{FortuneProvider, ImageProvider};

pub const DEFAULT_FORTUNE_API_BASE: &str = "https://openrouter.ai/api/v1";
pub const DEFAULT_IMAGE_API_BASE: &str = "https://api.openai.com/v1";

/// OpenRouter chat-completion fortune provider
pub struct OpenRouterFortuneProvider {
    config: FortuneProviderConfig,
    client: Client,
}

impl OpenRouterFortuneProvider {
    /// Create a new OpenRouter provider with the given configuration
    pub fn new(config: FortuneProviderConfig) -> Self {
        let client = Client::new();
        Self { config, client }
    }
}

#[async_trait]
impl FortuneProvider for OpenRouterFortuneProvider {
    fn name(&self) -> &str {
        "openrouter"
    }

    async fn generate_fortune(
        &self,
        _username: &str,
        sign_name: &str,
        birth_year: i32,
    ) -> anyhow::Result<String> {
        let api_base = self
            .config
            .api_base
            .clone()
            .unwrap_or_else(|| DEFAULT_FORTUNE_API_BASE.to_string());

        let request_payload = json!({
            "model": self.config.model,
            "messages": [
                {
                    "role": "system",
                    "content": prompts::FORTUNE_SYSTEM_PROMPT,
                },
                {
                    "role": "user",
                    "content": prompts::fortune_prompt(sign_name, birth_year),
                },
            ],
            "max_tokens": prompts::FORTUNE_MAX_TOKENS,
        });

        tracing::debug!("Making API call to {}/chat/completions", api_base);

        let response = self
            .client
            .post(format!("{}/chat/completions", api_base))
            .header("Authorization", format!("Bearer {}", self.config.api_key))
            .header("HTTP-Referer", &self.config.referer)
            .header("X-Title", &self.config.app_title)
            .json(&request_payload)
            .send()
            .await?;

        let status = response.status();

        // Get the raw response text first for better error handling
        let response_text = response.text().await?;
        tracing::debug!("Raw API response: {}", response_text);

        if !status.is_success() {
            tracing::error!("Chat API returned {}: {}", status, response_text);
            return Err(anyhow::anyhow!("Chat API returned status {}", status));
        }

        let data = match serde_json::from_str::<serde_json::Value>(&response_text) {
            Ok(json) => json,
            Err(e) => {
                tracing::error!("Failed to parse API response as JSON: {:?}", e);
                return Err(anyhow::anyhow!("API returned non-JSON response: {}", e));
            }
        };

        extract_chat_content(&data)
    }
}

/// Extracts `choices[0].message.content` from a chat-completion body,
/// probing the `error` object first.
fn extract_chat_content(data: &serde_json::Value) -> anyhow::Result<String> {
    if let Some(error) = data.get("error") {
        let error_message = error
            .get("message")
            .and_then(|m| m.as_str())
            .unwrap_or("Unknown error");
        return Err(anyhow::anyhow!("API error: {}", error_message));
    }

    let choices = data
        .get("choices")
        .and_then(|c| c.as_array())
        .ok_or_else(|| anyhow::anyhow!("Response missing 'choices' array"))?;

    if choices.is_empty() {
        return Err(anyhow::anyhow!("No completions returned"));
    }

    let message = choices[0]
        .get("message")
        .ok_or_else(|| anyhow::anyhow!("Response choice missing 'message'"))?;

    let content = message
        .get("content")
        .and_then(|c| c.as_str())
        .ok_or_else(|| anyhow::anyhow!("Response message missing 'content'"))?
        .trim()
        .to_string();

    if content.is_empty() {
        return Err(anyhow::anyhow!("Response content is empty"));
    }

    Ok(content)
}

/// OpenAI image-generation provider
pub struct OpenAiImageProvider {
    config: ImageProviderConfig,
    client: Client,
}

impl OpenAiImageProvider {
    /// Create a new image provider with the given configuration
    pub fn new(config: ImageProviderConfig) -> Self {
        let client = Client::new();
        Self { config, client }
    }
}

#[async_trait]
impl ImageProvider for OpenAiImageProvider {
    fn name(&self) -> &str {
        "openai-images"
    }

    async fn generate_image(&self, prompt: &str) -> anyhow::Result<String> {
        let api_base = self
            .config
            .api_base
            .clone()
            .unwrap_or_else(|| DEFAULT_IMAGE_API_BASE.to_string());

        let request_payload = json!({
            "prompt": prompt,
            "n": 1,
            "size": self.config.size,
        });

        tracing::debug!("Making API call to {}/images/generations", api_base);

        let response = self
            .client
            .post(format!("{}/images/generations", api_base))
            .header("Authorization", format!("Bearer {}", self.config.api_key))
            .json(&request_payload)
            .send()
            .await?;

        let status = response.status();
        let response_text = response.text().await?;
        tracing::debug!("Raw API response: {}", response_text);

        if !status.is_success() {
            tracing::error!("Image API returned {}: {}", status, response_text);
            return Err(anyhow::anyhow!("Image API returned status {}", status));
        }

        let data = match serde_json::from_str::<serde_json::Value>(&response_text) {
            Ok(json) => json,
            Err(e) => {
                tracing::error!("Failed to parse API response as JSON: {:?}", e);
                return Err(anyhow::anyhow!("API returned non-JSON response: {}", e));
            }
        };

        extract_image_url(&data)
    }
}

/// Extracts the generated image from an images/generations body. Newer
/// API variants return `b64_json` instead of a hosted `url`; those are
/// surfaced as data URIs, which the IPFS upload path accepts as-is.
fn extract_image_url(data: &serde_json::Value) -> anyhow::Result<String> {
    if let Some(error) = data.get("error") {
        let error_message = error
            .get("message")
            .and_then(|m| m.as_str())
            .unwrap_or("Unknown error");
        return Err(anyhow::anyhow!("API error: {}", error_message));
    }

    let items = data
        .get("data")
        .and_then(|d| d.as_array())
        .ok_or_else(|| anyhow::anyhow!("Response missing 'data' array"))?;

    if items.is_empty() {
        return Err(anyhow::anyhow!("No images returned"));
    }

    if let Some(url) = items[0].get("url").and_then(|u| u.as_str()) {
        return Ok(url.to_string());
    }

    if let Some(b64) = items[0].get("b64_json").and_then(|b| b.as_str()) {
        return Ok(format!("data:image/png;base64,{}", b64));
    }

    Err(anyhow::anyhow!("Image entry missing both 'url' and 'b64_json'"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn chat_content_happy_path_is_trimmed() {
        let data = json!({
            "choices": [{ "message": { "content": "  The stars shine on you.  " } }]
        });
        assert_eq!(
            extract_chat_content(&data).unwrap(),
            "The stars shine on you."
        );
    }

    #[test]
    fn chat_error_object_wins_over_choices() {
        let data = json!({
            "error": { "message": "rate limited" },
            "choices": []
        });
        let err = extract_chat_content(&data).unwrap_err();
        assert!(err.to_string().contains("rate limited"));
    }

    #[test]
    fn chat_rejects_missing_or_empty_content() {
        assert!(extract_chat_content(&json!({})).is_err());
        assert!(extract_chat_content(&json!({ "choices": [] })).is_err());
        let empty = json!({ "choices": [{ "message": { "content": "   " } }] });
        assert!(extract_chat_content(&empty).is_err());
    }

    #[test]
    fn image_url_preferred_over_b64() {
        let data = json!({
            "data": [{ "url": "https://images.example/x.png", "b64_json": "abc" }]
        });
        assert_eq!(
            extract_image_url(&data).unwrap(),
            "https://images.example/x.png"
        );
    }

    #[test]
    fn image_b64_becomes_data_uri() {
        let data = json!({ "data": [{ "b64_json": "aGVsbG8=" }] });
        assert_eq!(
            extract_image_url(&data).unwrap(),
            "data:image/png;base64,aGVsbG8="
        );
    }

    #[test]
    fn image_rejects_empty_and_malformed_payloads() {
        assert!(extract_image_url(&json!({})).is_err());
        assert!(extract_image_url(&json!({ "data": [] })).is_err());
        assert!(extract_image_url(&json!({ "data": [{}] })).is_err());
    }
}
