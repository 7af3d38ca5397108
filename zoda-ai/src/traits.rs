use async_trait::async_trait;
#[cfg(test)]
use mockall::automock;

/// Produces the fortune text for a resolved sign.
///
/// Implementations call out to a hosted chat-completion API; failures are
/// reported through `anyhow` and absorbed by [`crate::service::FortuneService`],
/// which owns the fallback policy.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait FortuneProvider: Send + Sync {
    fn name(&self) -> &str;

    async fn generate_fortune(
        &self,
        username: &str,
        sign_name: &str,
        birth_year: i32,
    ) -> anyhow::Result<String>;
}

/// Produces a character image for a prompt.
///
/// The returned string is either a transient remote URL or a
/// `data:image/png;base64,...` URI; both are accepted by the pinning path.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait ImageProvider: Send + Sync {
    fn name(&self) -> &str;

    async fn generate_image(&self, prompt: &str) -> anyhow::Result<String>;
}
