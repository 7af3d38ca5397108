use std::sync::Arc;

use crate::fallback;
use crate::traits::FortuneProvider;

/// Fortune text plus where it came from.
#[derive(Debug, Clone)]
pub struct FortuneOutcome {
    pub text: String,
    /// True when the text came from the static table instead of the API.
    pub from_fallback: bool,
}

/// Wraps a fortune provider with the fallback policy: this call never
/// fails and never returns empty text. An unconfigured provider, an
/// upstream error, or unusable content all land on the static table for
/// the requested sign (or the default list for an unknown sign).
pub struct FortuneService {
    provider: Option<Arc<dyn FortuneProvider>>,
}

impl FortuneService {
    pub fn new(provider: Option<Arc<dyn FortuneProvider>>) -> Self {
        Self { provider }
    }

    pub fn has_provider(&self) -> bool {
        self.provider.is_some()
    }

    pub async fn fortune_for(
        &self,
        username: &str,
        sign_name: &str,
        birth_year: i32,
    ) -> FortuneOutcome {
        match &self.provider {
            Some(provider) => {
                match provider.generate_fortune(username, sign_name, birth_year).await {
                    Ok(text) if !text.trim().is_empty() => FortuneOutcome {
                        text: text.trim().to_string(),
                        from_fallback: false,
                    },
                    Ok(_) => {
                        tracing::warn!(sign = sign_name, "provider returned empty fortune, using fallback");
                        self.fallback(sign_name)
                    }
                    Err(e) => {
                        tracing::warn!(sign = sign_name, error = %e, "fortune provider failed, using fallback");
                        self.fallback(sign_name)
                    }
                }
            }
            None => {
                tracing::debug!(sign = sign_name, "no fortune provider configured, using fallback");
                self.fallback(sign_name)
            }
        }
    }

    fn fallback(&self, sign_name: &str) -> FortuneOutcome {
        FortuneOutcome {
            text: fallback::pick_fallback(sign_name),
            from_fallback: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fallback::fortunes_for;
    use crate::traits::MockFortuneProvider;

    fn service_with(mock: MockFortuneProvider) -> FortuneService {
        FortuneService::new(Some(Arc::new(mock)))
    }

    #[tokio::test]
    async fn passes_provider_text_through() {
        let mut mock = MockFortuneProvider::new();
        mock.expect_generate_fortune()
            .returning(|_, _, _| Ok("  A bright path opens.  ".to_string()));
        let svc = service_with(mock);

        let out = svc.fortune_for("Alice", "Horse", 1990).await;
        assert_eq!(out.text, "A bright path opens.");
        assert!(!out.from_fallback);
    }

    #[tokio::test]
    async fn provider_failure_falls_back_to_sign_table() {
        let mut mock = MockFortuneProvider::new();
        mock.expect_generate_fortune()
            .returning(|_, _, _| Err(anyhow::anyhow!("upstream 500")));
        let svc = service_with(mock);

        let out = svc.fortune_for("Alice", "Horse", 1990).await;
        assert!(out.from_fallback);
        assert!(fortunes_for("Horse").contains(&out.text.as_str()));
    }

    #[tokio::test]
    async fn empty_provider_text_falls_back() {
        let mut mock = MockFortuneProvider::new();
        mock.expect_generate_fortune()
            .returning(|_, _, _| Ok("   ".to_string()));
        let svc = service_with(mock);

        let out = svc.fortune_for("Alice", "Rat", 1996).await;
        assert!(out.from_fallback);
        assert!(!out.text.is_empty());
    }

    #[tokio::test]
    async fn no_provider_falls_back() {
        let svc = FortuneService::new(None);
        let out = svc.fortune_for("Alice", "Pig", 1995).await;
        assert!(out.from_fallback);
        assert!(fortunes_for("Pig").contains(&out.text.as_str()));
    }

    #[tokio::test]
    async fn unknown_sign_uses_default_table() {
        let svc = FortuneService::new(None);
        let out = svc.fortune_for("Alice", "Unicorn", 1990).await;
        assert!(out.from_fallback);
        assert!(crate::fallback::DEFAULT_FORTUNES.contains(&out.text.as_str()));
    }
}
