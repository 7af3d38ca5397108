// ========================================================
// File: zoda-core/src/services/generation.rs
// ========================================================

use std::sync::Arc;

use chrono::Utc;
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use tracing::{debug, info, warn};
use uuid::Uuid;

use zoda_ai::prompts;
use zoda_ai::service::FortuneService;
use zoda_ai::traits::ImageProvider;
use zoda_common::models::generation::{
    GenerationReport, GenerationRequest, GenerationResult, GenerationStatus,
};
use zoda_common::models::zodiac;
use zoda_common::Error;

use crate::ipfs::PinningBackend;

/// Ledger key for in-flight runs. One generation at a time per
/// username, sign, and birth year; usernames compare case-insensitively.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct GenerationKey {
    username: String,
    sign: String,
    birth_year: i32,
}

impl GenerationKey {
    fn new(username: &str, sign: &str, birth_year: i32) -> Self {
        Self {
            username: username.trim().to_lowercase(),
            sign: sign.to_lowercase(),
            birth_year,
        }
    }
}

/// Runs the fortune, image, and pinning steps in order, tracking status
/// transitions and guaranteeing at most one active run per key.
pub struct GenerationPipeline {
    fortunes: Arc<FortuneService>,
    images: Option<Arc<dyn ImageProvider>>,
    pinning: Option<Arc<dyn PinningBackend>>,
    active: DashMap<GenerationKey, GenerationStatus>,
}

impl GenerationPipeline {
    pub fn new(
        fortunes: Arc<FortuneService>,
        images: Option<Arc<dyn ImageProvider>>,
        pinning: Option<Arc<dyn PinningBackend>>,
    ) -> Self {
        Self {
            fortunes,
            images,
            pinning,
            active: DashMap::new(),
        }
    }

    /// Current status of an in-flight run, or `None` when nothing is
    /// running for that user and year.
    pub fn active_status(&self, username: &str, birth_year: i32) -> Option<GenerationStatus> {
        let sign = zodiac::resolve(birth_year);
        let key = GenerationKey::new(username, sign.name, birth_year);
        self.active.get(&key).map(|status| *status)
    }

    /// Runs the full pipeline for one request. Returns `Err` only when the
    /// run never starts (bad input, or an identical run already in
    /// flight); failures inside the pipeline come back as a report in the
    /// `Error` state with partial results preserved for the log.
    pub async fn run(&self, request: &GenerationRequest) -> Result<GenerationReport, Error> {
        let username = request.username.trim();
        if username.is_empty() {
            return Err(Error::Validation("username is required".to_string()));
        }
        zodiac::validate_birth_year(request.birth_year)?;
        let sign = zodiac::resolve(request.birth_year);

        let key = GenerationKey::new(username, sign.name, request.birth_year);
        match self.active.entry(key.clone()) {
            Entry::Occupied(_) => {
                return Err(Error::Validation(format!(
                    "a fortune for {} ({}, born {}) is already being generated",
                    username, sign.name, request.birth_year
                )));
            }
            Entry::Vacant(slot) => {
                slot.insert(GenerationStatus::GeneratingFortune);
            }
        }

        let run_id = Uuid::new_v4();
        let started_at = Utc::now();
        info!(%run_id, username, sign = sign.name, year = request.birth_year, "generation run started");

        let mut result = GenerationResult::default();
        let mut fallback_fortune = false;
        let error = self
            .run_steps(&key, username, sign.name, &mut result, &mut fallback_fortune)
            .await
            .err();
        self.active.remove(&key);

        let status = if error.is_some() {
            GenerationStatus::Error
        } else {
            GenerationStatus::Completed
        };
        match &error {
            Some(e) => warn!(%run_id, error = %e, "generation run failed"),
            None => info!(%run_id, fallback = fallback_fortune, "generation run completed"),
        }

        Ok(GenerationReport {
            run_id,
            username: username.to_string(),
            birth_year: request.birth_year,
            sign_name: sign.name.to_string(),
            status,
            fallback_fortune,
            result,
            error: error.map(|e| e.to_string()),
            started_at,
            finished_at: Utc::now(),
        })
    }

    async fn run_steps(
        &self,
        key: &GenerationKey,
        username: &str,
        sign_name: &str,
        result: &mut GenerationResult,
        fallback_fortune: &mut bool,
    ) -> Result<(), Error> {
        let outcome = self.fortunes.fortune_for(username, sign_name, key.birth_year).await;
        *fallback_fortune = outcome.from_fallback;
        result.fortune = Some(outcome.text);

        self.transition(key, GenerationStatus::GeneratingImage);
        let images = self
            .images
            .as_ref()
            .ok_or_else(|| Error::Config("no image provider configured".to_string()))?;
        let image_url = images.generate_image(&prompts::image_prompt(sign_name)).await?;
        result.image_url = Some(image_url.clone());

        self.transition(key, GenerationStatus::UploadingIpfs);
        let pinning = self
            .pinning
            .as_ref()
            .ok_or_else(|| Error::Config("no pinning service configured".to_string()))?;
        let pinned = pinning.pin_image(&image_url).await?;
        result.ipfs_hash = Some(pinned.ipfs_hash);
        result.ipfs_url = Some(pinned.url);
        Ok(())
    }

    fn transition(&self, key: &GenerationKey, status: GenerationStatus) {
        debug!(username = %key.username, sign = %key.sign, ?status, "pipeline step");
        self.active.insert(key.clone(), status);
    }
}
