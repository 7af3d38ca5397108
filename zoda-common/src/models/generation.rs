use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// What a caller hands the generation pipeline.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationRequest {
    pub username: String,
    pub birth_year: i32,
}

impl GenerationRequest {
    pub fn new(username: impl Into<String>, birth_year: i32) -> Self {
        Self {
            username: username.into(),
            birth_year,
        }
    }
}

/// Progress of a single pipeline run. Transitions only ever move forward
/// through the generating states; `Error` is reachable from any
/// in-progress state and, like `Completed`, is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GenerationStatus {
    Idle,
    GeneratingFortune,
    GeneratingImage,
    UploadingIpfs,
    Completed,
    Error,
}

impl GenerationStatus {
    pub fn is_terminal(&self) -> bool {
        matches!(self, GenerationStatus::Completed | GenerationStatus::Error)
    }

    pub fn is_in_progress(&self) -> bool {
        matches!(
            self,
            GenerationStatus::GeneratingFortune
                | GenerationStatus::GeneratingImage
                | GenerationStatus::UploadingIpfs
        )
    }
}

impl fmt::Display for GenerationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            GenerationStatus::Idle => "idle",
            GenerationStatus::GeneratingFortune => "generating_fortune",
            GenerationStatus::GeneratingImage => "generating_image",
            GenerationStatus::UploadingIpfs => "uploading_ipfs",
            GenerationStatus::Completed => "completed",
            GenerationStatus::Error => "error",
        };
        write!(f, "{}", s)
    }
}

/// Accumulated output of the pipeline. Fields fill in step by step and
/// the whole record is discarded on reset; nothing here is persisted.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GenerationResult {
    pub fortune: Option<String>,
    pub image_url: Option<String>,
    pub ipfs_hash: Option<String>,
    pub ipfs_url: Option<String>,
}

impl GenerationResult {
    pub fn is_complete(&self) -> bool {
        self.fortune.is_some()
            && self.image_url.is_some()
            && self.ipfs_hash.is_some()
            && self.ipfs_url.is_some()
    }
}

/// Terminal summary of one pipeline run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationReport {
    pub run_id: Uuid,
    pub username: String,
    pub birth_year: i32,
    pub sign_name: String,
    pub status: GenerationStatus,
    /// True when the fortune came from the static table rather than the
    /// chat API.
    pub fallback_fortune: bool,
    pub result: GenerationResult,
    pub error: Option<String>,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_classification() {
        assert!(!GenerationStatus::Idle.is_terminal());
        assert!(!GenerationStatus::Idle.is_in_progress());
        assert!(GenerationStatus::GeneratingFortune.is_in_progress());
        assert!(GenerationStatus::UploadingIpfs.is_in_progress());
        assert!(GenerationStatus::Completed.is_terminal());
        assert!(GenerationStatus::Error.is_terminal());
    }

    #[test]
    fn status_serializes_snake_case() {
        let s = serde_json::to_string(&GenerationStatus::GeneratingFortune).unwrap();
        assert_eq!(s, "\"generating_fortune\"");
        assert_eq!(GenerationStatus::UploadingIpfs.to_string(), "uploading_ipfs");
    }

    #[test]
    fn result_completeness() {
        let mut r = GenerationResult::default();
        assert!(!r.is_complete());
        r.fortune = Some("text".into());
        r.image_url = Some("https://x/y.png".into());
        r.ipfs_hash = Some("bafy123".into());
        assert!(!r.is_complete());
        r.ipfs_url = Some("https://gateway.pinata.cloud/ipfs/bafy123".into());
        assert!(r.is_complete());
    }
}
