// ========================================================
// File: zoda-server/src/http/handlers.rs
// ========================================================

use std::sync::Arc;

use axum::extract::State;
use axum::http::header;
use axum::http::HeaderName;
use axum::Json;
use serde::{Deserialize, Serialize};
use zoda_common::models::nft::{NftAttribute, NftMetadata};
use zoda_common::Error;
use zoda_core::media;

use super::error::ApiError;
use crate::context::ServerContext;

const JPEG_CACHE_CONTROL: &str = "public, max-age=31536000";

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FortuneApiRequest {
    #[serde(default)]
    username: String,
    #[serde(default)]
    sign: String,
    #[serde(default)]
    birth_year: Option<i32>,
}

#[derive(Debug, Serialize)]
pub struct FortuneApiResponse {
    fortune: String,
}

pub async fn generate_fortune(
    State(ctx): State<Arc<ServerContext>>,
    Json(request): Json<FortuneApiRequest>,
) -> Result<Json<FortuneApiResponse>, ApiError> {
    let (username, sign) = (request.username.trim(), request.sign.trim());
    let Some(birth_year) = request.birth_year else {
        return Err(missing_fortune_fields());
    };
    if username.is_empty() || sign.is_empty() {
        return Err(missing_fortune_fields());
    }
    let outcome = ctx.fortunes.fortune_for(username, sign, birth_year).await;
    Ok(Json(FortuneApiResponse {
        fortune: outcome.text,
    }))
}

fn missing_fortune_fields() -> ApiError {
    Error::Validation("Username, sign, and birth year are required".to_string()).into()
}

#[derive(Debug, Deserialize)]
pub struct ImageApiRequest {
    #[serde(default)]
    prompt: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageApiResponse {
    image_url: String,
}

pub async fn generate_image(
    State(ctx): State<Arc<ServerContext>>,
    Json(request): Json<ImageApiRequest>,
) -> Result<Json<ImageApiResponse>, ApiError> {
    let prompt = request.prompt.trim();
    if prompt.is_empty() {
        return Err(Error::Validation("Prompt is required".to_string()).into());
    }
    let provider = ctx
        .images
        .as_ref()
        .ok_or_else(|| Error::Config("OpenAI API key not configured".to_string()))?;
    let image_url = provider.generate_image(prompt).await.map_err(Error::from)?;
    Ok(Json(ImageApiResponse { image_url }))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IpfsUploadRequest {
    #[serde(default)]
    image_url: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IpfsUploadResponse {
    ipfs_hash: String,
    url: String,
}

pub async fn upload_to_ipfs(
    State(ctx): State<Arc<ServerContext>>,
    Json(request): Json<IpfsUploadRequest>,
) -> Result<Json<IpfsUploadResponse>, ApiError> {
    let image_url = request.image_url.trim();
    if image_url.is_empty() {
        return Err(Error::Validation("Image URL is required".to_string()).into());
    }
    let pinning = ctx
        .pinning
        .as_ref()
        .ok_or_else(|| Error::Config("Pinata API keys not configured".to_string()))?;
    let pinned = pinning.pin_image(image_url).await?;
    Ok(Json(IpfsUploadResponse {
        ipfs_hash: pinned.ipfs_hash,
        url: pinned.url,
    }))
}

#[derive(Debug, Deserialize)]
pub struct MetadataUploadRequest {
    #[serde(default)]
    name: String,
    #[serde(default)]
    description: String,
    #[serde(default)]
    image: String,
    #[serde(default)]
    attributes: Vec<NftAttribute>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MetadataUploadResponse {
    metadata_url: String,
}

pub async fn upload_metadata(
    State(ctx): State<Arc<ServerContext>>,
    Json(request): Json<MetadataUploadRequest>,
) -> Result<Json<MetadataUploadResponse>, ApiError> {
    if request.name.trim().is_empty()
        || request.description.trim().is_empty()
        || request.image.trim().is_empty()
    {
        return Err(
            Error::Validation("Name, description, and image are required".to_string()).into(),
        );
    }
    let pinning = ctx
        .pinning
        .as_ref()
        .ok_or_else(|| Error::Config("Pinata API keys not configured".to_string()))?;
    let metadata = NftMetadata {
        name: request.name,
        description: request.description,
        image: request.image,
        attributes: request.attributes,
    };
    let metadata_url = pinning.pin_metadata(&metadata).await?;
    Ok(Json(MetadataUploadResponse { metadata_url }))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResizeApiRequest {
    #[serde(default)]
    image_url: String,
}

/// Fetches a remote image and re-serves it as a 512x512 JPEG with a
/// year-long cache header, so gateway art renders consistently.
pub async fn fetch_and_resize_image(
    State(ctx): State<Arc<ServerContext>>,
    Json(request): Json<ResizeApiRequest>,
) -> Result<([(HeaderName, &'static str); 2], Vec<u8>), ApiError> {
    let image_url = request.image_url.trim();
    if image_url.is_empty() {
        return Err(Error::Validation("Image URL is required".to_string()).into());
    }
    let bytes = media::fetch_remote_image(&ctx.http_client, image_url).await?;
    let jpeg = media::resize_to_jpeg(&bytes, media::OUTPUT_EDGE)?;
    Ok((
        [
            (header::CONTENT_TYPE, "image/jpeg"),
            (header::CACHE_CONTROL, JPEG_CACHE_CONTROL),
        ],
        jpeg,
    ))
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    status: &'static str,
    service: &'static str,
    version: &'static str,
}

pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        service: "zoda-server",
        version: env!("CARGO_PKG_VERSION"),
    })
}
