// ========================================================
// File: zoda-core/src/media.rs
// ========================================================

use std::io::Cursor;

use image::imageops::FilterType;
use image::ImageFormat;
use tracing::debug;
use zoda_common::Error;

/// Character art is normalized to this square edge before serving.
pub const OUTPUT_EDGE: u32 = 512;

/// Fetches a remote image, surfacing non-2xx responses as upstream
/// failures.
pub async fn fetch_remote_image(client: &reqwest::Client, url: &str) -> Result<Vec<u8>, Error> {
    let response = client.get(url).send().await?;
    let status = response.status();
    if !status.is_success() {
        return Err(Error::Upstream(format!(
            "image fetch from {} returned status {}",
            url, status
        )));
    }
    Ok(response.bytes().await?.to_vec())
}

/// Decodes an image, resizes it to a square, and re-encodes it as JPEG.
/// JPEG has no alpha channel, so the pixels are flattened to RGB first.
pub fn resize_to_jpeg(data: &[u8], edge: u32) -> Result<Vec<u8>, Error> {
    let img = image::load_from_memory(data)
        .map_err(|e| Error::Image(format!("failed to decode image: {}", e)))?;
    debug!("resizing {}x{} image to {}x{}", img.width(), img.height(), edge, edge);
    let resized = img.resize_exact(edge, edge, FilterType::Lanczos3);
    let rgb = image::DynamicImage::ImageRgb8(resized.to_rgb8());
    let mut out = Cursor::new(Vec::new());
    rgb.write_to(&mut out, ImageFormat::Jpeg)
        .map_err(|e| Error::Image(format!("failed to encode JPEG: {}", e)))?;
    Ok(out.into_inner())
}
