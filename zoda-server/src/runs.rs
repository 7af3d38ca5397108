// ========================================================
// File: zoda-server/src/runs.rs
// ========================================================
// The three CLI modes: the HTTP server and the two scripted flows.

use std::sync::Arc;

use tracing::info;
use zoda_common::models::generation::{GenerationReport, GenerationRequest, GenerationStatus};
use zoda_common::models::nft::NftMetadata;
use zoda_common::models::zodiac;
use zoda_common::Error;

use crate::context::ServerContext;
use crate::{http, Args};

/// Runs the HTTP API until Ctrl-C.
pub async fn run_server(_args: &Args) -> Result<(), Error> {
    let ctx = Arc::new(ServerContext::new()?);
    let (_addr, shutdown_tx, server_handle) = http::start_http_server(ctx).await?;

    if let Err(e) = tokio::signal::ctrl_c().await {
        return Err(Error::Io(e));
    }
    info!("Ctrl-C detected; shutting down HTTP server...");
    let _ = shutdown_tx.send(());
    let _ = server_handle.await;
    Ok(())
}

/// Runs the generation pipeline once and prints the report.
pub async fn run_fortune(args: &Args) -> Result<(), Error> {
    let request = request_from(args)?;
    let ctx = ServerContext::new()?;
    let report = ctx.pipeline.run(&request).await?;
    print_report(&report)?;
    if report.status == GenerationStatus::Error {
        return Err(Error::Upstream(
            report.error.unwrap_or_else(|| "generation failed".to_string()),
        ));
    }
    Ok(())
}

/// The full scripted mint: generation, metadata upload, mint transaction,
/// and the post-mint verification reads.
pub async fn run_mint(args: &Args) -> Result<(), Error> {
    let request = request_from(args)?;
    let ctx = ServerContext::new()?;

    // 1) Generate fortune, image, and pinned art
    let report = ctx.pipeline.run(&request).await?;
    print_report(&report)?;
    if report.status != GenerationStatus::Completed {
        return Err(Error::Upstream(
            report.error.unwrap_or_else(|| "generation failed".to_string()),
        ));
    }
    let (Some(fortune), Some(ipfs_url)) =
        (report.result.fortune.as_deref(), report.result.ipfs_url.as_deref())
    else {
        return Err(Error::Upstream("generation result is incomplete".to_string()));
    };

    // 2) Pin the token metadata
    let sign = zodiac::resolve(request.birth_year);
    let metadata = NftMetadata::for_fortune(
        request.username.trim(),
        sign.name,
        request.birth_year,
        fortune,
        ipfs_url,
    );
    let pinning = ctx
        .pinning
        .as_ref()
        .ok_or_else(|| Error::Config("Pinata API keys not configured".to_string()))?;
    let metadata_uri = pinning.pin_metadata(&metadata).await?;
    info!(uri = %metadata_uri, "token metadata pinned");

    // 3) Mint and verify
    let outcome = ctx
        .minter
        .mint(args.recipient.as_deref(), &metadata_uri)
        .await?;
    info!(
        tx = %outcome.transaction_hash,
        token_id = outcome.token_id,
        owner = %outcome.owner,
        "mint verified"
    );
    println!("{}", serde_json::to_string_pretty(&outcome)?);
    Ok(())
}

fn request_from(args: &Args) -> Result<GenerationRequest, Error> {
    let username = args
        .username
        .as_deref()
        .ok_or_else(|| Error::Validation("--username is required for this mode".to_string()))?;
    let birth_year = args
        .birth_year
        .ok_or_else(|| Error::Validation("--birth-year is required for this mode".to_string()))?;
    Ok(GenerationRequest::new(username, birth_year))
}

fn print_report(report: &GenerationReport) -> Result<(), Error> {
    println!("{}", serde_json::to_string_pretty(report)?);
    Ok(())
}
