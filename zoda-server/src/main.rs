// ========================================================
// File: zoda-server/src/main.rs
// ========================================================

use clap::Parser;
use tracing::{error, info};
use tracing_subscriber::{fmt, EnvFilter};

mod context;
mod http;
mod runs;

#[derive(Parser, Debug, Clone)]
#[command(name = "zoda")]
#[command(author, version, about = "Zoda - zodiac fortune generation and NFT minting service")]
pub struct Args {
    /// Mode: "serve", "fortune", or "mint"
    #[arg(long, default_value = "serve")]
    mode: String,

    /// Username, for the fortune and mint modes
    #[arg(long)]
    username: Option<String>,

    /// Birth year, for the fortune and mint modes
    #[arg(long)]
    birth_year: Option<i32>,

    /// Recipient address for mint mode; defaults to the signer's address
    #[arg(long)]
    recipient: Option<String>,
}

fn init_tracing() {
    let filter = EnvFilter::from_default_env()
        .add_directive("zoda_server=info".parse().unwrap_or_default())
        .add_directive("zoda_core=info".parse().unwrap_or_default())
        .add_directive("zoda_ai=info".parse().unwrap_or_default());
    let sub = fmt().with_env_filter(filter).finish();
    tracing::subscriber::set_global_default(sub)
        .expect("Failed to set global subscriber");
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenv::dotenv().ok();
    init_tracing();
    let args = Args::parse();
    info!("Zoda starting. mode={}", args.mode);

    match args.mode.as_str() {
        "serve" => {
            if let Err(e) = runs::run_server(&args).await {
                error!("Server error: {:?}", e);
            }
        }
        "fortune" => {
            if let Err(e) = runs::run_fortune(&args).await {
                error!("Fortune run error: {:?}", e);
            }
        }
        "mint" => {
            if let Err(e) = runs::run_mint(&args).await {
                error!("Mint run error: {:?}", e);
            }
        }
        other => {
            error!("Invalid mode '{}'. Use --mode=serve, --mode=fortune, or --mode=mint.", other);
        }
    }
    info!("Main finished. Goodbye!");
    Ok(())
}
