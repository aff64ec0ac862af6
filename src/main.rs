//! Solana Wallet Bot
//!
//! Binary entry point: initialize tracing, load and validate
//! configuration, read secrets from the environment, wire the wallet
//! client, and run the Telegram polling loop.

use clap::Parser;
use std::path::PathBuf;
use std::time::Duration;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use url::Url;

use wallet_bot::bot::commands::BotContext;
use wallet_bot::bot::telegram::{self, TelegramApi, BOT_TOKEN_ENV_VAR};
use wallet_bot::config::load_config;
use wallet_bot::wallet::types::{Keypair, Pubkey};
use wallet_bot::wallet::{HttpRpcGateway, WalletClient};

#[derive(Debug, Parser)]
#[command(name = "wallet-bot", about = "Chat-driven Solana wallet")]
struct Args {
    /// Path to the TOML configuration file.
    #[arg(long, default_value = "wallet-bot.toml")]
    config: PathBuf,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "wallet_bot=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("wallet-bot v0.1.0 starting");

    let args = Args::parse();
    let config = load_config(&args.config)?;

    tracing::info!(
        rpc_url = %config.rpc.url,
        wallet_address = %config.wallet.address,
        "Configuration loaded"
    );

    // Secrets come from the environment, never from the config file.
    let token = std::env::var(BOT_TOKEN_ENV_VAR)
        .map_err(|_| format!("environment variable {} not set", BOT_TOKEN_ENV_VAR))?;
    let keypair = Keypair::from_env()?;

    // Already validated by the config loader.
    let wallet_address: Pubkey = config.wallet.address.parse()?;
    let endpoint: Url = config.rpc.url.parse()?;

    let gateway = HttpRpcGateway::new(endpoint, Duration::from_secs(config.rpc.timeout_secs))?;
    let client = WalletClient::new(gateway);

    tracing::info!(signer = %keypair.pubkey(), "Wallet client initialized");

    let ctx = BotContext {
        client,
        wallet_address,
        keypair,
    };
    let api = TelegramApi::new(&token, config.telegram.poll_timeout_secs)?;

    telegram::run(&api, &ctx).await
}
