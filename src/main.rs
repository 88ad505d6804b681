//! Onchain Agent Actions CLI
//!
//! Command-line interface for listing and invoking the agent actions.

use clap::{Parser, Subcommand};
use onchain_agent_actions::actions::{request_faucet_funds, uniswap_v3_get_pool_slot0};
use onchain_agent_actions::contract::RpcContractReader;
use onchain_agent_actions::wallet::{HostedWallet, SecureWallet};
use onchain_agent_actions::{ActionRegistry, Config, Error, Result, RpcConfig};
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Environment variable holding the wallet's private key
const PRIVATE_KEY_ENV: &str = "PRIVATE_KEY";

#[derive(Parser)]
#[command(name = "agent-actions")]
#[command(about = "Agent-callable onchain actions")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Path to config file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// List every action with its prompt and input schema
    Actions,

    /// Invoke an action by name with JSON arguments
    Invoke {
        /// Action name (e.g. request_faucet_funds)
        #[arg(short, long)]
        name: String,

        /// Arguments as a JSON object
        #[arg(short, long, default_value = "{}")]
        args: String,
    },

    /// Request faucet funds for the wallet's default address
    Faucet {
        /// Asset to request (eth, usdc). Defaults to the network's default asset
        #[arg(long)]
        asset_id: Option<String>,
    },

    /// Read slot0 of a Uniswap V3 pool
    Slot0 {
        /// Network (base-sepolia, base-mainnet, ethereum-mainnet, polygon-mainnet, arbitrum-mainnet)
        #[arg(short, long)]
        network_id: String,

        /// Pool contract address
        #[arg(short, long)]
        pool: String,
    },

    /// Show current configuration
    Config,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present (ignore if not found)
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(filter)
        .init();

    let config = match cli.config {
        Some(path) => Config::from_file(&path)?,
        None => Config::default(),
    };

    match cli.command {
        Commands::Actions => {
            // Listing never touches the wallet, so no key is required
            let wallet = HostedWallet::new(SecureWallet::random(), &config, RpcConfig::from_env());
            let registry = ActionRegistry::standard(Arc::new(wallet), reader());
            println!("{}", serde_json::to_string_pretty(&registry.descriptors())?);
        }
        Commands::Invoke { name, args } => {
            let args: serde_json::Value = serde_json::from_str(&args)
                .map_err(|e| Error::InvalidArgument(format!("--args is not JSON: {}", e)))?;
            let registry = ActionRegistry::standard(Arc::new(load_wallet(&config)?), reader());
            println!("{}", registry.invoke(&name, args).await?);
        }
        Commands::Faucet { asset_id } => {
            let wallet = load_wallet(&config)?;
            println!("{}", request_faucet_funds(&wallet, asset_id.as_deref()).await?);
        }
        Commands::Slot0 { network_id, pool } => {
            let reader = reader();
            println!(
                "{}",
                uniswap_v3_get_pool_slot0(reader.as_ref(), &network_id, &pool).await?
            );
        }
        Commands::Config => {
            println!("{}", serde_json::to_string_pretty(&config)?);
        }
    }

    Ok(())
}

fn load_wallet(config: &Config) -> Result<HostedWallet> {
    let signer = SecureWallet::from_env(PRIVATE_KEY_ENV)?;
    tracing::info!(
        address = %signer.address(),
        network = %config.network_id,
        "Loaded wallet from PRIVATE_KEY"
    );
    Ok(HostedWallet::new(signer, config, RpcConfig::from_env()))
}

fn reader() -> Arc<RpcContractReader> {
    Arc::new(RpcContractReader::from_env())
}
