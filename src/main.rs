use std::path::PathBuf;
use std::time::Duration;

use alloy_primitives::B256;
use anyhow::Context;
use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use txlens::config;
use txlens::infrastructure::{AlloyProvider, ExplorerClient};
use txlens::output::{render_json, render_text};
use txlens::{inspect, InspectContext, InspectError};

#[derive(Debug, Parser)]
#[command(
    name = "txlens",
    version,
    about = "Inspect an EVM transaction: classify it, decode the call and its token transfers"
)]
#[command(after_help = r#"ENVIRONMENT VARIABLES:
    ETHEREUM_RPC, ETHERSCAN_API_URL, ETHERSCAN_API_KEY
    BSC_RPC, BSCSCAN_API_URL, BSCSCAN_API_KEY
    POLYGON_RPC, POLYGONSCAN_API_URL, POLYGONSCAN_API_KEY
    FANTOM_RPC, FTMSCAN_API_URL, FTMSCAN_API_KEY
    OPTIMISM_RPC, OPTIMISM_SCAN_API_URL, OPTIMISM_SCAN_API_KEY
    ARBITRUM_RPC, ARBISCAN_API_URL, ARBISCAN_API_KEY
    TXLENS_CONFIG        Path to the config file

CONFIG FILE:
    Default: ~/.config/txlens/config.toml
"#)]
struct Args {
    /// Network name, case-insensitive (e.g. Ethereum, BSC, Polygon)
    network: String,

    /// Transaction hash (0x-prefixed, 32 bytes)
    tx_hash: String,

    /// Print the inspection as JSON
    #[arg(long)]
    json: bool,

    /// Deadline for each RPC and explorer request, in seconds
    #[arg(long, value_name = "SECS")]
    timeout: Option<u64>,

    /// Config file path
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() {
    let args = match Args::try_parse() {
        Ok(args) => args,
        Err(err) => {
            let code = if err.use_stderr() { 1 } else { 0 };
            let _ = err.print();
            std::process::exit(code);
        }
    };

    init_tracing(args.verbose);

    if let Err(err) = run(args) {
        eprintln!("error: {:#}", err);
        let code = err
            .downcast_ref::<InspectError>()
            .map(InspectError::exit_code)
            .unwrap_or(4);
        std::process::exit(code);
    }
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
        .with(filter)
        .init();
}

fn run(args: Args) -> anyhow::Result<()> {
    let hash: B256 = args.tx_hash.trim().parse().map_err(|_| {
        InspectError::Usage(format!(
            "\"{}\" is not a transaction hash (expected 0x followed by 64 hex digits)",
            args.tx_hash
        ))
    })?;

    let config = config::load(args.config.as_deref())?;
    let timeout = args
        .timeout
        .map(Duration::from_secs)
        .unwrap_or_else(|| config.timeout());
    if timeout.is_zero() {
        return Err(InspectError::Usage("--timeout must be at least 1 second".to_string()).into());
    }

    let registry = config.registry();
    let network = registry.resolve(&args.network)?;
    config::warn_missing_endpoints(network);

    let provider = AlloyProvider::connect(network, timeout)?;
    let explorer = ExplorerClient::new(network, timeout)?;

    let runtime = tokio::runtime::Runtime::new().context("failed to create Tokio runtime")?;
    let inspection = runtime.block_on(async {
        let ctx = InspectContext::new(network, &provider, &explorer);
        inspect(&ctx, hash).await
    })?;

    if args.json {
        println!("{}", render_json(&inspection).context("failed to serialize inspection")?);
    } else {
        print!("{}", render_text(&inspection));
    }

    Ok(())
}
