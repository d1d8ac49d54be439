//! POS register CLI - Terminal point-of-sale register.
//!
//! # Usage
//!
//! ```bash
//! # Start the interactive register (default)
//! pos
//! pos run
//!
//! # Look a single product up
//! pos lookup 4901234567894
//!
//! # Talk to a local backend
//! pos --api-url http://localhost:8000 run
//! ```
//!
//! # Commands
//!
//! - `run` - Interactive register: scan codes, add to the list, check out
//! - `lookup` - One-shot product lookup
//!
//! # Environment Variables
//!
//! - `POS_API_URL` - Base URL of the product/purchase API
//! - `POS_HTTP_TIMEOUT_SECS` - Request timeout in seconds
//! - `SENTRY_DSN` - Sentry error tracking DSN
//! - `RUST_LOG` - Log filter (logs go to stderr)

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};
use pos_register::RegisterConfig;
use sentry::integrations::tracing as sentry_tracing;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;

#[derive(Parser)]
#[command(name = "pos")]
#[command(author, version, about = "Point-of-sale register")]
struct Cli {
    /// Base URL of the product/purchase API (overrides `POS_API_URL`)
    #[arg(long, global = true)]
    api_url: Option<String>,

    /// Request timeout in seconds (overrides `POS_HTTP_TIMEOUT_SECS`)
    #[arg(long, global = true, value_parser = clap::value_parser!(u64).range(1..))]
    timeout_secs: Option<u64>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the interactive register
    Run,
    /// Look up a single product by code
    Lookup {
        /// Product code (up to 13 digits)
        code: String,
    },
}

/// Initialize Sentry error tracking and return guard that must be kept alive.
fn init_sentry(config: &RegisterConfig) -> Option<sentry::ClientInitGuard> {
    let dsn = config.sentry_dsn.as_ref()?;

    let guard = sentry::init((
        dsn.as_str(),
        sentry::ClientOptions {
            release: sentry::release_name!(),
            environment: config
                .sentry_environment
                .clone()
                .map(std::borrow::Cow::Owned),
            attach_stacktrace: true,
            ..Default::default()
        },
    ));

    tracing::info!("Sentry initialized");
    Some(guard)
}

/// Filter tracing events to Sentry event types.
fn sentry_event_filter(metadata: &tracing::Metadata<'_>) -> sentry_tracing::EventFilter {
    match *metadata.level() {
        tracing::Level::ERROR | tracing::Level::WARN => sentry_tracing::EventFilter::Event,
        tracing::Level::INFO | tracing::Level::DEBUG => sentry_tracing::EventFilter::Breadcrumb,
        _ => sentry_tracing::EventFilter::Ignore,
    }
}

/// Build the effective configuration: environment first, then CLI flags.
fn load_config(cli: &Cli) -> Result<RegisterConfig, pos_register::ConfigError> {
    let mut config = RegisterConfig::from_env()?;
    if let Some(url) = &cli.api_url {
        config = config.with_api_url(url)?;
    }
    if let Some(secs) = cli.timeout_secs {
        config = config.with_timeout_secs(secs);
    }
    Ok(config)
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // Initialize tracing with EnvFilter and Sentry integration
    // Logs go to stderr so they never interleave with the register display
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "pos_register=info,pos_register_cli=info".into());

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(sentry_tracing::layer().event_filter(sentry_event_filter))
        .init();

    let config = match load_config(&cli) {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("Invalid configuration: {e}");
            std::process::exit(2);
        }
    };

    let _sentry_guard = init_sentry(&config);

    let result: Result<(), Box<dyn std::error::Error>> = run(cli, &config).await;

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli, config: &RegisterConfig) -> Result<(), Box<dyn std::error::Error>> {
    match cli.command.unwrap_or(Commands::Run) {
        Commands::Run => commands::register::run(config).await?,
        Commands::Lookup { code } => commands::lookup::run(config, &code).await?,
    }
    Ok(())
}
