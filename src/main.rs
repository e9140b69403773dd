//! KeyProbe CLI.
//!
//! - `keyprobe check <provider>`: probe one key, print the result as JSON
//! - `keyprobe providers`: list supported providers
//! - `keyprobe serve`: HTTP surface (`/api/test/:provider`, `/api/health`)
//!
//! Logs go to stderr so stdout stays machine-readable. Keys are never
//! logged.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::io::BufRead;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;
use tracing::{debug, info};
use zeroize::Zeroizing;

use keyprobe::{server, Config, Dispatcher};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// YAML config file (timeout, endpoint overrides)
    #[arg(long, env = "KEYPROBE_CONFIG", global = true)]
    config: Option<PathBuf>,

    /// Per-probe timeout in seconds
    #[arg(long, env = "KEYPROBE_TIMEOUT_SECS", global = true)]
    timeout_secs: Option<u64>,

    /// Emit logs as JSON lines
    #[arg(long, env = "KEYPROBE_LOG_JSON", global = true)]
    log_json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Validate one key against one provider
    Check {
        provider: String,
        /// Key to test; read from stdin when omitted
        #[arg(long, env = "KEYPROBE_KEY", hide_env_values = true)]
        key: Option<String>,
    },
    /// List supported providers
    Providers {
        /// Print as JSON instead of a table
        #[arg(long)]
        json: bool,
    },
    /// Serve the HTTP API
    Serve {
        #[arg(long, env = "PORT", default_value_t = 3000)]
        port: u16,
        #[arg(long, default_value_t = IpAddr::V4(Ipv4Addr::LOCALHOST))]
        host: IpAddr,
    },
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let args = Args::parse();
    init_tracing(args.log_json);

    let mut config = Config::load(args.config.as_deref()).context("Failed to load config")?;
    if let Some(secs) = args.timeout_secs {
        config.timeout_secs = secs;
    }
    debug!(timeout_secs = config.timeout_secs, "Config ready");

    let dispatcher = Dispatcher::from_config(&config).context("Failed to build HTTP client")?;

    match args.command {
        Command::Check { provider, key } => {
            let key = match key {
                Some(k) => Zeroizing::new(k),
                None => read_key_from_stdin()?,
            };
            let result = dispatcher.validate(&provider, &key).await;
            println!("{}", serde_json::to_string_pretty(&result)?);
            Ok(if result.success() { ExitCode::SUCCESS } else { ExitCode::FAILURE })
        }
        Command::Providers { json: true } => {
            let entries: Vec<_> = dispatcher.registry().iter().collect();
            println!("{}", serde_json::to_string_pretty(&entries)?);
            Ok(ExitCode::SUCCESS)
        }
        Command::Providers { json: false } => {
            for entry in dispatcher.registry().iter() {
                println!("{:<10} {:<16} {}", entry.id, entry.display_name, entry.category.label());
            }
            println!("\n{} providers available", dispatcher.provider_count());
            Ok(ExitCode::SUCCESS)
        }
        Command::Serve { port, host } => {
            info!("🔑 KeyProbe v{}", env!("CARGO_PKG_VERSION"));
            server::serve(Arc::new(dispatcher), SocketAddr::new(host, port)).await?;
            Ok(ExitCode::SUCCESS)
        }
    }
}

fn init_tracing(json: bool) {
    let builder = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "keyprobe=info".into()),
        )
        .with_writer(std::io::stderr)
        .with_target(false);
    if json {
        builder.json().init();
    } else {
        builder.init();
    }
}

/// First line of stdin. An empty line is passed through so the
/// dispatcher reports the missing key.
fn read_key_from_stdin() -> Result<Zeroizing<String>> {
    let mut line = Zeroizing::new(String::new());
    std::io::stdin()
        .lock()
        .read_line(&mut line)
        .context("Failed to read key from stdin")?;
    Ok(line)
}
