//! # quote
//!
//! Prices a cart from the command line.
//!
//! ```text
//! quote cart.json            # read the request from a file
//! echo '{...}' | quote       # or from stdin
//! ```
//!
//! Logs go to stderr (`RUST_LOG` filters them); the priced cart is printed
//! to stdout as JSON.

use std::path::PathBuf;

use anyhow::Context;
use tokio::io::AsyncReadExt;
use tracing::info;
use tracing_subscriber::EnvFilter;

use zhilak_commerce::config::CommerceConfig;
use zhilak_commerce::quote::{quote, QuoteRequest};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    let config = CommerceConfig::load_or_default(None);
    info!(store = %config.store.name, currency = %config.store.currency, "Configuration loaded");

    let input = match std::env::args_os().nth(1).map(PathBuf::from) {
        Some(path) => tokio::fs::read_to_string(&path)
            .await
            .with_context(|| format!("failed to read {}", path.display()))?,
        None => {
            let mut buf = String::new();
            tokio::io::stdin()
                .read_to_string(&mut buf)
                .await
                .context("failed to read stdin")?;
            buf
        }
    };

    let request: QuoteRequest =
        serde_json::from_str(&input).context("request is not a valid quote document")?;
    let response = quote(&request, &config).context("cannot price request")?;

    println!("{}", serde_json::to_string_pretty(&response)?);
    Ok(())
}
