//! # rexq - Remote Vertex Queries
//!
//! Command-line client for graph servers that speak the Rexster REST
//! protocol. Builds one query from flags, makes one GET request and prints
//! the edges, vertices, ids or count that come back.
//!
//! ## Usage
//!
//! ```bash
//! # Outgoing "knows" neighbours of vertex 1
//! rexq vertices --vertex 1 -d out -l knows
//!
//! # Count heavy incoming edges
//! rexq count --vertex 1 -d in --has weight,>,0.5
//!
//! # Show the request without sending it
//! rexq edges --vertex 1 --print-uri
//! ```
//!
//! Logs go to stderr; stdout carries results only.

mod cli;
mod config;

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

// =============================================================================
// APPLICATION ENTRY POINT
// =============================================================================

fn main() {
    let cli = cli::Cli::parse();

    // REXQ_LOG_FORMAT=json enables machine-parseable output.
    let log_format = std::env::var("REXQ_LOG_FORMAT").unwrap_or_else(|_| "text".to_string());
    let default_filter = if cli.verbose {
        "rexq=debug,rexq_core=debug"
    } else {
        "rexq=info,rexq_core=info"
    };
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| default_filter.into());

    match log_format.as_str() {
        "json" => {
            tracing_subscriber::registry()
                .with(filter)
                .with(
                    tracing_subscriber::fmt::layer()
                        .json()
                        .with_writer(std::io::stderr),
                )
                .init();
        }
        _ => {
            tracing_subscriber::registry()
                .with(filter)
                .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
                .init();
        }
    }

    if let Err(e) = cli::execute(cli) {
        tracing::error!("Error: {}", e);
        std::process::exit(1);
    }
}
