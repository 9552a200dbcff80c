//! # rexq CLI Module
//!
//! This module implements the command-line interface for rexq.
//!
//! ## Available Commands
//!
//! - `edges` - List edges incident to a vertex
//! - `vertices` - List adjacent vertices
//! - `count` - Count incident edges
//! - `ids` - List adjacent vertex ids
//!
//! Every command accepts the same query flags; `--print-uri` shows the
//! request that would be made without making it.

mod commands;

use crate::config::{Config, ConfigError, Overrides};
use clap::{Args, Parser, Subcommand};
use rexq_core::{Direction, HasContainer, QueryError, Relation, RemoteQueryError};
use std::path::PathBuf;
use thiserror::Error;

pub use commands::*;

// =============================================================================
// CLI STRUCTURE
// =============================================================================

/// rexq - query the neighbourhood of a vertex on a remote graph server
#[derive(Parser, Debug)]
#[command(name = "rexq")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Path to a rexq.toml config file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Graph server URL (overrides REXQ_URL and the config file)
    #[arg(long, global = true)]
    pub url: Option<String>,

    /// Graph name on the server (overrides REXQ_GRAPH and the config file)
    #[arg(short, long, global = true)]
    pub graph: Option<String>,

    /// Output in JSON format (for programmatic access)
    #[arg(long, global = true)]
    pub json_mode: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available CLI commands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List edges incident to the vertex
    Edges(QueryArgs),

    /// List vertices adjacent to the vertex
    Vertices(QueryArgs),

    /// Count edges incident to the vertex
    Count(QueryArgs),

    /// List ids of vertices adjacent to the vertex
    Ids(QueryArgs),
}

impl Commands {
    pub fn relation(&self) -> Relation {
        match self {
            Self::Edges(_) => Relation::Edges,
            Self::Vertices(_) => Relation::Vertices,
            Self::Count(_) => Relation::Count,
            Self::Ids(_) => Relation::Ids,
        }
    }

    pub fn args(&self) -> &QueryArgs {
        match self {
            Self::Edges(args) | Self::Vertices(args) | Self::Count(args) | Self::Ids(args) => args,
        }
    }
}

/// Query flags shared by every command.
#[derive(Args, Debug, Clone)]
pub struct QueryArgs {
    /// Vertex id (JSON literal, e.g. 1 or "\"v1\""; bare text is a string id)
    #[arg(long, required_unless_present = "base_uri", conflicts_with = "base_uri")]
    pub vertex: Option<String>,

    /// Query an arbitrary resource URI instead of a vertex
    #[arg(long)]
    pub base_uri: Option<String>,

    /// Traversal direction (in, out, both)
    #[arg(short, long, default_value = "both")]
    pub direction: Direction,

    /// Edge labels (repeatable, or comma-separated)
    #[arg(short, long, value_delimiter = ',')]
    pub label: Vec<String>,

    /// Maximum number of results
    #[arg(short = 'n', long)]
    pub limit: Option<u64>,

    /// Property filter as KEY,OP,VALUE with OP one of = <> > >= < <= (repeatable)
    #[arg(long = "has", value_name = "KEY,OP,VALUE")]
    pub has: Vec<HasContainer>,

    /// Print the request URI and exit without contacting the server
    #[arg(long)]
    pub print_uri: bool,
}

// =============================================================================
// ERRORS
// =============================================================================

/// Errors surfaced by the CLI.
#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Query(#[from] QueryError),

    #[error("Cannot render output: {0}")]
    Output(#[from] serde_json::Error),
}

impl From<RemoteQueryError> for CliError {
    fn from(e: RemoteQueryError) -> Self {
        Self::Query(QueryError::Remote(e))
    }
}

// =============================================================================
// COMMAND EXECUTION
// =============================================================================

/// Execute the CLI with parsed arguments.
pub fn execute(cli: Cli) -> Result<(), CliError> {
    let overrides = Overrides {
        url: cli.url,
        graph: cli.graph,
    };
    let config = Config::load(cli.config.as_deref(), overrides)?;
    tracing::debug!(url = %config.url, graph = %config.graph, "resolved configuration");

    cmd_query(&config, &cli.command, cli.json_mode)
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;
    use rexq_core::Compare;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_full_query() {
        let cli = Cli::try_parse_from([
            "rexq", "edges", "--vertex", "1", "-d", "out", "-l", "knows,created", "-l", "likes",
            "-n", "5", "--has", "weight,>=,0.5", "--json-mode",
        ])
        .expect("parse");
        assert!(cli.json_mode);
        assert_eq!(cli.command.relation(), Relation::Edges);

        let args = cli.command.args();
        assert_eq!(args.vertex.as_deref(), Some("1"));
        assert_eq!(args.direction, Direction::Out);
        assert_eq!(args.label, vec!["knows", "created", "likes"]);
        assert_eq!(args.limit, Some(5));
        assert_eq!(args.has.len(), 1);
        assert_eq!(args.has[0].compare(), Compare::GreaterThanEqual);
    }

    #[test]
    fn rejects_bad_comparator() {
        let err = Cli::try_parse_from(["rexq", "count", "--vertex", "1", "--has", "age,~,3"]);
        assert!(err.is_err());
    }

    #[test]
    fn vertex_or_base_uri_is_required() {
        assert!(Cli::try_parse_from(["rexq", "count"]).is_err());
        assert!(
            Cli::try_parse_from(["rexq", "count", "--vertex", "1", "--base-uri", "http://x"])
                .is_err()
        );
        assert!(Cli::try_parse_from(["rexq", "count", "--base-uri", "http://x/v/1"]).is_ok());
    }
}
