//! # CLI Command Implementations
//!
//! This module contains the actual implementations of CLI commands.

use super::{CliError, Commands, QueryArgs};
use crate::config::Config;
use rexq_core::{HttpExecutor, QueryBuilder, RemoteEdge, RemoteGraph, RemoteVertex, RestExecutor};
use serde_json::Value;

// =============================================================================
// QUERY CONSTRUCTION
// =============================================================================

/// Connect to the configured graph.
pub fn open_graph(config: &Config) -> Result<RemoteGraph, CliError> {
    let executor = HttpExecutor::with_options(config.auth.clone(), config.timeout)?;
    Ok(graph_with(config, Box::new(executor)))
}

fn graph_with(config: &Config, executor: Box<dyn RestExecutor>) -> RemoteGraph {
    RemoteGraph::on_server(&config.url, &config.graph, executor)
}

/// Read a vertex id given on the command line.
///
/// JSON literals keep their type (`1` is a number, `"1"` a string); any
/// other text is taken as a string id.
pub fn parse_vertex_id(text: &str) -> Value {
    match serde_json::from_str::<Value>(text) {
        Ok(v @ (Value::Number(_) | Value::String(_) | Value::Bool(_))) => v,
        _ => Value::String(text.to_string()),
    }
}

/// Apply the query flags to a fresh builder.
pub fn build_query<'g>(
    graph: &'g RemoteGraph,
    args: &QueryArgs,
    config: &Config,
) -> QueryBuilder<'g> {
    let mut query = match (&args.vertex, &args.base_uri) {
        (Some(vertex), _) => graph.vertex_query(&parse_vertex_id(vertex)),
        (None, Some(base_uri)) => graph.query(base_uri.clone()),
        // clap enforces one of the two
        (None, None) => graph.query(graph.graph_uri().to_string()),
    };

    query.direction(args.direction).labels(args.label.iter().cloned());
    if let Some(limit) = args.limit.or(config.default_limit) {
        query.limit(limit);
    }
    for has in &args.has {
        query.has_container(has.clone());
    }
    query
}

// =============================================================================
// QUERY COMMAND
// =============================================================================

/// Run one terminal operation and print its result.
pub fn cmd_query(config: &Config, command: &Commands, json_mode: bool) -> Result<(), CliError> {
    let graph = open_graph(config)?;
    let args = command.args();
    let query = build_query(&graph, args, config);
    let uri = query.build_uri(command.relation());

    if args.print_uri {
        println!("{uri}");
        return Ok(());
    }

    tracing::info!("Querying {}", uri);

    let output = match command {
        Commands::Edges(_) => {
            let edges = query.edges().collect::<Result<Vec<_>, _>>()?;
            render_edges(&edges, json_mode)?
        }
        Commands::Vertices(_) => {
            let vertices = query.vertices().collect::<Result<Vec<_>, _>>()?;
            render_vertices(&vertices, json_mode)?
        }
        Commands::Count(_) => {
            let count = query.count()?;
            if json_mode {
                serde_json::to_string_pretty(&serde_json::json!({ "uri": uri, "count": count }))?
            } else {
                count.to_string()
            }
        }
        Commands::Ids(_) => {
            let ids = query.vertex_ids()?;
            render_ids(&ids, json_mode)?
        }
    };

    println!("{output}");
    Ok(())
}

// =============================================================================
// OUTPUT
// =============================================================================

fn render_edges(edges: &[RemoteEdge], json_mode: bool) -> Result<String, CliError> {
    if json_mode {
        return Ok(serde_json::to_string_pretty(edges)?);
    }
    let lines: Vec<String> = edges
        .iter()
        .map(|e| {
            format!(
                "{}\t{} -[{}]-> {}{}",
                e.id,
                e.out_vertex,
                e.label,
                e.in_vertex,
                render_properties(&e.properties)
            )
        })
        .collect();
    Ok(lines.join("\n"))
}

fn render_vertices(vertices: &[RemoteVertex], json_mode: bool) -> Result<String, CliError> {
    if json_mode {
        return Ok(serde_json::to_string_pretty(vertices)?);
    }
    let lines: Vec<String> = vertices
        .iter()
        .map(|v| format!("{}{}", v.id, render_properties(&v.properties)))
        .collect();
    Ok(lines.join("\n"))
}

fn render_ids(ids: &[Value], json_mode: bool) -> Result<String, CliError> {
    if json_mode {
        return Ok(serde_json::to_string_pretty(ids)?);
    }
    Ok(ids.iter().map(Value::to_string).collect::<Vec<_>>().join("\n"))
}

fn render_properties(properties: &serde_json::Map<String, Value>) -> String {
    if properties.is_empty() {
        return String::new();
    }
    let pairs: Vec<String> = properties.iter().map(|(k, v)| format!("{k}={v}")).collect();
    format!("\t{}", pairs.join(" "))
}

// =============================================================================
// TESTS
// =============================================================================
