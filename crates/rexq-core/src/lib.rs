//! # rexq-core
//!
//! Lazy vertex queries against a Rexster-style graph REST endpoint.
//!
//! A [`QueryBuilder`] accumulates a traversal request (direction, edge
//! labels, property filters, limit) and translates it into a single GET
//! request when a terminal operation runs. The response is read back as
//! edges, vertices, a list of opaque ids, or a count.
//!
//! ```no_run
//! use rexq_core::{Direction, HttpExecutor, RemoteGraph};
//! use serde_json::json;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let graph = RemoteGraph::on_server(
//!     "http://localhost:8182",
//!     "tinkergraph",
//!     Box::new(HttpExecutor::new()?),
//! );
//! let mut query = graph.vertex_query(&json!(1));
//! query.direction(Direction::Out).labels(["knows"]).limit(10);
//!
//! for vertex in query.vertices() {
//!     println!("{:?}", vertex?.id);
//! }
//! println!("{} outgoing knows edges", query.count()?);
//! # Ok(())
//! # }
//! ```
//!
//! ## Constraints
//!
//! - Synchronous: each terminal call is one blocking round trip
//! - Lazy: `edges()` and `vertices()` fetch on first `next()`
//! - No retries, caching or batching

// =============================================================================
// MODULES
// =============================================================================

pub mod client;
pub mod element;
pub mod encoding;
pub mod graph;
pub mod iter;
pub mod query;
pub mod tokens;
pub mod types;

// =============================================================================
// RE-EXPORTS: Core Types (from types module)
// =============================================================================

pub use types::{
    Compare, ConfigurationError, Direction, HasContainer, PropertyValue, QueryError,
    RemoteQueryError,
};

// =============================================================================
// RE-EXPORTS: Query Engine
// =============================================================================

pub use client::{Auth, HttpExecutor, RestExecutor};
pub use element::{FromElement, RemoteEdge, RemoteVertex};
pub use encoding::uri_cast;
pub use graph::RemoteGraph;
pub use iter::ElementIter;
pub use query::{QueryBuilder, Relation, relation_token};
pub use tokens::NO_LIMIT;
