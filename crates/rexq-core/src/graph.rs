//! # Remote Graph
//!
//! Session context shared by every query against one remote graph: the
//! graph's URI and the executor that talks to it.

use crate::client::RestExecutor;
use crate::encoding::encode_id;
use crate::query::QueryBuilder;
use crate::tokens::{SLASH_GRAPHS_SLASH, SLASH_VERTICES_SLASH};
use serde_json::Value;

/// A graph hosted by a Rexster-style server.
pub struct RemoteGraph {
    graph_uri: String,
    executor: Box<dyn RestExecutor>,
}

impl RemoteGraph {
    /// Wrap a graph URI such as `http://localhost:8182/graphs/tinkergraph`.
    pub fn new(graph_uri: impl Into<String>, executor: Box<dyn RestExecutor>) -> Self {
        let mut graph_uri = graph_uri.into();
        while graph_uri.ends_with('/') {
            graph_uri.pop();
        }
        Self {
            graph_uri,
            executor,
        }
    }

    /// Address graph `name` on the server at `server_url`.
    pub fn on_server(server_url: &str, name: &str, executor: Box<dyn RestExecutor>) -> Self {
        let base = server_url.trim_end_matches('/');
        Self::new(format!("{base}{SLASH_GRAPHS_SLASH}{name}"), executor)
    }

    #[must_use]
    pub fn graph_uri(&self) -> &str {
        &self.graph_uri
    }

    pub(crate) fn executor(&self) -> &dyn RestExecutor {
        self.executor.as_ref()
    }

    /// Query the neighbourhood of vertex `id`.
    pub fn vertex_query(&self, id: &Value) -> QueryBuilder<'_> {
        let base_uri = format!("{}{}{}", self.graph_uri, SLASH_VERTICES_SLASH, encode_id(id));
        QueryBuilder::new(base_uri, self)
    }

    /// Query rooted at an arbitrary resource URI.
    pub fn query(&self, base_uri: impl Into<String>) -> QueryBuilder<'_> {
        QueryBuilder::new(base_uri.into(), self)
    }
}

impl std::fmt::Debug for RemoteGraph {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RemoteGraph")
            .field("graph_uri", &self.graph_uri)
            .finish()
    }
}
