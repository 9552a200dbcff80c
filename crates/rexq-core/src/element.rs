//! # Remote Elements
//!
//! Vertices and edges as returned by the graph server. Each element is a
//! JSON object whose reserved keys start with `_` (`_id`, `_type`, and for
//! edges `_label`, `_outV`, `_inV`); every other key is a property.
//!
//! Ids are opaque: a server may use numbers, strings or anything else, so
//! they are kept as raw JSON values.

use crate::graph::RemoteGraph;
use crate::query::QueryBuilder;
use crate::tokens::{EDGE_LABEL, ID, IN_V, OUT_V, TYPE};
use crate::types::RemoteQueryError;
use serde::Serialize;
use serde_json::{Map, Value};

/// Conversion from one JSON array element into a domain object.
pub trait FromElement: Sized {
    fn from_element(element: Value) -> Result<Self, RemoteQueryError>;
}

impl FromElement for Value {
    fn from_element(element: Value) -> Result<Self, RemoteQueryError> {
        Ok(element)
    }
}

/// A vertex of the remote graph.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RemoteVertex {
    pub id: Value,
    pub properties: Map<String, Value>,
}

impl RemoteVertex {
    /// Start a query rooted at this vertex.
    pub fn query<'g>(&self, graph: &'g RemoteGraph) -> QueryBuilder<'g> {
        graph.vertex_query(&self.id)
    }

    #[must_use]
    pub fn property(&self, key: &str) -> Option<&Value> {
        self.properties.get(key)
    }
}

impl FromElement for RemoteVertex {
    fn from_element(element: Value) -> Result<Self, RemoteQueryError> {
        let mut map = into_object(element, "vertex")?;
        check_type(&map, "vertex")?;
        let id = take(&mut map, ID, "vertex")?;
        Ok(Self {
            id,
            properties: strip_reserved(map),
        })
    }
}

/// An edge of the remote graph.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RemoteEdge {
    pub id: Value,
    pub label: String,
    /// Tail vertex id.
    pub out_vertex: Value,
    /// Head vertex id.
    pub in_vertex: Value,
    pub properties: Map<String, Value>,
}

impl RemoteEdge {
    #[must_use]
    pub fn property(&self, key: &str) -> Option<&Value> {
        self.properties.get(key)
    }
}

impl FromElement for RemoteEdge {
    fn from_element(element: Value) -> Result<Self, RemoteQueryError> {
        let mut map = into_object(element, "edge")?;
        check_type(&map, "edge")?;
        let id = take(&mut map, ID, "edge")?;
        let label = match take(&mut map, EDGE_LABEL, "edge")? {
            Value::String(s) => s,
            other => {
                return Err(RemoteQueryError::Parse(format!(
                    "edge {EDGE_LABEL} is not a string: {other}"
                )));
            }
        };
        let out_vertex = take(&mut map, OUT_V, "edge")?;
        let in_vertex = take(&mut map, IN_V, "edge")?;
        Ok(Self {
            id,
            label,
            out_vertex,
            in_vertex,
            properties: strip_reserved(map),
        })
    }
}

fn into_object(element: Value, kind: &str) -> Result<Map<String, Value>, RemoteQueryError> {
    match element {
        Value::Object(map) => Ok(map),
        other => Err(RemoteQueryError::Parse(format!(
            "{kind} is not a JSON object: {other}"
        ))),
    }
}

fn take(map: &mut Map<String, Value>, key: &str, kind: &str) -> Result<Value, RemoteQueryError> {
    match map.remove(key) {
        Some(Value::Null) | None => Err(RemoteQueryError::Parse(format!(
            "{kind} is missing '{key}'"
        ))),
        Some(v) => Ok(v),
    }
}

/// An element may omit `_type`, but must not claim the other kind.
fn check_type(map: &Map<String, Value>, kind: &str) -> Result<(), RemoteQueryError> {
    match map.get(TYPE) {
        None | Some(Value::Null) => Ok(()),
        Some(Value::String(t)) if t == kind => Ok(()),
        Some(other) => Err(RemoteQueryError::Parse(format!(
            "expected {kind}, got {TYPE} {other}"
        ))),
    }
}

fn strip_reserved(map: Map<String, Value>) -> Map<String, Value> {
    map.into_iter().filter(|(k, _)| !k.starts_with('_')).collect()
}

// =============================================================================
// TESTS
// =============================================================================
