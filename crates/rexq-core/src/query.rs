//! # Query Module
//!
//! The lazy vertex query. A [`QueryBuilder`] collects a direction, a label
//! restriction, property filters and a limit, and makes no request until a
//! terminal operation runs:
//!
//! - `edges()` / `vertices()` return a lazy [`ElementIter`]
//! - `count()` / `vertex_ids()` issue their request immediately
//!
//! Every terminal call rebuilds its URI from the current configuration:
//!
//! ```text
//! {base}{relation}?_limit=N[&_label=[a,b]][&_properties=[[k,op,v],...]]
//! ```

use crate::element::{RemoteEdge, RemoteVertex};
use crate::encoding::uri_cast;
use crate::graph::RemoteGraph;
use crate::iter::ElementIter;
use crate::tokens::{
    AND, COMMA, EMPTY_LABELS, EQUALS, LABEL, LEFT_SQUARE_BRACKET, LIMIT, NO_LIMIT, PROPERTIES,
    QUESTION, RIGHT_SQUARE_BRACKET, SLASH_BOTH, SLASH_BOTHCOUNT, SLASH_BOTHE, SLASH_BOTHIDS,
    SLASH_IN, SLASH_INCOUNT, SLASH_INE, SLASH_INIDS, SLASH_OUT, SLASH_OUTCOUNT, SLASH_OUTE,
    SLASH_OUTIDS, TOTAL_SIZE,
};
use crate::types::{
    Compare, ConfigurationError, Direction, HasContainer, PropertyValue, QueryError,
    RemoteQueryError,
};
use serde_json::{Map, Value};

// =============================================================================
// RELATIONS
// =============================================================================

/// What a terminal operation asks the server for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Relation {
    Edges,
    Vertices,
    Count,
    Ids,
}

impl Relation {
    pub const ALL: [Relation; 4] = [
        Relation::Edges,
        Relation::Vertices,
        Relation::Count,
        Relation::Ids,
    ];
}

/// Path suffix selecting `relation` in `direction`.
#[must_use]
pub const fn relation_token(relation: Relation, direction: Direction) -> &'static str {
    match (relation, direction) {
        (Relation::Edges, Direction::In) => SLASH_INE,
        (Relation::Edges, Direction::Out) => SLASH_OUTE,
        (Relation::Edges, Direction::Both) => SLASH_BOTHE,
        (Relation::Vertices, Direction::In) => SLASH_IN,
        (Relation::Vertices, Direction::Out) => SLASH_OUT,
        (Relation::Vertices, Direction::Both) => SLASH_BOTH,
        (Relation::Count, Direction::In) => SLASH_INCOUNT,
        (Relation::Count, Direction::Out) => SLASH_OUTCOUNT,
        (Relation::Count, Direction::Both) => SLASH_BOTHCOUNT,
        (Relation::Ids, Direction::In) => SLASH_INIDS,
        (Relation::Ids, Direction::Out) => SLASH_OUTIDS,
        (Relation::Ids, Direction::Both) => SLASH_BOTHIDS,
    }
}

// =============================================================================
// QUERY BUILDER
// =============================================================================

/// Lazy, reusable query over the neighbourhood of a remote resource.
#[derive(Debug, Clone)]
pub struct QueryBuilder<'g> {
    graph: &'g RemoteGraph,
    base_uri: String,
    direction: Direction,
    labels: Vec<String>,
    limit: u64,
    has_containers: Vec<HasContainer>,
}

impl<'g> QueryBuilder<'g> {
    /// Unrestricted query on `base_uri`: both directions, any label, no limit.
    pub fn new(base_uri: String, graph: &'g RemoteGraph) -> Self {
        Self {
            graph,
            base_uri,
            direction: Direction::default(),
            labels: EMPTY_LABELS.to_vec(),
            limit: NO_LIMIT,
            has_containers: Vec::new(),
        }
    }

    #[must_use]
    pub fn base_uri(&self) -> &str {
        &self.base_uri
    }

    #[must_use]
    pub fn has_containers(&self) -> &[HasContainer] {
        &self.has_containers
    }

    pub fn direction(&mut self, direction: Direction) -> &mut Self {
        self.direction = direction;
        self
    }

    /// Replace the label restriction. An empty list lifts it.
    pub fn labels<I, S>(&mut self, labels: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.labels = labels.into_iter().map(Into::into).collect();
        self
    }

    /// Replace the upper bound on returned elements.
    ///
    /// Values above [`NO_LIMIT`] are clamped to it; the server reads
    /// `_limit` as a signed 64-bit integer.
    pub fn limit(&mut self, max: u64) -> &mut Self {
        self.limit = max.min(NO_LIMIT);
        self
    }

    /// Append a property filter. Only `values[0]` is sent to the server.
    pub fn has(
        &mut self,
        key: impl Into<String>,
        compare: Compare,
        values: Vec<PropertyValue>,
    ) -> Result<&mut Self, ConfigurationError> {
        let container = HasContainer::new(key, compare, values)?;
        Ok(self.has_container(container))
    }

    /// Append an already validated filter.
    pub fn has_container(&mut self, container: HasContainer) -> &mut Self {
        self.has_containers.push(container);
        self
    }

    /// Append `key = value`.
    pub fn has_eq(&mut self, key: impl Into<String>, value: impl Into<PropertyValue>) -> &mut Self {
        self.push_single(key.into(), Compare::Equal, value.into())
    }

    /// Restrict `key` to the half-open range `[start, end)`.
    pub fn interval(
        &mut self,
        key: impl Into<String>,
        start: impl Into<PropertyValue>,
        end: impl Into<PropertyValue>,
    ) -> &mut Self {
        let key = key.into();
        self.push_single(key.clone(), Compare::GreaterThanEqual, start.into());
        self.push_single(key, Compare::LessThan, end.into())
    }

    fn push_single(&mut self, key: String, compare: Compare, value: PropertyValue) -> &mut Self {
        self.has_containers.push(HasContainer::single(key, compare, value));
        self
    }

    // =========================================================================
    // URI
    // =========================================================================

    /// Canonical URI for `relation` under the current configuration.
    #[must_use]
    pub fn build_uri(&self, relation: Relation) -> String {
        let mut uri = String::with_capacity(self.base_uri.len() + 64);
        uri.push_str(&self.base_uri);
        uri.push_str(relation_token(relation, self.direction));
        uri.push(QUESTION);
        uri.push_str(LIMIT);
        uri.push(EQUALS);
        uri.push_str(&self.limit.to_string());

        if !self.labels.is_empty() {
            uri.push(AND);
            uri.push_str(LABEL);
            uri.push(EQUALS);
            uri.push(LEFT_SQUARE_BRACKET);
            uri.push_str(&self.labels.join(","));
            uri.push(RIGHT_SQUARE_BRACKET);
        }

        if !self.has_containers.is_empty() {
            uri.push(AND);
            uri.push_str(PROPERTIES);
            uri.push(EQUALS);
            uri.push(LEFT_SQUARE_BRACKET);
            for (i, has) in self.has_containers.iter().enumerate() {
                if i > 0 {
                    uri.push(COMMA);
                }
                uri.push(LEFT_SQUARE_BRACKET);
                uri.push_str(has.key());
                uri.push(COMMA);
                uri.push_str(has.compare().symbol());
                uri.push(COMMA);
                uri.push_str(&uri_cast(has.first_value()));
                uri.push(RIGHT_SQUARE_BRACKET);
            }
            uri.push(RIGHT_SQUARE_BRACKET);
        }

        tracing::debug!(%uri, ?relation, "built query uri");
        uri
    }

    // =========================================================================
    // TERMINAL OPERATIONS
    // =========================================================================

    /// Incident edges. Nothing is fetched until the iterator is consumed.
    pub fn edges(&self) -> ElementIter<'g, RemoteEdge> {
        ElementIter::new(self.build_uri(Relation::Edges), self.graph)
    }

    /// Adjacent vertices. Nothing is fetched until the iterator is consumed.
    pub fn vertices(&self) -> ElementIter<'g, RemoteVertex> {
        ElementIter::new(self.build_uri(Relation::Vertices), self.graph)
    }

    /// Number of matching edges, read from the `totalSize` field.
    ///
    /// A JSON object without a usable `totalSize` counts as 0. Any other
    /// response shape is a [`RemoteQueryError::Parse`].
    pub fn count(&self) -> Result<u64, QueryError> {
        let uri = self.build_uri(Relation::Count);
        let body = self.graph.executor().get(&uri)?;
        let object = match body {
            Value::Object(object) => object,
            other => {
                return Err(RemoteQueryError::Parse(format!(
                    "count response is not a JSON object: {other}"
                ))
                .into());
            }
        };
        Ok(total_size(&object).unwrap_or_else(|| {
            tracing::warn!(%uri, "response has no usable {TOTAL_SIZE}, counting 0");
            0
        }))
    }

    /// Raw ids of the adjacent vertices, in server order.
    pub fn vertex_ids(&self) -> Result<Vec<Value>, QueryError> {
        let uri = self.build_uri(Relation::Ids);
        Ok(self.graph.executor().get_result_array(&uri)?)
    }
}

/// Read `totalSize` as a non-negative integer (number or numeric string).
fn total_size(body: &Map<String, Value>) -> Option<u64> {
    match body.get(TOTAL_SIZE)? {
        Value::Number(n) => n.as_u64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::RestExecutor;
    use serde_json::json;

    struct Offline;

    impl RestExecutor for Offline {
        fn get(&self, uri: &str) -> Result<Value, RemoteQueryError> {
            Err(RemoteQueryError::ConnectionFailed(uri.to_string()))
        }
    }

    fn graph() -> RemoteGraph {
        RemoteGraph::new("http://host/graph", Box::new(Offline))
    }

    #[test]
    fn end_to_end_uri() {
        let graph = graph();
        let mut q = graph.query("http://host/graph/v1");
        q.direction(Direction::Out).limit(10).labels(["knows"]);
        assert_eq!(
            q.build_uri(Relation::Vertices),
            "http://host/graph/v1/out?_limit=10&_label=[knows]"
        );
    }

    #[test]
    fn default_limit_is_no_limit() {
        let graph = graph();
        let q = graph.query("http://host/v/1");
        assert_eq!(
            q.build_uri(Relation::Edges),
            "http://host/v/1/bothE?_limit=9223372036854775807"
        );
    }

    #[test]
    fn labels_keep_order_without_trailing_comma() {
        let graph = graph();
        let mut q = graph.query("b");
        q.labels(["knows", "created"]);
        assert!(q.build_uri(Relation::Edges).ends_with("&_label=[knows,created]"));

        q.labels(Vec::<String>::new());
        assert!(!q.build_uri(Relation::Edges).contains("_label"));
    }

    #[test]
    fn property_filters_render_in_order() {
        let graph = graph();
        let mut q = graph.query("b");
        q.has("age", Compare::GreaterThan, vec![30.into()])
            .expect("filter");
        assert!(q.build_uri(Relation::Ids).ends_with("&_properties=[[age,>,30]]"));

        q.has("name", Compare::NotEqual, vec!["josh".into(), "peter".into()])
            .expect("filter");
        assert!(
            q.build_uri(Relation::Ids)
                .ends_with("&_properties=[[age,>,30],[name,<>,josh]]")
        );
    }

    #[test]
    fn empty_filter_values_fail_fast() {
        let graph = graph();
        let mut q = graph.query("b");
        assert!(q.has("age", Compare::Equal, vec![]).is_err());
        assert!(q.has_containers().is_empty());
    }

    #[test]
    fn interval_appends_two_filters() {
        let graph = graph();
        let mut q = graph.query("b");
        q.interval("weight", 0.5, 1.0);
        assert!(
            q.build_uri(Relation::Edges)
                .ends_with("&_properties=[[weight,>=,0.5],[weight,<,1.0]]")
        );
    }

    #[test]
    fn has_eq_encodes_strings() {
        let graph = graph();
        let mut q = graph.query("b");
        q.has_eq("name", "marko rodriguez");
        assert!(
            q.build_uri(Relation::Vertices)
                .ends_with("&_properties=[[name,=,marko+rodriguez]]")
        );
    }

    #[test]
    fn edges_and_vertices_are_lazy() {
        let graph = graph();
        let q = graph.query("b");
        let edges = q.edges();
        let vertices = q.vertices();
        assert!(!edges.is_fetched());
        assert!(!vertices.is_fetched());
        assert_eq!(edges.uri(), "b/bothE?_limit=9223372036854775807");
    }

    fn object(value: Value) -> Map<String, Value> {
        value.as_object().cloned().unwrap_or_default()
    }

    #[test]
    fn total_size_leniency() {
        assert_eq!(total_size(&object(json!({ "totalSize": 12 }))), Some(12));
        assert_eq!(total_size(&object(json!({ "totalSize": "7" }))), Some(7));
        assert_eq!(total_size(&object(json!({ "totalSize": -1 }))), None);
        assert_eq!(total_size(&object(json!({ "totalSize": "many" }))), None);
        assert_eq!(total_size(&object(json!({ "version": "2" }))), None);
    }

    #[test]
    fn limit_is_clamped_to_no_limit() {
        let graph = graph();
        let mut q = graph.query("b");
        q.limit(u64::MAX);
        assert_eq!(
            q.build_uri(Relation::Count),
            "b/bothCount?_limit=9223372036854775807"
        );
        q.limit(NO_LIMIT - 1);
        assert!(q.build_uri(Relation::Count).ends_with("=9223372036854775806"));
    }
}
