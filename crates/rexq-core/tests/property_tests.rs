//! # Property-Based Tests
//!
//! URI construction invariants checked with proptest. No requests are made.

use proptest::collection::vec;
use proptest::prelude::*;
use rexq_core::{
    Compare, Direction, NO_LIMIT, QueryBuilder, RemoteGraph, RemoteQueryError, Relation,
    RestExecutor, relation_token,
};
use serde_json::Value;
use std::collections::BTreeSet;

const BASE: &str = "http://host/graph/v1";

struct Offline;

impl RestExecutor for Offline {
    fn get(&self, uri: &str) -> Result<Value, RemoteQueryError> {
        Err(RemoteQueryError::ConnectionFailed(uri.to_string()))
    }
}

fn graph() -> RemoteGraph {
    RemoteGraph::new("http://host/graph", Box::new(Offline))
}

fn direction() -> impl Strategy<Value = Direction> {
    prop::sample::select(Direction::ALL.to_vec())
}

fn relation() -> impl Strategy<Value = Relation> {
    prop::sample::select(Relation::ALL.to_vec())
}

fn compare() -> impl Strategy<Value = Compare> {
    prop::sample::select(Compare::ALL.to_vec())
}

fn path_of(uri: &str) -> &str {
    uri.split('?').next().unwrap_or(uri)
}

#[test]
fn relation_tokens_are_mutually_distinct() {
    let mut seen = BTreeSet::new();
    for relation in Relation::ALL {
        for direction in Direction::ALL {
            assert!(seen.insert(relation_token(relation, direction)));
        }
    }
    assert_eq!(seen.len(), 12);
}

proptest! {
    /// The path is the base URI followed by exactly one relation token.
    #[test]
    fn uri_carries_exactly_one_token(relation in relation(), direction in direction()) {
        let graph = graph();
        let mut q = QueryBuilder::new(BASE.to_string(), &graph);
        q.direction(direction);
        let uri = q.build_uri(relation);
        let suffix = path_of(&uri).strip_prefix(BASE).unwrap_or_default();
        prop_assert_eq!(suffix, relation_token(relation, direction));
    }

    /// Unchanged configuration produces byte-identical URIs.
    #[test]
    fn uri_building_is_idempotent(
        relation in relation(),
        direction in direction(),
        limit in any::<u64>(),
        labels in vec("[a-z]{1,8}", 0..4),
        filters in vec(("[a-z]{1,6}", compare(), any::<i64>()), 0..4),
    ) {
        let graph = graph();
        let mut q = QueryBuilder::new(BASE.to_string(), &graph);
        q.direction(direction).limit(limit).labels(labels);
        for (key, cmp, value) in filters {
            q.has(key, cmp, vec![value.into()]).expect("filter");
        }
        prop_assert_eq!(q.build_uri(relation), q.build_uri(relation));
    }

    /// The limit is always rendered, right after the `?`, and never
    /// exceeds `NO_LIMIT`.
    #[test]
    fn limit_is_rendered(limit in any::<u64>(), relation in relation()) {
        let graph = graph();
        let mut q = QueryBuilder::new(BASE.to_string(), &graph);
        q.limit(limit);
        let uri = q.build_uri(relation);
        let expected = format!("?_limit={}", limit.min(NO_LIMIT));
        prop_assert!(uri.contains(&expected));
    }

    /// Labels appear in the order given, comma separated, no trailing comma.
    #[test]
    fn labels_are_rendered_in_order(labels in vec("[a-z]{1,8}", 1..6)) {
        let graph = graph();
        let mut q = QueryBuilder::new(BASE.to_string(), &graph);
        q.labels(labels.clone());
        let uri = q.build_uri(Relation::Edges);
        let expected = format!("&_label=[{}]", labels.join(","));
        prop_assert!(uri.ends_with(&expected));
        prop_assert!(!uri.contains(",]"));
    }

    /// One bracketed triple per filter, in insertion order.
    #[test]
    fn filters_are_rendered_in_order(
        filters in vec(("[a-z]{1,6}", compare(), any::<i64>()), 1..6)
    ) {
        let graph = graph();
        let mut q = QueryBuilder::new(BASE.to_string(), &graph);
        for (key, cmp, value) in &filters {
            q.has(key.clone(), *cmp, vec![(*value).into()]).expect("filter");
        }
        let triples: Vec<String> = filters
            .iter()
            .map(|(key, cmp, value)| format!("[{key},{},{value}]", cmp.symbol()))
            .collect();
        let expected = format!("&_properties=[{}]", triples.join(","));
        let uri = q.build_uri(Relation::Vertices);
        prop_assert!(uri.ends_with(&expected));
        prop_assert!(!uri.contains("],]"));
    }
}
