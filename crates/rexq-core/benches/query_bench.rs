//! # Query Benchmarks
//!
//! URI construction cost for rexq-core queries of growing size.
//!
//! Run with: `cargo bench -p rexq-core`

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use rexq_core::{
    Compare, Direction, QueryBuilder, RemoteGraph, RemoteQueryError, Relation, RestExecutor,
};
use serde_json::Value;
use std::hint::black_box;

struct Offline;

impl RestExecutor for Offline {
    fn get(&self, uri: &str) -> Result<Value, RemoteQueryError> {
        Err(RemoteQueryError::ConnectionFailed(uri.to_string()))
    }
}

/// Query with `size` labels and `size` property filters.
fn populated_query(graph: &RemoteGraph, size: usize) -> QueryBuilder<'_> {
    let mut query = graph.query("http://localhost:8182/graphs/tinkergraph/vertices/1");
    query
        .direction(Direction::Out)
        .limit(100)
        .labels((0..size).map(|i| format!("label{i}")));
    for i in 0..size {
        query
            .has(format!("key{i}"), Compare::GreaterThan, vec![(i as i64).into()])
            .expect("filter");
    }
    query
}

fn bench_build_uri(c: &mut Criterion) {
    let graph = RemoteGraph::new("http://localhost:8182/graphs/tinkergraph", Box::new(Offline));
    let mut group = c.benchmark_group("build_uri");

    for size in [0, 4, 32, 256] {
        let query = populated_query(&graph, size);
        group.bench_with_input(BenchmarkId::from_parameter(size), &query, |b, query| {
            b.iter(|| black_box(query.build_uri(Relation::Vertices)));
        });
    }

    group.finish();
}

criterion_group!(benches, bench_build_uri);
criterion_main!(benches);
