//! # Wire Tokens
//!
//! Fixed path segments, query parameter names and response fields of the
//! Rexster-style REST protocol.
//!
//! These tokens are compiled into the binary and are immutable at runtime.
//!
//! ## Relation Tokens
//!
//! Four families (edges, vertices, count, ids), each parameterized by
//! direction. A built URI carries exactly one of them.

// =============================================================================
// RELATION TOKENS
// =============================================================================

/// Incoming edges.
pub const SLASH_INE: &str = "/inE";
/// Outgoing edges.
pub const SLASH_OUTE: &str = "/outE";
/// Edges in either direction.
pub const SLASH_BOTHE: &str = "/bothE";

/// Adjacent vertices over incoming edges.
pub const SLASH_IN: &str = "/in";
/// Adjacent vertices over outgoing edges.
pub const SLASH_OUT: &str = "/out";
/// Adjacent vertices in either direction.
pub const SLASH_BOTH: &str = "/both";

pub const SLASH_INCOUNT: &str = "/inCount";
pub const SLASH_OUTCOUNT: &str = "/outCount";
pub const SLASH_BOTHCOUNT: &str = "/bothCount";

pub const SLASH_INIDS: &str = "/inIds";
pub const SLASH_OUTIDS: &str = "/outIds";
pub const SLASH_BOTHIDS: &str = "/bothIds";

// =============================================================================
// QUERY STRING
// =============================================================================

pub const QUESTION: char = '?';
pub const AND: char = '&';
pub const EQUALS: char = '=';
pub const COMMA: char = ',';
pub const LEFT_SQUARE_BRACKET: char = '[';
pub const RIGHT_SQUARE_BRACKET: char = ']';

/// Result count bound parameter.
pub const LIMIT: &str = "_limit";

/// Edge label restriction parameter.
pub const LABEL: &str = "_label";

/// Property comparison filter parameter.
pub const PROPERTIES: &str = "_properties";

/// The "no effective bound" limit.
///
/// This is the largest signed 64-bit integer, which is what JVM graph
/// servers parse `_limit` into.
pub const NO_LIMIT: u64 = i64::MAX as u64;

/// No label restriction.
pub const EMPTY_LABELS: &[String] = &[];

// =============================================================================
// RESPONSE FIELDS
// =============================================================================

/// Total element count in a count response.
pub const TOTAL_SIZE: &str = "totalSize";

/// Element array in a wrapped response.
pub const RESULTS: &str = "results";

/// Element id.
pub const ID: &str = "_id";
/// Element kind (`vertex` or `edge`).
pub const TYPE: &str = "_type";
/// Edge label.
pub const EDGE_LABEL: &str = "_label";
/// Edge tail vertex id.
pub const OUT_V: &str = "_outV";
/// Edge head vertex id.
pub const IN_V: &str = "_inV";

// =============================================================================
// GRAPH PATHS
// =============================================================================

/// Path from a graph URI to one of its vertices.
pub const SLASH_VERTICES_SLASH: &str = "/vertices/";

/// Path from a server URL to one of its graphs.
pub const SLASH_GRAPHS_SLASH: &str = "/graphs/";
