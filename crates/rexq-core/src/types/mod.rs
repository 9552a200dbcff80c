//! # Core Type Definitions
//!
//! This module contains the configuration vocabulary of a vertex query:
//! - Traversal direction (`Direction`)
//! - Property comparison (`Compare`, `PropertyValue`, `HasContainer`)
//! - Error types (`ConfigurationError`, `RemoteQueryError`, `QueryError`)
//!
//! ## Fail-Fast Configuration
//!
//! Everything that can be wrong about a query without asking the server
//! is rejected here, when the filter is built. A `ConfigurationError`
//! never reaches the network.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

// =============================================================================
// DIRECTION
// =============================================================================

/// Which endpoint of an incident edge the traversal follows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    /// Edges pointing at the vertex.
    In,
    /// Edges leaving the vertex.
    Out,
    /// Both of the above.
    #[default]
    Both,
}

impl Direction {
    /// All directions, in declaration order.
    pub const ALL: [Direction; 3] = [Direction::In, Direction::Out, Direction::Both];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::In => "in",
            Self::Out => "out",
            Self::Both => "both",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Direction {
    type Err = ConfigurationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "in" => Ok(Self::In),
            "out" => Ok(Self::Out),
            "both" => Ok(Self::Both),
            other => Err(ConfigurationError::InvalidDirection(other.to_string())),
        }
    }
}

// =============================================================================
// COMPARATOR
// =============================================================================

/// Comparison applied by the server between a property and a filter value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Compare {
    Equal,
    NotEqual,
    GreaterThan,
    GreaterThanEqual,
    LessThan,
    LessThanEqual,
}

impl Compare {
    pub const ALL: [Compare; 6] = [
        Compare::Equal,
        Compare::NotEqual,
        Compare::GreaterThan,
        Compare::GreaterThanEqual,
        Compare::LessThan,
        Compare::LessThanEqual,
    ];

    /// Symbol written into the `_properties` clause.
    #[must_use]
    pub const fn symbol(self) -> &'static str {
        match self {
            Self::Equal => "=",
            Self::NotEqual => "<>",
            Self::GreaterThan => ">",
            Self::GreaterThanEqual => ">=",
            Self::LessThan => "<",
            Self::LessThanEqual => "<=",
        }
    }
}

impl fmt::Display for Compare {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

impl FromStr for Compare {
    type Err = ConfigurationError;

    /// Accepts the wire symbol (`>=`) or a short name (`gte`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "=" | "==" | "eq" => Ok(Self::Equal),
            "<>" | "!=" | "neq" => Ok(Self::NotEqual),
            ">" | "gt" => Ok(Self::GreaterThan),
            ">=" | "gte" => Ok(Self::GreaterThanEqual),
            "<" | "lt" => Ok(Self::LessThan),
            "<=" | "lte" => Ok(Self::LessThanEqual),
            other => Err(ConfigurationError::InvalidComparator(other.to_string())),
        }
    }
}

// =============================================================================
// PROPERTY VALUE
// =============================================================================

/// Scalar compared against a vertex or edge property.
#[derive(Debug, Clone, PartialEq)]
pub enum PropertyValue {
    String(String),
    Integer(i64),
    Float(f64),
    Boolean(bool),
}

impl PropertyValue {
    /// Read a scalar from free text.
    ///
    /// Tries integer, then float, then boolean; anything else stays a string.
    #[must_use]
    pub fn infer(text: &str) -> Self {
        if let Ok(i) = text.parse::<i64>() {
            return Self::Integer(i);
        }
        if let Ok(f) = text.parse::<f64>()
            && f.is_finite()
        {
            return Self::Float(f);
        }
        match text {
            "true" => Self::Boolean(true),
            "false" => Self::Boolean(false),
            _ => Self::String(text.to_string()),
        }
    }
}

impl fmt::Display for PropertyValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::String(s) => f.write_str(s),
            Self::Integer(i) => write!(f, "{i}"),
            Self::Float(x) => write!(f, "{x}"),
            Self::Boolean(b) => write!(f, "{b}"),
        }
    }
}

impl From<&str> for PropertyValue {
    fn from(s: &str) -> Self {
        Self::String(s.to_string())
    }
}

impl From<String> for PropertyValue {
    fn from(s: String) -> Self {
        Self::String(s)
    }
}

impl From<i64> for PropertyValue {
    fn from(i: i64) -> Self {
        Self::Integer(i)
    }
}

impl From<i32> for PropertyValue {
    fn from(i: i32) -> Self {
        Self::Integer(i64::from(i))
    }
}

impl From<f64> for PropertyValue {
    fn from(x: f64) -> Self {
        Self::Float(x)
    }
}

impl From<bool> for PropertyValue {
    fn from(b: bool) -> Self {
        Self::Boolean(b)
    }
}

// =============================================================================
// HAS CONTAINER
// =============================================================================

/// A single property predicate: `key <compare> value`.
///
/// Holds every value it was given, but only the first one is sent to the
/// server. OR-matching over the remaining values is not part of the wire
/// format.
#[derive(Debug, Clone, PartialEq)]
pub struct HasContainer {
    key: String,
    compare: Compare,
    values: Vec<PropertyValue>,
}

impl HasContainer {
    /// Build a predicate. `values` must not be empty.
    pub fn new(
        key: impl Into<String>,
        compare: Compare,
        values: Vec<PropertyValue>,
    ) -> Result<Self, ConfigurationError> {
        let key = key.into();
        if values.is_empty() {
            return Err(ConfigurationError::EmptyFilterValues { key });
        }
        Ok(Self {
            key,
            compare,
            values,
        })
    }

    pub(crate) fn single(key: String, compare: Compare, value: PropertyValue) -> Self {
        Self {
            key,
            compare,
            values: vec![value],
        }
    }

    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    #[must_use]
    pub fn compare(&self) -> Compare {
        self.compare
    }

    #[must_use]
    pub fn values(&self) -> &[PropertyValue] {
        &self.values
    }

    /// The value that ends up on the wire.
    #[must_use]
    pub fn first_value(&self) -> &PropertyValue {
        // non-empty by construction
        &self.values[0]
    }
}

impl FromStr for HasContainer {
    type Err = ConfigurationError;

    /// Parse `key,op,value`. The value may itself contain commas.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parts = s.splitn(3, ',');
        let (Some(key), Some(op), Some(value)) = (parts.next(), parts.next(), parts.next()) else {
            return Err(ConfigurationError::InvalidPropertyFilter(s.to_string()));
        };
        let key = key.trim();
        if key.is_empty() {
            return Err(ConfigurationError::InvalidPropertyFilter(s.to_string()));
        }
        let compare: Compare = op.parse()?;
        Self::new(key, compare, vec![PropertyValue::infer(value.trim())])
    }
}

// =============================================================================
// ERROR TYPES
// =============================================================================

/// A query that cannot be expressed on the wire.
///
/// Raised while the query is being configured, before any request is made.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigurationError {
    /// The comparator is not one of the six supported comparisons.
    #[error("Invalid comparator: {0:?}")]
    InvalidComparator(String),

    /// A property filter was given no value to compare against.
    #[error("Property filter on '{key}' has no values")]
    EmptyFilterValues { key: String },

    /// The direction is not `in`, `out` or `both`.
    #[error("Invalid direction: {0:?}")]
    InvalidDirection(String),

    /// A textual filter is not of the form `key,op,value`.
    #[error("Invalid property filter {0:?}, expected key,op,value")]
    InvalidPropertyFilter(String),
}

/// The remote call behind a terminal operation failed.
///
/// Never retried; one failed request is one error.
#[derive(Debug, Error)]
pub enum RemoteQueryError {
    /// Cannot reach the graph server.
    #[error("Cannot connect to {0}")]
    ConnectionFailed(String),

    /// 401 Unauthorized - invalid or missing credentials.
    #[error("Unauthorized: invalid or missing credentials")]
    Unauthorized,

    /// 429 Too Many Requests.
    #[error("Rate limited: too many requests")]
    RateLimited,

    /// Any other non-2xx status.
    #[error("Server returned status {0}: {1}")]
    Status(u16, String),

    /// The response body is not the JSON shape that was expected.
    #[error("Parse error: {0}")]
    Parse(String),

    /// The request could not be built or sent.
    #[error("Request error: {0}")]
    Request(String),
}

/// Errors returned by query operations.
#[derive(Debug, Error)]
pub enum QueryError {
    #[error(transparent)]
    Configuration(#[from] ConfigurationError),

    #[error(transparent)]
    Remote(#[from] RemoteQueryError),
}

// =============================================================================
// TESTS
// =============================================================================
