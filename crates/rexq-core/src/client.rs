//! # HTTP-GET Executor
//!
//! The narrow seam between query building and the network. A
//! [`RestExecutor`] turns one URI into one parsed JSON document.
//! [`HttpExecutor`] is the blocking reqwest implementation.
//!
//! No retries are performed. Timeouts belong to the executor, not to the
//! query.

use crate::tokens::RESULTS;
use crate::types::RemoteQueryError;
use reqwest::StatusCode;
use reqwest::blocking::{Client, RequestBuilder, Response};
use serde_json::Value;
use std::time::Duration;

// =============================================================================
// EXECUTOR TRAIT
// =============================================================================

/// Performs GET requests and parses the JSON response.
pub trait RestExecutor {
    /// GET `uri` and return the parsed JSON body.
    fn get(&self, uri: &str) -> Result<Value, RemoteQueryError>;

    /// GET `uri` and return its element array.
    ///
    /// A bare array is returned as is; an object must carry a `results` array.
    fn get_result_array(&self, uri: &str) -> Result<Vec<Value>, RemoteQueryError> {
        result_array(self.get(uri)?)
    }
}

/// Pull the element array out of a response body.
pub fn result_array(body: Value) -> Result<Vec<Value>, RemoteQueryError> {
    match body {
        Value::Array(items) => Ok(items),
        Value::Object(mut map) => match map.remove(RESULTS) {
            Some(Value::Array(items)) => Ok(items),
            Some(other) => Err(RemoteQueryError::Parse(format!(
                "'{RESULTS}' is not an array: {other}"
            ))),
            None => Err(RemoteQueryError::Parse(format!(
                "response has no '{RESULTS}' array"
            ))),
        },
        other => Err(RemoteQueryError::Parse(format!(
            "expected an array or object, got {other}"
        ))),
    }
}

// =============================================================================
// HTTP EXECUTOR
// =============================================================================

/// Credentials attached to every request.
#[derive(Clone, PartialEq, Eq)]
pub enum Auth {
    /// `Authorization: Bearer <token>`.
    Bearer(String),
    /// HTTP Basic.
    Basic { username: String, password: String },
}

impl std::fmt::Debug for Auth {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Bearer(_) => f.write_str("Bearer(***)"),
            Self::Basic { username, .. } => write!(f, "Basic({username}, ***)"),
        }
    }
}

/// Blocking HTTP client for a Rexster-style REST server.
#[derive(Clone, Debug)]
pub struct HttpExecutor {
    http: Client,
    auth: Option<Auth>,
}

impl HttpExecutor {
    /// Create an executor with no credentials and no timeout.
    pub fn new() -> Result<Self, RemoteQueryError> {
        Self::with_options(None, None)
    }

    /// Create an executor with optional credentials and request timeout.
    pub fn with_options(
        auth: Option<Auth>,
        timeout: Option<Duration>,
    ) -> Result<Self, RemoteQueryError> {
        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let http = builder
            .build()
            .map_err(|e| RemoteQueryError::Request(e.to_string()))?;
        Ok(Self { http, auth })
    }

    /// Build a GET request with JSON accept header and optional auth.
    fn request(&self, uri: &str) -> RequestBuilder {
        let mut req = self
            .http
            .get(uri)
            .header(reqwest::header::ACCEPT, "application/json");
        match &self.auth {
            Some(Auth::Bearer(token)) => req = req.bearer_auth(token),
            Some(Auth::Basic { username, password }) => {
                req = req.basic_auth(username, Some(password));
            }
            None => {}
        }
        req
    }

    /// Send a request and map transport failures.
    fn send(&self, uri: &str, req: RequestBuilder) -> Result<Response, RemoteQueryError> {
        req.send().map_err(|e| {
            if e.is_builder() {
                RemoteQueryError::Request(format!("{uri}: {e}"))
            } else {
                RemoteQueryError::ConnectionFailed(format!("{uri}: {e}"))
            }
        })
    }

    /// Check the status code and parse the JSON body.
    fn handle_response(&self, resp: Response) -> Result<Value, RemoteQueryError> {
        let status = resp.status();
        if status == StatusCode::UNAUTHORIZED {
            return Err(RemoteQueryError::Unauthorized);
        }
        if status == StatusCode::TOO_MANY_REQUESTS {
            return Err(RemoteQueryError::RateLimited);
        }
        if !status.is_success() {
            let body = resp.text().unwrap_or_default();
            return Err(RemoteQueryError::Status(status.as_u16(), body));
        }
        resp.json::<Value>()
            .map_err(|e| RemoteQueryError::Parse(e.to_string()))
    }
}

impl RestExecutor for HttpExecutor {
    fn get(&self, uri: &str) -> Result<Value, RemoteQueryError> {
        tracing::debug!(uri, "GET");
        let req = self.request(uri);
        let resp = self.send(uri, req)?;
        self.handle_response(resp).inspect_err(|e| {
            tracing::debug!(uri, error = %e, "GET failed");
        })
    }
}

// =============================================================================
// TESTS
// =============================================================================
