//! # Lazy Element Sequence
//!
//! Iterator returned by `edges()` and `vertices()`. Building one performs no
//! I/O; the first call to `next()` fetches and converts the whole result
//! array, later calls drain it.
//!
//! Conversion is all-or-nothing: if the request fails or any element cannot
//! be converted, the iterator yields a single `Err` and ends. It never hands
//! out part of a result.

use crate::element::FromElement;
use crate::graph::RemoteGraph;
use crate::types::QueryError;

enum State<T> {
    Pending,
    Loaded(std::vec::IntoIter<T>),
    Done,
}

/// Lazily fetched sequence of elements at one URI.
pub struct ElementIter<'g, T> {
    uri: String,
    graph: &'g RemoteGraph,
    state: State<T>,
}

impl<'g, T: FromElement> ElementIter<'g, T> {
    pub(crate) fn new(uri: String, graph: &'g RemoteGraph) -> Self {
        Self {
            uri,
            graph,
            state: State::Pending,
        }
    }

    /// The URI this sequence reads from.
    #[must_use]
    pub fn uri(&self) -> &str {
        &self.uri
    }

    /// Whether the request has been made.
    #[must_use]
    pub fn is_fetched(&self) -> bool {
        !matches!(self.state, State::Pending)
    }

    fn fetch(&self) -> Result<Vec<T>, QueryError> {
        let items = self.graph.executor().get_result_array(&self.uri)?;
        tracing::debug!(uri = %self.uri, count = items.len(), "fetched elements");
        let elements = items
            .into_iter()
            .map(T::from_element)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(elements)
    }
}

impl<T: FromElement> Iterator for ElementIter<'_, T> {
    type Item = Result<T, QueryError>;

    fn next(&mut self) -> Option<Self::Item> {
        if matches!(self.state, State::Pending) {
            match self.fetch() {
                Ok(elements) => self.state = State::Loaded(elements.into_iter()),
                Err(e) => {
                    self.state = State::Done;
                    return Some(Err(e));
                }
            }
        }
        match &mut self.state {
            State::Loaded(items) => items.next().map(Ok),
            State::Pending | State::Done => None,
        }
    }
}

impl<T> std::fmt::Debug for ElementIter<'_, T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ElementIter")
            .field("uri", &self.uri)
            .field("fetched", &!matches!(self.state, State::Pending))
            .finish()
    }
}
