//! Query failure taxonomy.

use std::fmt;

use thiserror::Error;

/// Broad category of a failed query.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[allow(clippy::module_name_repetitions)]
pub enum QueryErrorKind {
    /// Network, DNS, HTTP status or rate-limit failure.
    Transport,
    /// The response body was not the expected JSON.
    Parse,
    /// The caller passed an unusable id, query or page.
    InvalidInput,
}

impl fmt::Display for QueryErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Transport => write!(f, "transport error"),
            Self::Parse => write!(f, "parse error"),
            Self::InvalidInput => write!(f, "invalid input"),
        }
    }
}

/// A query that did not produce a result.
///
/// Returned instead of panicking or propagating transport errors, so
/// callers can tell an empty result apart from a failed request.
#[derive(Debug, Clone, Error)]
#[error("{kind}: {message}")]
#[allow(clippy::module_name_repetitions)]
pub struct QueryError {
    /// Failure category.
    pub kind: QueryErrorKind,
    /// Human-readable detail, including the context chain.
    pub message: String,
}

impl QueryError {
    /// Creates an `InvalidInput` error.
    pub(crate) fn invalid_input(message: impl Into<String>) -> Self {
        Self {
            kind: QueryErrorKind::InvalidInput,
            message: message.into(),
        }
    }

    /// Classifies a transport-layer error.
    ///
    /// Any `serde_json::Error` in the chain makes it a `Parse` failure;
    /// everything else is `Transport`.
    pub(crate) fn from_transport(err: &anyhow::Error) -> Self {
        let kind = if err.chain().any(|cause| cause.is::<serde_json::Error>()) {
            QueryErrorKind::Parse
        } else {
            QueryErrorKind::Transport
        };
        Self {
            kind,
            message: format!("{err:#}"),
        }
    }
}
