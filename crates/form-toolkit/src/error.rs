// File: crates/form-toolkit/src/error.rs
// Purpose: Error types for tree mutation, submission and formatting

use thiserror::Error;

/// Failures raised by an [`ElementFactory`](crate::dom::ElementFactory)
/// implementation while mutating or reading the document tree
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomError {
    #[error("node is not a child of the given parent")]
    NotAChild,

    #[error("node is not attached to a parent")]
    Detached,

    #[error("node does not belong to this document")]
    UnknownNode,

    #[error("hierarchy request error: {0}")]
    HierarchyRequest(String),

    /// Error surfaced by the host platform (e.g. a thrown JS exception)
    #[error("platform error: {0}")]
    Platform(String),
}

/// Why a form submission produced no usable response
#[derive(Debug, Error)]
pub enum SubmitError {
    #[error("transport failure: {0}")]
    Transport(String),

    #[error("response body is not JSON: {0}")]
    Decode(#[from] serde_json::Error),
}

/// Formatting failures
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum FormatError {
    #[error("unparsable date: {0:?}")]
    UnparsableDate(String),
}
