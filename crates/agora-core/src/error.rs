//! Core error taxonomy
//!
//! Every operation failure is one of these kinds; the API facade maps each
//! kind onto a transport status. Failures are deterministic and carry no
//! partial side effect - the store either commits a whole mutation or none
//! of it.

use agora_store::StoreError;

/// Operation failure
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    /// Referenced entity absent
    #[error("{0} not found")]
    NotFound(&'static str),

    /// Invalid state transition, cross-entity mismatch, or malformed
    /// partial-update combination
    #[error("bad request: {0}")]
    BadRequest(String),

    /// Authenticated but not authorized for this resource
    #[error("forbidden: {0}")]
    Forbidden(&'static str),

    /// No valid principal on an authenticated-only operation
    #[error("authentication required")]
    Unauthorized,

    /// Uniqueness violation or concurrent-transition race
    #[error("conflict: {0}")]
    Conflict(String),

    /// Structural precondition blocking the operation
    #[error("precondition failed: {0}")]
    PreconditionFailed(String),

    /// Transient or unexpected backend failure; retried, if at all, by the
    /// external caller
    #[error("internal error: {0}")]
    Internal(#[source] anyhow::Error),
}

/// Classification of a [`CoreError`], for transport mapping
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Referenced entity absent
    NotFound,
    /// Malformed or illegal request
    BadRequest,
    /// Caller lacks ownership of the resource
    Forbidden,
    /// No principal resolved
    Unauthorized,
    /// Uniqueness or concurrency conflict
    Conflict,
    /// Structural precondition failed
    PreconditionFailed,
    /// Backend failure
    Internal,
}

impl CoreError {
    /// The taxonomy kind of this error
    #[inline]
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::NotFound(_) => ErrorKind::NotFound,
            Self::BadRequest(_) => ErrorKind::BadRequest,
            Self::Forbidden(_) => ErrorKind::Forbidden,
            Self::Unauthorized => ErrorKind::Unauthorized,
            Self::Conflict(_) => ErrorKind::Conflict,
            Self::PreconditionFailed(_) => ErrorKind::PreconditionFailed,
            Self::Internal(_) => ErrorKind::Internal,
        }
    }

    /// Shorthand for a [`CoreError::BadRequest`]
    #[inline]
    #[must_use]
    pub fn bad_request(msg: impl Into<String>) -> Self {
        Self::BadRequest(msg.into())
    }
}

impl From<StoreError> for CoreError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound { entity } => Self::NotFound(entity),
            StoreError::VersionConflict { .. } => Self::Conflict(err.to_string()),
            StoreError::Duplicate { .. } => Self::Conflict(err.to_string()),
            StoreError::HasDependents { .. } => Self::PreconditionFailed(err.to_string()),
            StoreError::ParentOutsideProposal => Self::BadRequest(err.to_string()),
            StoreError::Backend(inner) => Self::Internal(inner),
        }
    }
}

impl From<agora_domain::DomainError> for CoreError {
    fn from(err: agora_domain::DomainError) -> Self {
        Self::BadRequest(err.to_string())
    }
}
