//! Store error type
//!
//! Every failure a repository implementation may surface. The service layer
//! translates these into the caller-facing taxonomy; the variants here stay
//! close to what a transactional store can actually detect.

/// Repository failure
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// Referenced row does not exist
    #[error("{entity} not found")]
    NotFound {
        /// Entity kind, e.g. `"proposal"`
        entity: &'static str,
    },

    /// Optimistic version check failed: the row changed since it was read
    #[error("concurrent write on {entity}: expected version {expected}, found {found}")]
    VersionConflict {
        /// Entity kind
        entity: &'static str,
        /// Version the caller observed
        expected: u64,
        /// Version currently stored
        found: u64,
    },

    /// Unique key already taken
    #[error("duplicate {field}: {value:?}")]
    Duplicate {
        /// Field carrying the uniqueness constraint
        field: &'static str,
        /// Offending value
        value: String,
    },

    /// Row still referenced by dependents and cannot be removed
    #[error("{entity} still has dependents")]
    HasDependents {
        /// Entity kind
        entity: &'static str,
    },

    /// Comment parent belongs to a different proposal
    #[error("parent comment belongs to a different proposal")]
    ParentOutsideProposal,

    /// Opaque backend failure (connection loss, serialization, ...)
    #[error("store backend failure: {0}")]
    Backend(#[from] anyhow::Error),
}

impl StoreError {
    /// Shorthand for [`StoreError::NotFound`]
    #[inline]
    #[must_use]
    pub fn not_found(entity: &'static str) -> Self {
        Self::NotFound { entity }
    }
}
