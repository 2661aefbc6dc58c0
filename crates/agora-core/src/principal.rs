//! Authorization guard
//!
//! Credential verification happens outside the core; what arrives here is
//! an already-resolved principal, or nothing. The guard is threaded
//! explicitly through every operation signature - there is no ambient
//! session state. Mutating operations additionally check resource
//! ownership beyond plain authentication.

use crate::error::CoreError;
use agora_domain::UserId;
use serde::{Deserialize, Serialize};

/// The authenticated caller identity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Principal {
    /// The caller's user id
    pub user_id: UserId,
}

impl Principal {
    /// Wrap a resolved user id
    #[inline]
    #[must_use]
    pub fn new(user_id: UserId) -> Self {
        Self { user_id }
    }
}

/// Per-request authentication context: a principal, or none
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthContext {
    principal: Option<Principal>,
}

impl AuthContext {
    /// Context without a caller identity
    #[inline]
    #[must_use]
    pub fn anonymous() -> Self {
        Self { principal: None }
    }

    /// Context for a verified caller
    #[inline]
    #[must_use]
    pub fn authenticated(user_id: UserId) -> Self {
        Self {
            principal: Some(Principal::new(user_id)),
        }
    }

    /// The principal, if one was resolved
    #[inline]
    #[must_use]
    pub fn principal(&self) -> Option<&Principal> {
        self.principal.as_ref()
    }

    /// The principal, or [`CoreError::Unauthorized`]
    ///
    /// Authenticated-only operations call this first.
    pub fn require(&self) -> Result<&Principal, CoreError> {
        self.principal.as_ref().ok_or(CoreError::Unauthorized)
    }
}

/// Ownership check: only the resource author may proceed
///
/// `resource` names the entity in the [`CoreError::Forbidden`] message.
pub fn ensure_author(
    principal: &Principal,
    author_id: UserId,
    resource: &'static str,
) -> Result<(), CoreError> {
    if principal.user_id == author_id {
        Ok(())
    } else {
        Err(CoreError::Forbidden(resource))
    }
}
