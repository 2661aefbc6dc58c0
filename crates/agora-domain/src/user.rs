//! User entity
//!
//! Users are created on first successful external authentication and
//! refreshed (name/avatar) on subsequent sign-ins. They are never
//! hard-deleted.

use crate::id::UserId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A registered user
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Identifier
    pub id: UserId,
    /// External-auth identifier, globally unique (e.g. `github_1234`)
    pub oauth_id: String,
    /// Display name
    pub name: String,
    /// Optional avatar URL
    pub avatar_url: Option<String>,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
}

/// Input for the sign-in upsert
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewUser {
    /// External-auth identifier
    pub oauth_id: String,
    /// Display name
    pub name: String,
    /// Optional avatar URL
    pub avatar_url: Option<String>,
}

impl NewUser {
    /// Create a new-user record
    #[inline]
    #[must_use]
    pub fn new(oauth_id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            oauth_id: oauth_id.into(),
            name: name.into(),
            avatar_url: None,
        }
    }

    /// With avatar URL
    #[inline]
    #[must_use]
    pub fn with_avatar(mut self, url: impl Into<String>) -> Self {
        self.avatar_url = Some(url.into());
        self
    }
}

/// Partial profile update; each field independently present-or-absent
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfilePatch {
    /// New display name
    pub name: Option<String>,
    /// New avatar URL
    pub avatar_url: Option<String>,
}

impl ProfilePatch {
    /// Create an empty patch
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// With display name
    #[inline]
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// With avatar URL
    #[inline]
    #[must_use]
    pub fn with_avatar(mut self, url: impl Into<String>) -> Self {
        self.avatar_url = Some(url.into());
        self
    }

    /// True when no field is supplied
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.avatar_url.is_none()
    }
}
