//! Sign-in upsert and session-principal lookup
//!
//! Credential verification (the OAuth dance, token checks) happens in the
//! external boundary; by the time this service runs, the identity claims
//! are trusted. Users are created on first sight of an external identity
//! and refreshed on every later sign-in.

use crate::error::CoreError;
use crate::principal::AuthContext;
use agora_domain::{validate, NewUser, User};
use agora_store::EntityStore;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Supported external identity providers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OauthProvider {
    /// GitHub OAuth
    GitHub,
    /// Google OAuth
    Google,
}

impl OauthProvider {
    /// Stable lowercase token used in stored `oauth_id`s
    #[inline]
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::GitHub => "github",
            Self::Google => "google",
        }
    }
}

impl std::fmt::Display for OauthProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Verified identity claims from an external provider
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignIn {
    /// Which provider verified the caller
    pub provider: OauthProvider,
    /// The provider's stable subject identifier
    pub subject: String,
    /// Display name claimed by the provider
    pub name: String,
    /// Avatar URL claimed by the provider
    pub avatar_url: Option<String>,
}

impl SignIn {
    /// Claims without an avatar
    #[inline]
    #[must_use]
    pub fn new(
        provider: OauthProvider,
        subject: impl Into<String>,
        name: impl Into<String>,
    ) -> Self {
        Self {
            provider,
            subject: subject.into(),
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

    /// The globally unique stored identifier for these claims
    #[inline]
    #[must_use]
    pub fn oauth_id(&self) -> String {
        format!("{}_{}", self.provider, self.subject)
    }
}

/// Sign-in and current-user operations
#[derive(Debug)]
pub struct AuthService<S> {
    store: Arc<S>,
}

impl<S: EntityStore> AuthService<S> {
    /// Create the service
    #[inline]
    #[must_use]
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    /// Create-or-refresh the user behind verified identity claims
    ///
    /// First sign-in creates the user; later sign-ins refresh the display
    /// name and, when supplied, the avatar.
    ///
    /// # Errors
    /// `BadRequest` on out-of-bounds name or a malformed avatar URL.
    pub async fn sign_in(&self, claims: SignIn) -> Result<User, CoreError> {
        validate::name(&claims.name)?;
        if let Some(url) = &claims.avatar_url {
            validate::avatar_url(url)?;
        }

        let oauth_id = claims.oauth_id();
        let user = self
            .store
            .upsert_user(NewUser {
                oauth_id: oauth_id.clone(),
                name: claims.name,
                avatar_url: claims.avatar_url,
            })
            .await?;
        tracing::info!("sign-in for {} as user {}", oauth_id, user.id);
        Ok(user)
    }

    /// The full user row behind the caller's principal
    ///
    /// # Errors
    /// `Unauthorized` without a principal; `NotFound` when the user row is
    /// gone.
    pub async fn current_user(&self, ctx: &AuthContext) -> Result<User, CoreError> {
        let principal = ctx.require()?;
        self.store
            .find_user(principal.user_id)
            .await?
            .ok_or(CoreError::NotFound("user"))
    }
}
