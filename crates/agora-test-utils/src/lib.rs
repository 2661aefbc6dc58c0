//! Testing utilities for the Agora workspace
//!
//! Shared fixtures: a platform over a fresh in-memory store, sign-in
//! helpers, and common entity setups.

#![allow(missing_docs)]

use agora_core::{Agora, AuthContext, CoreConfig, OauthProvider, SignIn};
use agora_domain::{Notebook, Proposal, User};
use agora_store::MemoryStore;
use std::sync::Arc;

/// Install a test subscriber honoring `RUST_LOG`; safe to call repeatedly.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// A platform over a fresh in-memory store with default configuration.
pub fn test_platform() -> Agora<MemoryStore> {
    Agora::new(Arc::new(MemoryStore::new()), CoreConfig::new())
}

/// Sign a user in by name; the GitHub subject is derived from the name,
/// so the same name always resolves to the same user.
pub async fn sign_in(agora: &Agora<MemoryStore>, name: &str) -> (User, AuthContext) {
    let user = agora
        .auth()
        .sign_in(SignIn::new(OauthProvider::GitHub, name, name))
        .await
        .expect("test sign-in");
    let ctx = AuthContext::authenticated(user.id);
    (user, ctx)
}

/// A notebook created by the given caller.
pub async fn notebook(
    agora: &Agora<MemoryStore>,
    ctx: &AuthContext,
    file_path: &str,
) -> Notebook {
    agora
        .notebooks()
        .create(ctx, file_path.to_string())
        .await
        .expect("test notebook")
}

/// A DRAFT proposal in the given notebook.
pub async fn draft_proposal(
    agora: &Agora<MemoryStore>,
    ctx: &AuthContext,
    notebook: &Notebook,
    title: &str,
) -> Proposal {
    agora
        .proposals()
        .create(ctx, title.to_string(), notebook.id, 60.0, 5)
        .await
        .expect("test proposal")
}

/// Platform plus a signed-in author and a notebook: the common starting
/// point for lifecycle and comment tests.
pub async fn seeded_platform() -> (Agora<MemoryStore>, User, AuthContext, Notebook) {
    let agora = test_platform();
    let (user, ctx) = sign_in(&agora, "ada").await;
    let nb = notebook(&agora, &ctx, "nb1").await;
    (agora, user, ctx, nb)
}
