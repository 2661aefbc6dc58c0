//! The platform root
//!
//! Bundles every service over one shared Entity Store so the API facade
//! holds a single handle.

use crate::auth::AuthService;
use crate::comments::CommentService;
use crate::config::CoreConfig;
use crate::notebooks::NotebookService;
use crate::proposals::ProposalService;
use crate::users::UserService;
use agora_store::EntityStore;
use std::sync::Arc;

/// All services over one store
#[derive(Debug)]
pub struct Agora<S> {
    config: CoreConfig,
    auth: AuthService<S>,
    notebooks: NotebookService<S>,
    proposals: ProposalService<S>,
    comments: CommentService<S>,
    users: UserService<S>,
}

impl<S: EntityStore> Agora<S> {
    /// Wire every service to the given store
    #[must_use]
    pub fn new(store: Arc<S>, config: CoreConfig) -> Self {
        Self {
            config,
            auth: AuthService::new(Arc::clone(&store)),
            notebooks: NotebookService::new(Arc::clone(&store)),
            proposals: ProposalService::new(Arc::clone(&store), config),
            comments: CommentService::new(Arc::clone(&store), config),
            users: UserService::new(store, config),
        }
    }

    /// Sign-in operations
    #[inline]
    #[must_use]
    pub fn auth(&self) -> &AuthService<S> {
        &self.auth
    }

    /// Notebook operations
    #[inline]
    #[must_use]
    pub fn notebooks(&self) -> &NotebookService<S> {
        &self.notebooks
    }

    /// Proposal lifecycle operations
    #[inline]
    #[must_use]
    pub fn proposals(&self) -> &ProposalService<S> {
        &self.proposals
    }

    /// Threaded-comment operations
    #[inline]
    #[must_use]
    pub fn comments(&self) -> &CommentService<S> {
        &self.comments
    }

    /// User profile operations
    #[inline]
    #[must_use]
    pub fn users(&self) -> &UserService<S> {
        &self.users
    }

    /// Shared configuration
    #[inline]
    #[must_use]
    pub fn config(&self) -> &CoreConfig {
        &self.config
    }
}
