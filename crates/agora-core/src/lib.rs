//! Agora Core - governance platform operations
//!
//! The operational heart of the platform:
//! - Proposal Lifecycle Engine: the DRAFT/ACTIVE/terminal state machine
//!   and the field-mutability rules tied to it
//! - Comment Tree Manager: threaded comments with transitive cascade
//!   deletion
//! - Authorization Guard: explicit principals, author-only mutations
//! - Enriched read models over the keyset-paginated store seam
//!
//! # Example
//!
//! ```rust,ignore
//! use agora_core::{Agora, AuthContext, CoreConfig, OauthProvider, SignIn};
//! use agora_store::MemoryStore;
//! use std::sync::Arc;
//!
//! # async fn example() -> Result<(), agora_core::CoreError> {
//! let agora = Agora::new(Arc::new(MemoryStore::new()), CoreConfig::new());
//!
//! let user = agora
//!     .auth()
//!     .sign_in(SignIn::new(OauthProvider::GitHub, "1234", "ada"))
//!     .await?;
//! let ctx = AuthContext::authenticated(user.id);
//!
//! let notebook = agora
//!     .notebooks()
//!     .create(&ctx, "notes/governance.md".into())
//!     .await?;
//! let proposal = agora
//!     .proposals()
//!     .create(&ctx, "Adopt the proposal".into(), notebook.id, 60.0, 5)
//!     .await?;
//! # Ok(())
//! # }
//! ```

#![warn(unreachable_pub)]
#![allow(missing_docs)]

// Core modules
pub mod agora;
pub mod auth;
pub mod comments;
pub mod config;
mod enrich;
pub mod error;
pub mod notebooks;
pub mod principal;
pub mod proposals;
pub mod users;
pub mod views;

// Re-exports for convenience
pub use agora::Agora;
pub use auth::{AuthService, OauthProvider, SignIn};
pub use comments::CommentService;
pub use config::CoreConfig;
pub use error::{CoreError, ErrorKind};
pub use notebooks::NotebookService;
pub use principal::{ensure_author, AuthContext, Principal};
pub use proposals::ProposalService;
pub use users::UserService;
pub use views::{
    AuthorRef, CommentThread, CommentView, NotebookDetail, NotebookRef, ProposalDetail,
    ProposalOverview, ProposalRef, ProposalSummary, UserComment, UserProfile, UserProposal,
};

/// Prelude module for common imports
pub mod prelude {
    //! Common imports for working with the platform core
    pub use crate::{
        Agora, AuthContext, CoreConfig, CoreError, ErrorKind, OauthProvider, Principal, SignIn,
    };
    pub use agora_domain::{
        Comment, CommentId, Notebook, NotebookId, Proposal, ProposalId, ProposalPatch,
        ProposalStatus, User, UserId,
    };
    pub use agora_store::{Page, PageRequest, ProposalFilter};
}

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
