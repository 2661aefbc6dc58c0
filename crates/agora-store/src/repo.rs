//! Repository traits - the Entity Store seam
//!
//! The services depend only on these traits, never on a concrete store.
//! Every mutating operation runs its precondition checks and its write as
//! one atomic transaction; implementations must serialize conflicting
//! writes on the same row and fail the loser with
//! [`StoreError::VersionConflict`] instead of letting both commit.

use crate::error::StoreError;
use crate::filter::{CommentFilter, ProposalFilter};
use crate::page::{Page, PageRequest};
use agora_domain::{
    Comment, CommentId, NewComment, NewNotebook, NewProposal, NewUser, Notebook, NotebookId,
    ProfilePatch, Proposal, ProposalId, ProposalPatch, User, UserId,
};

/// User rows
#[async_trait::async_trait]
pub trait UserRepo: Send + Sync {
    /// Create the user on first sight of `oauth_id`, otherwise refresh the
    /// display name (and avatar, when supplied) of the existing row.
    async fn upsert_user(&self, new: NewUser) -> Result<User, StoreError>;

    /// Fetch a user by id
    async fn find_user(&self, id: UserId) -> Result<Option<User>, StoreError>;

    /// Fetch a user by external-auth identifier
    async fn find_user_by_oauth_id(&self, oauth_id: &str) -> Result<Option<User>, StoreError>;

    /// Apply a profile patch; absent fields stay untouched
    ///
    /// # Errors
    /// `NotFound` when the user does not exist.
    async fn update_user_profile(
        &self,
        id: UserId,
        patch: ProfilePatch,
    ) -> Result<User, StoreError>;
}

/// Notebook rows
#[async_trait::async_trait]
pub trait NotebookRepo: Send + Sync {
    /// Insert a notebook
    ///
    /// # Errors
    /// `Duplicate` when the file path is already taken.
    async fn insert_notebook(&self, new: NewNotebook) -> Result<Notebook, StoreError>;

    /// Fetch a notebook by id
    async fn find_notebook(&self, id: NotebookId) -> Result<Option<Notebook>, StoreError>;

    /// All notebooks, ascending by file path
    async fn list_notebooks(&self) -> Result<Vec<Notebook>, StoreError>;

    /// Move a notebook to a new file path
    ///
    /// # Errors
    /// `NotFound`, `Duplicate` when another notebook holds the path, or
    /// `VersionConflict` on a concurrent write.
    async fn rename_notebook(
        &self,
        id: NotebookId,
        file_path: String,
        expected_version: u64,
    ) -> Result<Notebook, StoreError>;

    /// Remove a notebook
    ///
    /// # Errors
    /// `NotFound`, `HasDependents` while any proposal references it, or
    /// `VersionConflict` on a concurrent write.
    async fn delete_notebook(
        &self,
        id: NotebookId,
        expected_version: u64,
    ) -> Result<Notebook, StoreError>;
}

/// Proposal rows
#[async_trait::async_trait]
pub trait ProposalRepo: Send + Sync {
    /// Insert a proposal in DRAFT
    ///
    /// # Errors
    /// `NotFound` when the owning notebook is absent; the referential check
    /// and the insert are one transaction.
    async fn insert_proposal(&self, new: NewProposal) -> Result<Proposal, StoreError>;

    /// Fetch a proposal by id
    async fn find_proposal(&self, id: ProposalId) -> Result<Option<Proposal>, StoreError>;

    /// One page of proposals matching `filter`, descending by id
    async fn page_proposals(
        &self,
        filter: &ProposalFilter,
        page: PageRequest<ProposalId>,
    ) -> Result<Page<Proposal, ProposalId>, StoreError>;

    /// All proposals of a notebook, descending by id
    async fn proposals_in_notebook(
        &self,
        notebook_id: NotebookId,
    ) -> Result<Vec<Proposal>, StoreError>;

    /// Apply a patch; absent fields stay untouched
    ///
    /// Status legality is the lifecycle engine's concern; the store only
    /// guarantees atomicity and the version check.
    ///
    /// # Errors
    /// `NotFound` or `VersionConflict`.
    async fn apply_proposal_patch(
        &self,
        id: ProposalId,
        patch: &ProposalPatch,
        expected_version: u64,
    ) -> Result<Proposal, StoreError>;

    /// Remove a proposal together with every comment it owns, atomically
    ///
    /// # Errors
    /// `NotFound` or `VersionConflict`.
    async fn delete_proposal_cascading(
        &self,
        id: ProposalId,
        expected_version: u64,
    ) -> Result<Proposal, StoreError>;

    /// Number of proposals authored by a user
    async fn count_proposals_by_author(&self, author_id: UserId) -> Result<usize, StoreError>;
}

/// Comment rows
#[async_trait::async_trait]
pub trait CommentRepo: Send + Sync {
    /// Insert a comment
    ///
    /// # Errors
    /// `NotFound` when the proposal or the referenced parent is absent,
    /// `ParentOutsideProposal` when the parent belongs to another proposal.
    /// All referential checks and the insert are one transaction.
    async fn insert_comment(&self, new: NewComment) -> Result<Comment, StoreError>;

    /// Fetch a comment by id
    async fn find_comment(&self, id: CommentId) -> Result<Option<Comment>, StoreError>;

    /// One page of comments matching `filter`, descending by id
    async fn page_comments(
        &self,
        filter: &CommentFilter,
        page: PageRequest<CommentId>,
    ) -> Result<Page<Comment, CommentId>, StoreError>;

    /// Direct replies to a comment, ascending by id (oldest first)
    async fn replies_of(&self, id: CommentId) -> Result<Vec<Comment>, StoreError>;

    /// All top-level comments of a proposal, descending by id (newest first)
    async fn top_level_comments(&self, proposal_id: ProposalId)
        -> Result<Vec<Comment>, StoreError>;

    /// Number of direct replies to a comment
    async fn count_replies(&self, id: CommentId) -> Result<usize, StoreError>;

    /// Number of comments on a proposal (all depths)
    async fn count_comments_in_proposal(
        &self,
        proposal_id: ProposalId,
    ) -> Result<usize, StoreError>;

    /// Number of comments authored by a user
    async fn count_comments_by_author(&self, author_id: UserId) -> Result<usize, StoreError>;

    /// Replace a comment's content
    ///
    /// # Errors
    /// `NotFound` or `VersionConflict`.
    async fn set_comment_content(
        &self,
        id: CommentId,
        content: String,
        expected_version: u64,
    ) -> Result<Comment, StoreError>;

    /// Remove a comment and, transitively, its whole descendant subtree
    ///
    /// Returns the deleted root. The traversal and every removal are one
    /// transaction; no orphaned replies remain.
    ///
    /// # Errors
    /// `NotFound` or `VersionConflict` (checked on the root).
    async fn delete_comment_subtree(
        &self,
        id: CommentId,
        expected_version: u64,
    ) -> Result<Comment, StoreError>;
}

/// The full Entity Store: all four repositories behind one handle
pub trait EntityStore: UserRepo + NotebookRepo + ProposalRepo + CommentRepo {}

impl<T: UserRepo + NotebookRepo + ProposalRepo + CommentRepo> EntityStore for T {}
