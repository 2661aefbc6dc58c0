//! Filter criteria for list queries
//!
//! Each field is independently present-or-absent; an absent field means
//! "don't filter on this", never a silent default.

use agora_domain::{Comment, CommentId, NotebookId, Proposal, ProposalId, ProposalStatus, UserId};
use serde::{Deserialize, Serialize};

/// Criteria for proposal listings
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProposalFilter {
    /// Restrict to one notebook
    pub notebook_id: Option<NotebookId>,
    /// Restrict to one lifecycle status
    pub status: Option<ProposalStatus>,
    /// Restrict to one author
    pub author_id: Option<UserId>,
}

impl ProposalFilter {
    /// Match everything
    #[inline]
    #[must_use]
    pub fn any() -> Self {
        Self::default()
    }

    /// Restrict to a notebook
    #[inline]
    #[must_use]
    pub fn in_notebook(mut self, id: NotebookId) -> Self {
        self.notebook_id = Some(id);
        self
    }

    /// Restrict to a status
    #[inline]
    #[must_use]
    pub fn with_status(mut self, status: ProposalStatus) -> Self {
        self.status = Some(status);
        self
    }

    /// Restrict to an author
    #[inline]
    #[must_use]
    pub fn by_author(mut self, id: UserId) -> Self {
        self.author_id = Some(id);
        self
    }

    /// Whether a proposal satisfies every present criterion
    #[must_use]
    pub fn matches(&self, proposal: &Proposal) -> bool {
        self.notebook_id.map_or(true, |id| proposal.notebook_id == id)
            && self.status.map_or(true, |s| proposal.status == s)
            && self.author_id.map_or(true, |id| proposal.author_id == id)
    }
}

/// Which tree position a comment listing targets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ParentScope {
    /// Only top-level comments (`parent_id` absent)
    TopLevel,
    /// Only direct replies to the given comment
    RepliesTo(CommentId),
}

impl ParentScope {
    /// Whether a comment sits in this scope
    #[inline]
    #[must_use]
    pub fn matches(&self, comment: &Comment) -> bool {
        match self {
            Self::TopLevel => comment.parent_id.is_none(),
            Self::RepliesTo(id) => comment.parent_id == Some(*id),
        }
    }
}

/// Criteria for comment listings
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommentFilter {
    /// Restrict to one proposal
    pub proposal_id: Option<ProposalId>,
    /// Restrict to a tree position; absent means any depth
    pub parent: Option<ParentScope>,
    /// Restrict to one author
    pub author_id: Option<UserId>,
}

impl CommentFilter {
    /// Match everything
    #[inline]
    #[must_use]
    pub fn any() -> Self {
        Self::default()
    }

    /// Restrict to a proposal
    #[inline]
    #[must_use]
    pub fn in_proposal(mut self, id: ProposalId) -> Self {
        self.proposal_id = Some(id);
        self
    }

    /// Restrict to a tree position
    #[inline]
    #[must_use]
    pub fn in_scope(mut self, scope: ParentScope) -> Self {
        self.parent = Some(scope);
        self
    }

    /// Restrict to an author
    #[inline]
    #[must_use]
    pub fn by_author(mut self, id: UserId) -> Self {
        self.author_id = Some(id);
        self
    }

    /// Whether a comment satisfies every present criterion
    #[must_use]
    pub fn matches(&self, comment: &Comment) -> bool {
        self.proposal_id.map_or(true, |id| comment.proposal_id == id)
            && self.parent.map_or(true, |scope| scope.matches(comment))
            && self.author_id.map_or(true, |id| comment.author_id == id)
    }
}
