//! Comment entity
//!
//! Comments form a self-referential tree per proposal: `parent_id` points
//! at another comment of the **same** proposal, `None` marks a top-level
//! comment. Parents always precede their children temporally, so the tree
//! is acyclic by construction; deletion still has to walk the subtree.

use crate::id::{CommentId, ProposalId, UserId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A threaded comment on a proposal
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comment {
    /// Identifier
    pub id: CommentId,
    /// Owning proposal; immutable
    pub proposal_id: ProposalId,
    /// Author; immutable
    pub author_id: UserId,
    /// Parent comment within the same proposal; `None` = top-level
    pub parent_id: Option<CommentId>,
    /// Body text (1–10000 chars)
    pub content: String,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
    /// Optimistic concurrency counter, bumped on every write
    pub version: u64,
}

/// Input for comment creation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewComment {
    /// Owning proposal
    pub proposal_id: ProposalId,
    /// Author
    pub author_id: UserId,
    /// Parent comment, if this is a reply
    pub parent_id: Option<CommentId>,
    /// Body text (1–10000 chars)
    pub content: String,
}

impl NewComment {
    /// Create a top-level comment record
    #[inline]
    #[must_use]
    pub fn new(proposal_id: ProposalId, author_id: UserId, content: impl Into<String>) -> Self {
        Self {
            proposal_id,
            author_id,
            parent_id: None,
            content: content.into(),
        }
    }

    /// As a reply to an existing comment
    #[inline]
    #[must_use]
    pub fn in_reply_to(mut self, parent_id: CommentId) -> Self {
        self.parent_id = Some(parent_id);
        self
    }
}
