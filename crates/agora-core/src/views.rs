//! Enriched read models
//!
//! Listings and detail reads return stored rows joined with the public
//! fields of related entities, mirroring what the remote procedures
//! declare as their return shapes.

use agora_domain::{
    Comment, Notebook, NotebookId, Proposal, ProposalId, ProposalStatus, User, UserId,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Public author fields attached to proposals and comments
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthorRef {
    /// Author id
    pub id: UserId,
    /// Display name
    pub name: String,
    /// Optional avatar URL
    pub avatar_url: Option<String>,
}

impl From<&User> for AuthorRef {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            name: user.name.clone(),
            avatar_url: user.avatar_url.clone(),
        }
    }
}

/// Notebook fields attached to proposal listings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotebookRef {
    /// Notebook id
    pub id: NotebookId,
    /// Unique file path
    pub file_path: String,
}

impl From<&Notebook> for NotebookRef {
    fn from(notebook: &Notebook) -> Self {
        Self {
            id: notebook.id,
            file_path: notebook.file_path.clone(),
        }
    }
}

/// Proposal fields attached to per-user comment listings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProposalRef {
    /// Proposal id
    pub id: ProposalId,
    /// Title
    pub title: String,
}

impl From<&Proposal> for ProposalRef {
    fn from(proposal: &Proposal) -> Self {
        Self {
            id: proposal.id,
            title: proposal.title.clone(),
        }
    }
}

/// A comment with its author and direct-reply count
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommentView {
    /// The comment row
    pub comment: Comment,
    /// Public author fields
    pub author: AuthorRef,
    /// Number of direct replies
    pub reply_count: usize,
}

/// A comment plus all of its direct replies, oldest first
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommentThread {
    /// The comment row
    pub comment: Comment,
    /// Public author fields
    pub author: AuthorRef,
    /// Direct replies, oldest first, each with author and reply count
    pub replies: Vec<CommentView>,
}

/// A proposal listing row: author, notebook, and comment count attached
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProposalSummary {
    /// The proposal row
    pub proposal: Proposal,
    /// Public author fields
    pub author: AuthorRef,
    /// Owning notebook
    pub notebook: NotebookRef,
    /// Number of comments at any depth
    pub comment_count: usize,
}

/// A full proposal read: complete author and notebook rows plus the
/// top-level comments, newest first
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProposalDetail {
    /// The proposal row
    pub proposal: Proposal,
    /// Full author row
    pub author: User,
    /// Full notebook row
    pub notebook: Notebook,
    /// Top-level comments, newest first
    pub comments: Vec<CommentView>,
}

/// Row of a notebook's proposal listing
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProposalOverview {
    /// Proposal id
    pub id: ProposalId,
    /// Title
    pub title: String,
    /// Lifecycle status
    pub status: ProposalStatus,
    /// Public author fields
    pub author: AuthorRef,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
}

impl ProposalOverview {
    /// Project a proposal row onto the overview shape
    #[must_use]
    pub fn new(proposal: &Proposal, author: AuthorRef) -> Self {
        Self {
            id: proposal.id,
            title: proposal.title.clone(),
            status: proposal.status,
            author,
            created_at: proposal.created_at,
        }
    }
}

/// A notebook with its proposals, newest first
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotebookDetail {
    /// The notebook row
    pub notebook: Notebook,
    /// Proposals in the notebook, newest first
    pub proposals: Vec<ProposalOverview>,
}

/// Public profile with authored-content counts
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    /// User id
    pub id: UserId,
    /// Display name
    pub name: String,
    /// Optional avatar URL
    pub avatar_url: Option<String>,
    /// Number of proposals authored
    pub proposal_count: usize,
    /// Number of comments authored
    pub comment_count: usize,
}

/// Row of a per-user proposal listing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserProposal {
    /// The proposal row
    pub proposal: Proposal,
    /// Owning notebook
    pub notebook: NotebookRef,
    /// Number of comments at any depth
    pub comment_count: usize,
}

/// Row of a per-user comment listing
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserComment {
    /// The comment row
    pub comment: Comment,
    /// Proposal the comment sits on
    pub proposal: ProposalRef,
    /// Number of direct replies
    pub reply_count: usize,
}
