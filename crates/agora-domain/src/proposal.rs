//! Proposal entity and lifecycle state machine
//!
//! A proposal moves along a fixed transition graph:
//!
//! ```text
//! DRAFT ──→ ACTIVE ──→ PASSED
//!   │          │   └──→ REJECTED
//!   └──────────┴──────→ EXPIRED
//! ```
//!
//! PASSED, REJECTED, and EXPIRED are terminal. PASSED/REJECTED would be
//! reached by vote tallying, which is outside this core; the only status
//! writes exposed here are activation (DRAFT → ACTIVE) and the explicit
//! EXPIRED escape.

use crate::id::{NotebookId, ProposalId, UserId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Lifecycle status of a proposal
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ProposalStatus {
    /// Initial state; the only state where fields are editable
    Draft,
    /// Open for participation
    Active,
    /// Terminal: reached quorum and threshold
    Passed,
    /// Terminal: failed quorum or threshold
    Rejected,
    /// Terminal: explicitly expired from DRAFT or ACTIVE
    Expired,
}

impl ProposalStatus {
    /// All states reachable from `self` in one transition
    #[must_use]
    pub fn successors(self) -> &'static [ProposalStatus] {
        match self {
            Self::Draft => &[Self::Active, Self::Expired],
            Self::Active => &[Self::Passed, Self::Rejected, Self::Expired],
            Self::Passed | Self::Rejected | Self::Expired => &[],
        }
    }

    /// Whether the lifecycle graph permits `self -> next`
    #[inline]
    #[must_use]
    pub fn can_transition_to(self, next: ProposalStatus) -> bool {
        self.successors().contains(&next)
    }

    /// Whether no further transitions exist
    #[inline]
    #[must_use]
    pub fn is_terminal(self) -> bool {
        self.successors().is_empty()
    }
}

impl std::fmt::Display for ProposalStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Draft => "DRAFT",
            Self::Active => "ACTIVE",
            Self::Passed => "PASSED",
            Self::Rejected => "REJECTED",
            Self::Expired => "EXPIRED",
        };
        f.write_str(s)
    }
}

/// A decision item attached to a notebook
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Proposal {
    /// Identifier
    pub id: ProposalId,
    /// Title (3–200 chars)
    pub title: String,
    /// Owning notebook
    pub notebook_id: NotebookId,
    /// Author; immutable after creation
    pub author_id: UserId,
    /// Pass/fail cutoff percentage (0–100); tallying is out of scope
    pub threshold_pct: f64,
    /// Minimum participation count; tallying is out of scope
    pub quorum: u32,
    /// Lifecycle status
    pub status: ProposalStatus,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
    /// Optimistic concurrency counter, bumped on every write
    pub version: u64,
}

/// Input for proposal creation; new proposals always start in DRAFT
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewProposal {
    /// Title (3–200 chars)
    pub title: String,
    /// Owning notebook
    pub notebook_id: NotebookId,
    /// Author
    pub author_id: UserId,
    /// Pass/fail cutoff percentage (0–100)
    pub threshold_pct: f64,
    /// Minimum participation count (≥ 1)
    pub quorum: u32,
}

/// Partial proposal update; each field independently present-or-absent
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProposalPatch {
    /// New title
    pub title: Option<String>,
    /// New threshold percentage
    pub threshold_pct: Option<f64>,
    /// New quorum
    pub quorum: Option<u32>,
    /// Requested status; only EXPIRED is accepted as a target
    pub status: Option<ProposalStatus>,
}

impl ProposalPatch {
    /// Create an empty patch
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// With title
    #[inline]
    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// With threshold percentage
    #[inline]
    #[must_use]
    pub fn with_threshold_pct(mut self, pct: f64) -> Self {
        self.threshold_pct = Some(pct);
        self
    }

    /// With quorum
    #[inline]
    #[must_use]
    pub fn with_quorum(mut self, quorum: u32) -> Self {
        self.quorum = Some(quorum);
        self
    }

    /// With requested status
    #[inline]
    #[must_use]
    pub fn with_status(mut self, status: ProposalStatus) -> Self {
        self.status = Some(status);
        self
    }

    /// True when no field is supplied
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.threshold_pct.is_none()
            && self.quorum.is_none()
            && self.status.is_none()
    }

    /// True when the patch touches anything besides `status`
    #[inline]
    #[must_use]
    pub fn edits_fields(&self) -> bool {
        self.title.is_some() || self.threshold_pct.is_some() || self.quorum.is_some()
    }
}
