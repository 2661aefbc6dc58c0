//! Proposal Lifecycle Engine
//!
//! Enforces the state machine and the field-mutability rules tied to it:
//! - new proposals start in DRAFT
//! - fields are editable only in DRAFT
//! - DRAFT → ACTIVE goes through `activate`, author-only
//! - the only status a patch may carry is EXPIRED, and only where the
//!   lifecycle graph permits it
//! - only DRAFT proposals can be deleted, cascading to their comments
//!
//! Every mutation re-reads the row, checks ownership and status, and
//! commits with the observed version; a concurrent transition turns into
//! `Conflict` instead of a silent double-write.

use crate::config::CoreConfig;
use crate::enrich::{author_ref, comment_view, require_notebook, require_user};
use crate::error::CoreError;
use crate::principal::{ensure_author, AuthContext};
use crate::views::{NotebookRef, ProposalDetail, ProposalSummary};
use agora_domain::{
    validate, NewProposal, NotebookId, Proposal, ProposalId, ProposalPatch, ProposalStatus,
};
use agora_store::{EntityStore, Page, PageRequest, ProposalFilter};
use std::sync::Arc;

/// Proposal lifecycle operations
#[derive(Debug)]
pub struct ProposalService<S> {
    store: Arc<S>,
    config: CoreConfig,
}

impl<S: EntityStore> ProposalService<S> {
    /// Create the service
    #[inline]
    #[must_use]
    pub fn new(store: Arc<S>, config: CoreConfig) -> Self {
        Self { store, config }
    }

    /// One page of proposals matching the filter, newest first
    ///
    /// Each row is joined with its author, notebook, and comment count.
    /// Public - no authentication.
    pub async fn list(
        &self,
        filter: ProposalFilter,
        limit: Option<u32>,
        cursor: Option<ProposalId>,
    ) -> Result<Page<ProposalSummary, ProposalId>, CoreError> {
        let request = PageRequest {
            limit: self.config.effective_limit(limit),
            cursor,
        };

        let page = self.store.page_proposals(&filter, request).await?;
        let mut items = Vec::with_capacity(page.items.len());
        for proposal in page.items {
            items.push(self.summary(proposal).await?);
        }
        Ok(Page {
            items,
            next_cursor: page.next_cursor,
        })
    }

    /// Full proposal read: author and notebook rows plus top-level
    /// comments, newest first. Public.
    ///
    /// # Errors
    /// `NotFound` when the proposal does not exist.
    pub async fn get(&self, id: ProposalId) -> Result<ProposalDetail, CoreError> {
        let proposal = self
            .store
            .find_proposal(id)
            .await?
            .ok_or(CoreError::NotFound("proposal"))?;
        let author = require_user(self.store.as_ref(), proposal.author_id).await?;
        let notebook = require_notebook(self.store.as_ref(), proposal.notebook_id).await?;

        let mut comments = Vec::new();
        for comment in self.store.top_level_comments(id).await? {
            comments.push(comment_view(self.store.as_ref(), comment).await?);
        }

        Ok(ProposalDetail {
            proposal,
            author,
            notebook,
            comments,
        })
    }

    /// Author a proposal; it starts in DRAFT
    ///
    /// # Errors
    /// `Unauthorized` without a principal; `NotFound` when the notebook is
    /// absent; `BadRequest` on out-of-bounds fields.
    pub async fn create(
        &self,
        ctx: &AuthContext,
        title: String,
        notebook_id: NotebookId,
        threshold_pct: f64,
        quorum: u32,
    ) -> Result<Proposal, CoreError> {
        let principal = ctx.require()?;
        validate::title(&title)?;
        validate::threshold_pct(threshold_pct)?;
        validate::quorum(quorum)?;

        let proposal = self
            .store
            .insert_proposal(NewProposal {
                title,
                notebook_id,
                author_id: principal.user_id,
                threshold_pct,
                quorum,
            })
            .await?;
        tracing::info!(
            "proposal {} created in notebook {} by {}",
            proposal.id,
            notebook_id,
            principal.user_id
        );
        Ok(proposal)
    }

    /// Apply a partial update
    ///
    /// Fields are editable only while the proposal is in DRAFT. The one
    /// exception is the explicit escape: a patch carrying *only*
    /// `status: Expired` is accepted from any state the lifecycle graph
    /// lets expire.
    ///
    /// # Errors
    /// `Unauthorized` without a principal; `NotFound` when absent;
    /// `Forbidden` unless the caller is the author; `BadRequest` on an
    /// empty patch, an illegal status target, or field edits outside
    /// DRAFT; `Conflict` when a concurrent write got there first.
    pub async fn update(
        &self,
        ctx: &AuthContext,
        id: ProposalId,
        patch: ProposalPatch,
    ) -> Result<Proposal, CoreError> {
        let principal = ctx.require()?;
        let proposal = self
            .store
            .find_proposal(id)
            .await?
            .ok_or(CoreError::NotFound("proposal"))?;
        ensure_author(principal, proposal.author_id, "proposal")?;

        if patch.is_empty() {
            return Err(CoreError::bad_request("no fields to update"));
        }

        if let Some(target) = patch.status {
            if target != ProposalStatus::Expired {
                tracing::warn!(
                    "rejected status change {} -> {} on proposal {}",
                    proposal.status,
                    target,
                    id
                );
                return Err(CoreError::bad_request(
                    "status may only be set to EXPIRED; activation has its own operation",
                ));
            }
            if !proposal.status.can_transition_to(ProposalStatus::Expired) {
                return Err(CoreError::bad_request(format!(
                    "cannot expire a {} proposal",
                    proposal.status
                )));
            }
        }

        if proposal.status != ProposalStatus::Draft {
            if patch.status.is_none() {
                return Err(CoreError::bad_request(
                    "only draft proposals can be edited",
                ));
            }
            if patch.edits_fields() {
                return Err(CoreError::bad_request(
                    "a non-draft proposal may only be moved to EXPIRED, not edited",
                ));
            }
        }

        if let Some(title) = &patch.title {
            validate::title(title)?;
        }
        if let Some(pct) = patch.threshold_pct {
            validate::threshold_pct(pct)?;
        }
        if let Some(quorum) = patch.quorum {
            validate::quorum(quorum)?;
        }

        let updated = self
            .store
            .apply_proposal_patch(id, &patch, proposal.version)
            .await?;
        tracing::info!("proposal {} updated by {}", id, principal.user_id);
        Ok(updated)
    }

    /// Open a DRAFT proposal for participation (DRAFT → ACTIVE)
    ///
    /// # Errors
    /// `Unauthorized` without a principal; `NotFound` when absent;
    /// `Forbidden` unless the caller is the author; `BadRequest` unless
    /// the proposal is in DRAFT; `Conflict` when a concurrent transition
    /// won the race.
    pub async fn activate(&self, ctx: &AuthContext, id: ProposalId) -> Result<Proposal, CoreError> {
        let principal = ctx.require()?;
        let proposal = self
            .store
            .find_proposal(id)
            .await?
            .ok_or(CoreError::NotFound("proposal"))?;
        ensure_author(principal, proposal.author_id, "proposal")?;

        if proposal.status != ProposalStatus::Draft {
            tracing::warn!(
                "rejected activation of proposal {} in status {}",
                id,
                proposal.status
            );
            return Err(CoreError::bad_request(
                "only draft proposals can be activated",
            ));
        }

        let patch = ProposalPatch::new().with_status(ProposalStatus::Active);
        let activated = self
            .store
            .apply_proposal_patch(id, &patch, proposal.version)
            .await?;
        tracing::info!("proposal {} activated by {}", id, principal.user_id);
        Ok(activated)
    }

    /// Delete a DRAFT proposal and every comment it owns
    ///
    /// Returns the deleted proposal. The comment cascade and the delete
    /// are one transaction.
    ///
    /// # Errors
    /// `Unauthorized` without a principal; `NotFound` when absent;
    /// `Forbidden` unless the caller is the author; `BadRequest` unless
    /// the proposal is in DRAFT; `Conflict` when a concurrent write got
    /// there first.
    pub async fn delete(&self, ctx: &AuthContext, id: ProposalId) -> Result<Proposal, CoreError> {
        let principal = ctx.require()?;
        let proposal = self
            .store
            .find_proposal(id)
            .await?
            .ok_or(CoreError::NotFound("proposal"))?;
        ensure_author(principal, proposal.author_id, "proposal")?;

        if proposal.status != ProposalStatus::Draft {
            return Err(CoreError::bad_request(
                "only draft proposals can be deleted",
            ));
        }

        let deleted = self
            .store
            .delete_proposal_cascading(id, proposal.version)
            .await?;
        tracing::info!(
            "proposal {} and its comments deleted by {}",
            id,
            principal.user_id
        );
        Ok(deleted)
    }

    /// Join a proposal row with its author, notebook, and comment count
    async fn summary(&self, proposal: Proposal) -> Result<ProposalSummary, CoreError> {
        let author = author_ref(self.store.as_ref(), proposal.author_id).await?;
        let notebook = require_notebook(self.store.as_ref(), proposal.notebook_id).await?;
        let comment_count = self.store.count_comments_in_proposal(proposal.id).await?;
        Ok(ProposalSummary {
            proposal,
            author,
            notebook: NotebookRef::from(&notebook),
            comment_count,
        })
    }
}
