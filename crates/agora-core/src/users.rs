//! User profile operations
//!
//! Public profile reads with authored-content counts, paginated per-user
//! listings, and the self-service profile update.

use crate::config::CoreConfig;
use crate::error::CoreError;
use crate::principal::AuthContext;
use crate::views::{NotebookRef, ProposalRef, UserComment, UserProfile, UserProposal};
use agora_domain::{validate, CommentId, ProfilePatch, ProposalId, User, UserId};
use agora_store::{CommentFilter, EntityStore, Page, PageRequest, ProposalFilter};
use std::sync::Arc;

/// User-facing profile operations
#[derive(Debug)]
pub struct UserService<S> {
    store: Arc<S>,
    config: CoreConfig,
}

impl<S: EntityStore> UserService<S> {
    /// Create the service
    #[inline]
    #[must_use]
    pub fn new(store: Arc<S>, config: CoreConfig) -> Self {
        Self { store, config }
    }

    /// Public profile with proposal/comment counts
    ///
    /// # Errors
    /// `NotFound` when the user does not exist.
    pub async fn profile(&self, id: UserId) -> Result<UserProfile, CoreError> {
        let user = self
            .store
            .find_user(id)
            .await?
            .ok_or(CoreError::NotFound("user"))?;
        let proposal_count = self.store.count_proposals_by_author(id).await?;
        let comment_count = self.store.count_comments_by_author(id).await?;

        Ok(UserProfile {
            id: user.id,
            name: user.name,
            avatar_url: user.avatar_url,
            proposal_count,
            comment_count,
        })
    }

    /// One page of a user's proposals, newest first. Public.
    pub async fn proposals_by(
        &self,
        user_id: UserId,
        limit: Option<u32>,
        cursor: Option<ProposalId>,
    ) -> Result<Page<UserProposal, ProposalId>, CoreError> {
        let filter = ProposalFilter::any().by_author(user_id);
        let request = PageRequest {
            limit: self.config.effective_limit(limit),
            cursor,
        };

        let page = self.store.page_proposals(&filter, request).await?;
        let mut items = Vec::with_capacity(page.items.len());
        for proposal in page.items {
            let notebook =
                crate::enrich::require_notebook(self.store.as_ref(), proposal.notebook_id).await?;
            let comment_count = self.store.count_comments_in_proposal(proposal.id).await?;
            items.push(UserProposal {
                proposal,
                notebook: NotebookRef::from(&notebook),
                comment_count,
            });
        }
        Ok(Page {
            items,
            next_cursor: page.next_cursor,
        })
    }

    /// One page of a user's comments across all proposals, newest first.
    /// Public.
    pub async fn comments_by(
        &self,
        user_id: UserId,
        limit: Option<u32>,
        cursor: Option<CommentId>,
    ) -> Result<Page<UserComment, CommentId>, CoreError> {
        let filter = CommentFilter::any().by_author(user_id);
        let request = PageRequest {
            limit: self.config.effective_limit(limit),
            cursor,
        };

        let page = self.store.page_comments(&filter, request).await?;
        let mut items = Vec::with_capacity(page.items.len());
        for comment in page.items {
            let proposal = self
                .store
                .find_proposal(comment.proposal_id)
                .await?
                .ok_or_else(|| {
                    CoreError::Internal(anyhow::anyhow!(
                        "dangling proposal reference: {}",
                        comment.proposal_id
                    ))
                })?;
            let reply_count = self.store.count_replies(comment.id).await?;
            items.push(UserComment {
                comment,
                proposal: ProposalRef::from(&proposal),
                reply_count,
            });
        }
        Ok(Page {
            items,
            next_cursor: page.next_cursor,
        })
    }

    /// Update the caller's own profile
    ///
    /// # Errors
    /// `Unauthorized` without a principal; `BadRequest` when the patch is
    /// empty or a field is out of bounds; `NotFound` when the principal's
    /// user row is gone.
    pub async fn update_profile(
        &self,
        ctx: &AuthContext,
        patch: ProfilePatch,
    ) -> Result<User, CoreError> {
        let principal = ctx.require()?;
        if patch.is_empty() {
            return Err(CoreError::bad_request(
                "at least one field to update must be provided",
            ));
        }
        if let Some(name) = &patch.name {
            validate::name(name)?;
        }
        if let Some(url) = &patch.avatar_url {
            validate::avatar_url(url)?;
        }

        let user = self
            .store
            .update_user_profile(principal.user_id, patch)
            .await?;
        tracing::info!("profile updated for {}", principal.user_id);
        Ok(user)
    }
}
