//! Comment Tree Manager
//!
//! Creates, edits, and deletes threaded comments. Invariants enforced
//! here and in the store seam:
//! - a reply's parent must live on the same proposal
//! - only the author may edit or delete a comment
//! - deleting a comment removes its entire descendant subtree, so no
//!   orphaned replies remain

use crate::config::CoreConfig;
use crate::enrich::{author_ref, comment_view};
use crate::error::CoreError;
use crate::principal::{ensure_author, AuthContext};
use crate::views::{CommentThread, CommentView};
use agora_domain::{validate, Comment, CommentId, NewComment, ProposalId};
use agora_store::{CommentFilter, EntityStore, Page, PageRequest, ParentScope};
use std::sync::Arc;

/// Threaded-comment operations
#[derive(Debug)]
pub struct CommentService<S> {
    store: Arc<S>,
    config: CoreConfig,
}

impl<S: EntityStore> CommentService<S> {
    /// Create the service
    #[inline]
    #[must_use]
    pub fn new(store: Arc<S>, config: CoreConfig) -> Self {
        Self { store, config }
    }

    /// One page of a proposal's comments, newest first
    ///
    /// Without `parent_id` this lists top-level comments; with it, the
    /// direct replies of that comment. Public - no authentication.
    pub async fn list_by_proposal(
        &self,
        proposal_id: ProposalId,
        parent_id: Option<CommentId>,
        limit: Option<u32>,
        cursor: Option<CommentId>,
    ) -> Result<Page<CommentView, CommentId>, CoreError> {
        let scope = match parent_id {
            Some(parent) => ParentScope::RepliesTo(parent),
            None => ParentScope::TopLevel,
        };
        let filter = CommentFilter::any().in_proposal(proposal_id).in_scope(scope);
        let request = PageRequest {
            limit: self.config.effective_limit(limit),
            cursor,
        };

        let page = self.store.page_comments(&filter, request).await?;
        let mut items = Vec::with_capacity(page.items.len());
        for comment in page.items {
            items.push(comment_view(self.store.as_ref(), comment).await?);
        }
        Ok(Page {
            items,
            next_cursor: page.next_cursor,
        })
    }

    /// One comment plus all of its direct replies, oldest first
    ///
    /// # Errors
    /// `NotFound` when the comment does not exist.
    pub async fn get(&self, id: CommentId) -> Result<CommentThread, CoreError> {
        let comment = self
            .store
            .find_comment(id)
            .await?
            .ok_or(CoreError::NotFound("comment"))?;
        let author = author_ref(self.store.as_ref(), comment.author_id).await?;

        let mut replies = Vec::new();
        for reply in self.store.replies_of(id).await? {
            replies.push(comment_view(self.store.as_ref(), reply).await?);
        }

        Ok(CommentThread {
            comment,
            author,
            replies,
        })
    }

    /// Post a comment, optionally as a reply
    ///
    /// # Errors
    /// `Unauthorized` without a principal; `NotFound` when the proposal or
    /// the parent comment is absent; `BadRequest` when the parent lives on
    /// a different proposal or the content is out of bounds.
    pub async fn create(
        &self,
        ctx: &AuthContext,
        proposal_id: ProposalId,
        parent_id: Option<CommentId>,
        content: String,
    ) -> Result<CommentView, CoreError> {
        let principal = ctx.require()?;
        validate::content(&content)?;

        let mut new = NewComment::new(proposal_id, principal.user_id, content);
        if let Some(parent) = parent_id {
            new = new.in_reply_to(parent);
        }

        let comment = self.store.insert_comment(new).await?;
        tracing::info!(
            "comment {} created on proposal {} by {}",
            comment.id,
            proposal_id,
            principal.user_id
        );
        comment_view(self.store.as_ref(), comment).await
    }

    /// Replace a comment's content
    ///
    /// # Errors
    /// `Unauthorized` without a principal; `NotFound` when absent;
    /// `Forbidden` unless the caller authored the comment; `Conflict` when
    /// a concurrent write got there first.
    pub async fn update(
        &self,
        ctx: &AuthContext,
        id: CommentId,
        content: String,
    ) -> Result<CommentView, CoreError> {
        let principal = ctx.require()?;
        let comment = self
            .store
            .find_comment(id)
            .await?
            .ok_or(CoreError::NotFound("comment"))?;
        ensure_author(principal, comment.author_id, "comment")?;
        validate::content(&content)?;

        let updated = self
            .store
            .set_comment_content(id, content, comment.version)
            .await?;
        tracing::info!("comment {} updated by {}", id, principal.user_id);
        comment_view(self.store.as_ref(), updated).await
    }

    /// Delete a comment and its whole descendant subtree
    ///
    /// Returns the deleted root.
    ///
    /// # Errors
    /// `Unauthorized` without a principal; `NotFound` when absent;
    /// `Forbidden` unless the caller authored the comment; `Conflict` when
    /// a concurrent write got there first.
    pub async fn delete(&self, ctx: &AuthContext, id: CommentId) -> Result<Comment, CoreError> {
        let principal = ctx.require()?;
        let comment = self
            .store
            .find_comment(id)
            .await?
            .ok_or(CoreError::NotFound("comment"))?;
        ensure_author(principal, comment.author_id, "comment")?;

        let deleted = self
            .store
            .delete_comment_subtree(id, comment.version)
            .await?;
        tracing::info!(
            "comment {} and its subtree deleted by {}",
            id,
            principal.user_id
        );
        Ok(deleted)
    }
}
