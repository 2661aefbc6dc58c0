//! Shared enrichment helpers
//!
//! Authors and notebooks referenced by stored rows are guaranteed present
//! (authors are never hard-deleted, notebooks refuse deletion while they
//! own proposals), so a dangling reference is a store-integrity failure,
//! not a caller error.

use crate::error::CoreError;
use crate::views::{AuthorRef, CommentView};
use agora_domain::{Comment, Notebook, NotebookId, User, UserId};
use agora_store::EntityStore;

/// Full user row behind a foreign key
pub(crate) async fn require_user<S: EntityStore>(
    store: &S,
    id: UserId,
) -> Result<User, CoreError> {
    store
        .find_user(id)
        .await?
        .ok_or_else(|| CoreError::Internal(anyhow::anyhow!("dangling author reference: {id}")))
}

/// Public author fields behind a foreign key
pub(crate) async fn author_ref<S: EntityStore>(
    store: &S,
    id: UserId,
) -> Result<AuthorRef, CoreError> {
    Ok(AuthorRef::from(&require_user(store, id).await?))
}

/// Full notebook row behind a foreign key
pub(crate) async fn require_notebook<S: EntityStore>(
    store: &S,
    id: NotebookId,
) -> Result<Notebook, CoreError> {
    store
        .find_notebook(id)
        .await?
        .ok_or_else(|| CoreError::Internal(anyhow::anyhow!("dangling notebook reference: {id}")))
}

/// A comment joined with its author and direct-reply count
pub(crate) async fn comment_view<S: EntityStore>(
    store: &S,
    comment: Comment,
) -> Result<CommentView, CoreError> {
    let author = author_ref(store, comment.author_id).await?;
    let reply_count = store.count_replies(comment.id).await?;
    Ok(CommentView {
        comment,
        author,
        reply_count,
    })
}
