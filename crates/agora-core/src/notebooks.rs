//! Notebook operations
//!
//! Notebooks have no owner, so mutations only require authentication.
//! A notebook can be deleted only while no proposal references it.

use crate::enrich::author_ref;
use crate::error::CoreError;
use crate::principal::AuthContext;
use crate::views::{NotebookDetail, ProposalOverview};
use agora_domain::{validate, NewNotebook, Notebook, NotebookId};
use agora_store::EntityStore;
use std::sync::Arc;

/// Notebook CRUD
#[derive(Debug)]
pub struct NotebookService<S> {
    store: Arc<S>,
}

impl<S: EntityStore> NotebookService<S> {
    /// Create the service
    #[inline]
    #[must_use]
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    /// All notebooks, ascending by file path. Public.
    pub async fn list(&self) -> Result<Vec<Notebook>, CoreError> {
        Ok(self.store.list_notebooks().await?)
    }

    /// One notebook with its proposals, newest first. Public.
    ///
    /// # Errors
    /// `NotFound` when the notebook does not exist.
    pub async fn get(&self, id: NotebookId) -> Result<NotebookDetail, CoreError> {
        let notebook = self
            .store
            .find_notebook(id)
            .await?
            .ok_or(CoreError::NotFound("notebook"))?;

        let mut proposals = Vec::new();
        for proposal in self.store.proposals_in_notebook(id).await? {
            let author = author_ref(self.store.as_ref(), proposal.author_id).await?;
            proposals.push(ProposalOverview::new(&proposal, author));
        }

        Ok(NotebookDetail {
            notebook,
            proposals,
        })
    }

    /// Create a notebook
    ///
    /// # Errors
    /// `Unauthorized` without a principal; `Conflict` when the file path
    /// is already taken; `BadRequest` on an empty path.
    pub async fn create(&self, ctx: &AuthContext, file_path: String) -> Result<Notebook, CoreError> {
        let principal = ctx.require()?;
        validate::file_path(&file_path)?;

        let notebook = self.store.insert_notebook(NewNotebook::new(file_path)).await?;
        tracing::info!(
            "notebook {} created at {:?} by {}",
            notebook.id,
            notebook.file_path,
            principal.user_id
        );
        Ok(notebook)
    }

    /// Move a notebook to a new file path
    ///
    /// # Errors
    /// `Unauthorized` without a principal; `NotFound` when absent;
    /// `Conflict` when another notebook holds the path or a concurrent
    /// write got there first; `BadRequest` on an empty path.
    pub async fn update(
        &self,
        ctx: &AuthContext,
        id: NotebookId,
        file_path: String,
    ) -> Result<Notebook, CoreError> {
        let principal = ctx.require()?;
        validate::file_path(&file_path)?;

        let notebook = self
            .store
            .find_notebook(id)
            .await?
            .ok_or(CoreError::NotFound("notebook"))?;

        let renamed = self
            .store
            .rename_notebook(id, file_path, notebook.version)
            .await?;
        tracing::info!(
            "notebook {} moved to {:?} by {}",
            id,
            renamed.file_path,
            principal.user_id
        );
        Ok(renamed)
    }

    /// Delete a notebook that owns no proposals
    ///
    /// Returns the deleted notebook.
    ///
    /// # Errors
    /// `Unauthorized` without a principal; `NotFound` when absent;
    /// `PreconditionFailed` while proposals still reference it;
    /// `Conflict` when a concurrent write got there first.
    pub async fn delete(&self, ctx: &AuthContext, id: NotebookId) -> Result<Notebook, CoreError> {
        let principal = ctx.require()?;
        let notebook = self
            .store
            .find_notebook(id)
            .await?
            .ok_or(CoreError::NotFound("notebook"))?;

        let deleted = self.store.delete_notebook(id, notebook.version).await?;
        tracing::info!("notebook {} deleted by {}", id, principal.user_id);
        Ok(deleted)
    }
}
