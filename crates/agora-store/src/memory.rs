//! In-memory reference store
//!
//! A [`MemoryStore`] keeps all four tables behind a single
//! `parking_lot::RwLock`; taking the write lock is the transaction, so a
//! mutating call's precondition checks and its writes are atomic and
//! conflicting writers are serialized. Version counters on rows turn a
//! lost check-then-act race into a [`StoreError::VersionConflict`] instead
//! of a silent double-commit.
//!
//! Ids are ULIDs drawn from one monotonic generator, so descending id
//! order is newest-first even for rows created in the same millisecond -
//! exactly what the keyset cursor contract assumes.

use crate::error::StoreError;
use crate::filter::{CommentFilter, ProposalFilter};
use crate::page::{keyset, Page, PageRequest};
use crate::repo::{CommentRepo, NotebookRepo, ProposalRepo, UserRepo};
use agora_domain::{
    Comment, CommentId, NewComment, NewNotebook, NewProposal, NewUser, Notebook, NotebookId,
    ProfilePatch, Proposal, ProposalId, ProposalPatch, User, UserId,
};
use chrono::Utc;
use parking_lot::{Mutex, RwLock};
use std::collections::BTreeMap;
use ulid::Ulid;

/// All tables; the `BTreeMap` keys double as the keyset-pagination order
#[derive(Debug, Default)]
struct State {
    users: BTreeMap<UserId, User>,
    notebooks: BTreeMap<NotebookId, Notebook>,
    proposals: BTreeMap<ProposalId, Proposal>,
    comments: BTreeMap<CommentId, Comment>,
}

/// Thread-safe in-memory Entity Store
pub struct MemoryStore {
    state: RwLock<State>,
    ids: Mutex<ulid::Generator>,
}

impl std::fmt::Debug for MemoryStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MemoryStore")
            .field("state", &self.state)
            .finish_non_exhaustive()
    }
}

impl MemoryStore {
    /// Create an empty store
    #[must_use]
    pub fn new() -> Self {
        Self {
            state: RwLock::new(State::default()),
            ids: Mutex::new(ulid::Generator::new()),
        }
    }

    /// Draw the next id; strictly increasing across the store
    fn next_id(&self) -> Result<Ulid, StoreError> {
        self.ids
            .lock()
            .generate()
            .map_err(|e| StoreError::Backend(anyhow::anyhow!("id generation failed: {e}")))
    }

    /// Rows matching `keep`, descending by key, filtered below the cursor,
    /// at most `limit + 1` of them
    fn scan_desc<K: Ord + Copy, V: Clone>(
        map: &BTreeMap<K, V>,
        cursor: Option<K>,
        limit: usize,
        keep: impl Fn(&V) -> bool,
    ) -> Vec<V> {
        let take = limit + 1;
        match cursor {
            Some(c) => map
                .range(..c)
                .rev()
                .map(|(_, v)| v)
                .filter(|v| keep(v))
                .take(take)
                .cloned()
                .collect(),
            None => map
                .values()
                .rev()
                .filter(|v| keep(v))
                .take(take)
                .cloned()
                .collect(),
        }
    }

    fn check_version(
        entity: &'static str,
        expected: u64,
        found: u64,
    ) -> Result<(), StoreError> {
        if expected == found {
            Ok(())
        } else {
            Err(StoreError::VersionConflict {
                entity,
                expected,
                found,
            })
        }
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl UserRepo for MemoryStore {
    async fn upsert_user(&self, new: NewUser) -> Result<User, StoreError> {
        let mut state = self.state.write();

        if let Some(user) = state
            .users
            .values_mut()
            .find(|u| u.oauth_id == new.oauth_id)
        {
            user.name = new.name;
            if let Some(url) = new.avatar_url {
                user.avatar_url = Some(url);
            }
            return Ok(user.clone());
        }

        let id = UserId::from(self.next_id()?);
        let user = User {
            id,
            oauth_id: new.oauth_id,
            name: new.name,
            avatar_url: new.avatar_url,
            created_at: Utc::now(),
        };
        state.users.insert(id, user.clone());
        Ok(user)
    }

    async fn find_user(&self, id: UserId) -> Result<Option<User>, StoreError> {
        Ok(self.state.read().users.get(&id).cloned())
    }

    async fn find_user_by_oauth_id(&self, oauth_id: &str) -> Result<Option<User>, StoreError> {
        Ok(self
            .state
            .read()
            .users
            .values()
            .find(|u| u.oauth_id == oauth_id)
            .cloned())
    }

    async fn update_user_profile(
        &self,
        id: UserId,
        patch: ProfilePatch,
    ) -> Result<User, StoreError> {
        let mut state = self.state.write();
        let user = state
            .users
            .get_mut(&id)
            .ok_or(StoreError::not_found("user"))?;

        if let Some(name) = patch.name {
            user.name = name;
        }
        if let Some(url) = patch.avatar_url {
            user.avatar_url = Some(url);
        }
        Ok(user.clone())
    }
}

#[async_trait::async_trait]
impl NotebookRepo for MemoryStore {
    async fn insert_notebook(&self, new: NewNotebook) -> Result<Notebook, StoreError> {
        let mut state = self.state.write();

        if state
            .notebooks
            .values()
            .any(|n| n.file_path == new.file_path)
        {
            return Err(StoreError::Duplicate {
                field: "file_path",
                value: new.file_path,
            });
        }

        let id = NotebookId::from(self.next_id()?);
        let notebook = Notebook {
            id,
            file_path: new.file_path,
            created_at: Utc::now(),
            version: 1,
        };
        state.notebooks.insert(id, notebook.clone());
        Ok(notebook)
    }

    async fn find_notebook(&self, id: NotebookId) -> Result<Option<Notebook>, StoreError> {
        Ok(self.state.read().notebooks.get(&id).cloned())
    }

    async fn list_notebooks(&self) -> Result<Vec<Notebook>, StoreError> {
        let mut notebooks: Vec<Notebook> = self.state.read().notebooks.values().cloned().collect();
        notebooks.sort_by(|a, b| a.file_path.cmp(&b.file_path));
        Ok(notebooks)
    }

    async fn rename_notebook(
        &self,
        id: NotebookId,
        file_path: String,
        expected_version: u64,
    ) -> Result<Notebook, StoreError> {
        let mut state = self.state.write();

        if state
            .notebooks
            .values()
            .any(|n| n.file_path == file_path && n.id != id)
        {
            return Err(StoreError::Duplicate {
                field: "file_path",
                value: file_path,
            });
        }

        let notebook = state
            .notebooks
            .get_mut(&id)
            .ok_or(StoreError::not_found("notebook"))?;
        Self::check_version("notebook", expected_version, notebook.version)?;

        notebook.file_path = file_path;
        notebook.version += 1;
        Ok(notebook.clone())
    }

    async fn delete_notebook(
        &self,
        id: NotebookId,
        expected_version: u64,
    ) -> Result<Notebook, StoreError> {
        let mut state = self.state.write();

        let notebook = state
            .notebooks
            .get(&id)
            .ok_or(StoreError::not_found("notebook"))?;
        Self::check_version("notebook", expected_version, notebook.version)?;

        if state.proposals.values().any(|p| p.notebook_id == id) {
            return Err(StoreError::HasDependents { entity: "notebook" });
        }

        state
            .notebooks
            .remove(&id)
            .ok_or(StoreError::not_found("notebook"))
    }
}

#[async_trait::async_trait]
impl ProposalRepo for MemoryStore {
    async fn insert_proposal(&self, new: NewProposal) -> Result<Proposal, StoreError> {
        let mut state = self.state.write();

        if !state.notebooks.contains_key(&new.notebook_id) {
            return Err(StoreError::not_found("notebook"));
        }

        let id = ProposalId::from(self.next_id()?);
        let proposal = Proposal {
            id,
            title: new.title,
            notebook_id: new.notebook_id,
            author_id: new.author_id,
            threshold_pct: new.threshold_pct,
            quorum: new.quorum,
            status: agora_domain::ProposalStatus::Draft,
            created_at: Utc::now(),
            version: 1,
        };
        state.proposals.insert(id, proposal.clone());
        Ok(proposal)
    }

    async fn find_proposal(&self, id: ProposalId) -> Result<Option<Proposal>, StoreError> {
        Ok(self.state.read().proposals.get(&id).cloned())
    }

    async fn page_proposals(
        &self,
        filter: &ProposalFilter,
        page: PageRequest<ProposalId>,
    ) -> Result<Page<Proposal, ProposalId>, StoreError> {
        let limit = page.clamped_limit();
        let state = self.state.read();
        let rows = Self::scan_desc(&state.proposals, page.cursor, limit, |p| filter.matches(p));
        Ok(keyset(rows, limit, |p| p.id))
    }

    async fn proposals_in_notebook(
        &self,
        notebook_id: NotebookId,
    ) -> Result<Vec<Proposal>, StoreError> {
        Ok(self
            .state
            .read()
            .proposals
            .values()
            .rev()
            .filter(|p| p.notebook_id == notebook_id)
            .cloned()
            .collect())
    }

    async fn apply_proposal_patch(
        &self,
        id: ProposalId,
        patch: &ProposalPatch,
        expected_version: u64,
    ) -> Result<Proposal, StoreError> {
        let mut state = self.state.write();
        let proposal = state
            .proposals
            .get_mut(&id)
            .ok_or(StoreError::not_found("proposal"))?;
        Self::check_version("proposal", expected_version, proposal.version)?;

        if let Some(title) = &patch.title {
            proposal.title = title.clone();
        }
        if let Some(pct) = patch.threshold_pct {
            proposal.threshold_pct = pct;
        }
        if let Some(quorum) = patch.quorum {
            proposal.quorum = quorum;
        }
        if let Some(status) = patch.status {
            proposal.status = status;
        }
        proposal.version += 1;
        Ok(proposal.clone())
    }

    async fn delete_proposal_cascading(
        &self,
        id: ProposalId,
        expected_version: u64,
    ) -> Result<Proposal, StoreError> {
        let mut state = self.state.write();

        let proposal = state
            .proposals
            .get(&id)
            .ok_or(StoreError::not_found("proposal"))?;
        Self::check_version("proposal", expected_version, proposal.version)?;

        state.comments.retain(|_, c| c.proposal_id != id);
        state
            .proposals
            .remove(&id)
            .ok_or(StoreError::not_found("proposal"))
    }

    async fn count_proposals_by_author(&self, author_id: UserId) -> Result<usize, StoreError> {
        Ok(self
            .state
            .read()
            .proposals
            .values()
            .filter(|p| p.author_id == author_id)
            .count())
    }
}

#[async_trait::async_trait]
impl CommentRepo for MemoryStore {
    async fn insert_comment(&self, new: NewComment) -> Result<Comment, StoreError> {
        let mut state = self.state.write();

        if !state.proposals.contains_key(&new.proposal_id) {
            return Err(StoreError::not_found("proposal"));
        }
        if let Some(parent_id) = new.parent_id {
            let parent = state
                .comments
                .get(&parent_id)
                .ok_or(StoreError::not_found("comment"))?;
            if parent.proposal_id != new.proposal_id {
                return Err(StoreError::ParentOutsideProposal);
            }
        }

        let id = CommentId::from(self.next_id()?);
        let comment = Comment {
            id,
            proposal_id: new.proposal_id,
            author_id: new.author_id,
            parent_id: new.parent_id,
            content: new.content,
            created_at: Utc::now(),
            version: 1,
        };
        state.comments.insert(id, comment.clone());
        Ok(comment)
    }

    async fn find_comment(&self, id: CommentId) -> Result<Option<Comment>, StoreError> {
        Ok(self.state.read().comments.get(&id).cloned())
    }

    async fn page_comments(
        &self,
        filter: &CommentFilter,
        page: PageRequest<CommentId>,
    ) -> Result<Page<Comment, CommentId>, StoreError> {
        let limit = page.clamped_limit();
        let state = self.state.read();
        let rows = Self::scan_desc(&state.comments, page.cursor, limit, |c| filter.matches(c));
        Ok(keyset(rows, limit, |c| c.id))
    }

    async fn replies_of(&self, id: CommentId) -> Result<Vec<Comment>, StoreError> {
        Ok(self
            .state
            .read()
            .comments
            .values()
            .filter(|c| c.parent_id == Some(id))
            .cloned()
            .collect())
    }

    async fn top_level_comments(
        &self,
        proposal_id: ProposalId,
    ) -> Result<Vec<Comment>, StoreError> {
        Ok(self
            .state
            .read()
            .comments
            .values()
            .rev()
            .filter(|c| c.proposal_id == proposal_id && c.parent_id.is_none())
            .cloned()
            .collect())
    }

    async fn count_replies(&self, id: CommentId) -> Result<usize, StoreError> {
        Ok(self
            .state
            .read()
            .comments
            .values()
            .filter(|c| c.parent_id == Some(id))
            .count())
    }

    async fn count_comments_in_proposal(
        &self,
        proposal_id: ProposalId,
    ) -> Result<usize, StoreError> {
        Ok(self
            .state
            .read()
            .comments
            .values()
            .filter(|c| c.proposal_id == proposal_id)
            .count())
    }

    async fn count_comments_by_author(&self, author_id: UserId) -> Result<usize, StoreError> {
        Ok(self
            .state
            .read()
            .comments
            .values()
            .filter(|c| c.author_id == author_id)
            .count())
    }

    async fn set_comment_content(
        &self,
        id: CommentId,
        content: String,
        expected_version: u64,
    ) -> Result<Comment, StoreError> {
        let mut state = self.state.write();
        let comment = state
            .comments
            .get_mut(&id)
            .ok_or(StoreError::not_found("comment"))?;
        Self::check_version("comment", expected_version, comment.version)?;

        comment.content = content;
        comment.version += 1;
        Ok(comment.clone())
    }

    async fn delete_comment_subtree(
        &self,
        id: CommentId,
        expected_version: u64,
    ) -> Result<Comment, StoreError> {
        let mut state = self.state.write();

        let root = state
            .comments
            .get(&id)
            .ok_or(StoreError::not_found("comment"))?;
        Self::check_version("comment", expected_version, root.version)?;

        // Worklist traversal; parents precede children so this terminates.
        let mut doomed = vec![id];
        let mut frontier = vec![id];
        while let Some(current) = frontier.pop() {
            let children: Vec<CommentId> = state
                .comments
                .values()
                .filter(|c| c.parent_id == Some(current))
                .map(|c| c.id)
                .collect();
            frontier.extend(&children);
            doomed.extend(children);
        }

        let root = state
            .comments
            .remove(&id)
            .ok_or(StoreError::not_found("comment"))?;
        for child in &doomed[1..] {
            state.comments.remove(child);
        }
        Ok(root)
    }
}
