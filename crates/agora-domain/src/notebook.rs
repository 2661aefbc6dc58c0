//! Notebook entity
//!
//! A notebook is the grouping container proposals belong to, identified by
//! a globally unique path-like string. A notebook can only be deleted while
//! it owns zero proposals.

use crate::id::NotebookId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A proposal container identified by a unique file path
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notebook {
    /// Identifier
    pub id: NotebookId,
    /// Globally unique path-like identifier
    pub file_path: String,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
    /// Optimistic concurrency counter, bumped on every write
    pub version: u64,
}

/// Input for notebook creation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewNotebook {
    /// Globally unique path-like identifier
    pub file_path: String,
}

impl NewNotebook {
    /// Create a new-notebook record
    #[inline]
    #[must_use]
    pub fn new(file_path: impl Into<String>) -> Self {
        Self {
            file_path: file_path.into(),
        }
    }
}
