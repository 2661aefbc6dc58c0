//! Core configuration

use serde::{Deserialize, Serialize};

/// Configuration shared by all services
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CoreConfig {
    /// Page size used when a listing gets no explicit limit
    pub default_page_size: u32,
    /// Upper bound applied to caller-supplied limits
    pub max_page_size: u32,
}

impl CoreConfig {
    /// Create default configuration
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// With default page size
    #[inline]
    #[must_use]
    pub fn with_default_page_size(mut self, size: u32) -> Self {
        self.default_page_size = size;
        self
    }

    /// With max page size
    #[inline]
    #[must_use]
    pub fn with_max_page_size(mut self, size: u32) -> Self {
        self.max_page_size = size;
        self
    }

    /// Effective limit for a listing: the caller's choice, defaulted and
    /// capped
    #[inline]
    #[must_use]
    pub fn effective_limit(&self, requested: Option<u32>) -> u32 {
        requested
            .unwrap_or(self.default_page_size)
            .min(self.max_page_size)
            .max(1)
    }
}

impl Default for CoreConfig {
    fn default() -> Self {
        Self {
            default_page_size: agora_store::DEFAULT_PAGE_SIZE,
            max_page_size: agora_store::MAX_PAGE_SIZE,
        }
    }
}
