//! Field-level validation
//!
//! Enforces the bounds declared on each entity. The API facade is expected
//! to validate inputs before they reach the core, but the core re-checks so
//! the invariants hold regardless of the caller.

/// Bounds on proposal titles
pub const TITLE_LEN: std::ops::RangeInclusive<usize> = 3..=200;
/// Bounds on comment bodies
pub const CONTENT_LEN: std::ops::RangeInclusive<usize> = 1..=10_000;
/// Bounds on user display names
pub const NAME_LEN: std::ops::RangeInclusive<usize> = 1..=100;

/// Validation failure for a single field
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum DomainError {
    /// Proposal title outside 3–200 chars
    #[error("title must be {min}-{max} characters, got {0}", min = TITLE_LEN.start(), max = TITLE_LEN.end())]
    InvalidTitle(usize),

    /// Threshold percentage outside 0–100
    #[error("threshold percentage must be within 0-100, got {0}")]
    InvalidThreshold(f64),

    /// Quorum below 1
    #[error("quorum must be a positive integer")]
    InvalidQuorum,

    /// Comment content outside 1–10000 chars
    #[error("content must be {min}-{max} characters, got {0}", min = CONTENT_LEN.start(), max = CONTENT_LEN.end())]
    InvalidContent(usize),

    /// Display name outside 1–100 chars
    #[error("name must be {min}-{max} characters, got {0}", min = NAME_LEN.start(), max = NAME_LEN.end())]
    InvalidName(usize),

    /// Empty notebook file path
    #[error("file path must not be empty")]
    EmptyFilePath,

    /// Avatar URL without an http(s) scheme
    #[error("avatar URL must be http(s), got {0:?}")]
    InvalidAvatarUrl(String),
}

/// Check a proposal title
pub fn title(title: &str) -> Result<(), DomainError> {
    let len = title.chars().count();
    if TITLE_LEN.contains(&len) {
        Ok(())
    } else {
        Err(DomainError::InvalidTitle(len))
    }
}

/// Check a threshold percentage
pub fn threshold_pct(pct: f64) -> Result<(), DomainError> {
    if (0.0..=100.0).contains(&pct) {
        Ok(())
    } else {
        Err(DomainError::InvalidThreshold(pct))
    }
}

/// Check a quorum
pub fn quorum(quorum: u32) -> Result<(), DomainError> {
    if quorum >= 1 {
        Ok(())
    } else {
        Err(DomainError::InvalidQuorum)
    }
}

/// Check a comment body
pub fn content(content: &str) -> Result<(), DomainError> {
    let len = content.chars().count();
    if CONTENT_LEN.contains(&len) {
        Ok(())
    } else {
        Err(DomainError::InvalidContent(len))
    }
}

/// Check a user display name
pub fn name(name: &str) -> Result<(), DomainError> {
    let len = name.chars().count();
    if NAME_LEN.contains(&len) {
        Ok(())
    } else {
        Err(DomainError::InvalidName(len))
    }
}

/// Check an avatar URL
pub fn avatar_url(url: &str) -> Result<(), DomainError> {
    if url.starts_with("http://") || url.starts_with("https://") {
        Ok(())
    } else {
        Err(DomainError::InvalidAvatarUrl(url.to_string()))
    }
}

/// Check a notebook file path
pub fn file_path(path: &str) -> Result<(), DomainError> {
    if path.is_empty() {
        Err(DomainError::EmptyFilePath)
    } else {
        Ok(())
    }
}
