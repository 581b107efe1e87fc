//! Core types for merge-sleuth

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// A pull request identified by repository and number
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PullRequest {
    /// Repository owner (user or organization)
    pub owner: String,
    /// Repository name
    pub repo: String,
    /// PR number
    pub number: u64,
    /// SHA the platform records as where this PR landed (only set once merged)
    pub merge_commit_sha: Option<String>,
}

impl PullRequest {
    /// Create a PR reference without a merge commit
    pub fn new(owner: impl Into<String>, repo: impl Into<String>, number: u64) -> Self {
        Self {
            owner: owner.into(),
            repo: repo.into(),
            number,
            merge_commit_sha: None,
        }
    }

    /// Set the merge commit SHA
    #[must_use]
    pub fn with_merge_commit(mut self, sha: impl Into<String>) -> Self {
        self.merge_commit_sha = Some(sha.into());
        self
    }
}

impl std::fmt::Display for PullRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}#{}", self.owner, self.repo, self.number)
    }
}

/// Reference to a parent commit
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ParentRef {
    /// Parent commit SHA
    pub sha: String,
}

/// A commit as reported by the hosting platform
///
/// Read-only projection of platform data; never mutated after fetch.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Commit {
    /// Commit SHA
    pub sha: String,
    /// SHA of the file tree snapshot at this commit
    pub tree_sha: String,
    /// Parents in the order recorded by the platform
    pub parents: Vec<ParentRef>,
    /// First line of the commit message
    pub summary: Option<String>,
    /// When the commit was committed
    pub committed_at: Option<DateTime<Utc>>,
}

impl Commit {
    /// Whether this commit joins two or more histories
    pub fn is_merge(&self) -> bool {
        self.parents.len() > 1
    }
}

/// A repository on the hosting platform
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Repository {
    /// Repository owner
    pub owner: String,
    /// Repository name
    pub name: String,
    /// Default branch name (e.g., "main")
    pub default_branch: Option<String>,
}

impl Repository {
    /// `owner/name`
    pub fn full_name(&self) -> String {
        format!("{}/{}", self.owner, self.name)
    }
}

/// How a pull request was integrated into its base branch
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MergeMode {
    /// Landed through a commit with two or more parents
    Merge,
    /// All commits combined into one new commit
    Squash,
    /// Commits replayed on top of the base branch
    Rebase,
}

impl std::fmt::Display for MergeMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Merge => write!(f, "merge"),
            Self::Squash => write!(f, "squash"),
            Self::Rebase => write!(f, "rebase"),
        }
    }
}

impl FromStr for MergeMode {
    type Err = crate::error::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "merge" => Ok(Self::Merge),
            "squash" => Ok(Self::Squash),
            "rebase" => Ok(Self::Rebase),
            other => Err(crate::error::Error::InvalidInput(format!(
                "unknown merge mode '{other}'"
            ))),
        }
    }
}

/// Outcome of inspecting a merged pull request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MergeAnalysis {
    /// Detected merge mode
    pub mode: MergeMode,
    /// Merge commit SHA that was inspected
    pub merge_commit_sha: String,
    /// Parent index to diff against (only for [`MergeMode::Merge`])
    pub patch_parent: Option<usize>,
}
