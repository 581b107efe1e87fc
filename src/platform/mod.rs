//! Hosting platform access
//!
//! Provides the capability interface the merge inference code fetches
//! repositories and commits through.

mod factory;
mod github;

pub use factory::create_platform_service;
pub use github::GitHubService;

use crate::error::Result;
use crate::types::{Commit, Repository};
use async_trait::async_trait;

/// Platform service trait for commit and repository lookups
///
/// This trait abstracts the hosting API so merge inference can run against
/// GitHub or against fixtures in tests.
#[async_trait]
pub trait PlatformService: Send + Sync {
    /// Get a repository by owner and name
    async fn get_repository(&self, owner: &str, name: &str) -> Result<Repository>;

    /// Get a single commit, including its parents and tree SHA
    ///
    /// Returns [`Error::EmptyCommit`] when the platform answers successfully
    /// without a usable commit.
    ///
    /// [`Error::EmptyCommit`]: crate::error::Error::EmptyCommit
    async fn get_commit(&self, owner: &str, name: &str, sha: &str) -> Result<Commit>;

    /// List every commit of a PR, oldest first
    ///
    /// Implementations must concatenate all pages; the "last commit" of a PR
    /// is only meaningful on a complete list.
    async fn list_pr_commits(&self, owner: &str, name: &str, number: u64) -> Result<Vec<Commit>>;
}
