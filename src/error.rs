//! Error types for merge-sleuth

use std::time::Duration;
use thiserror::Error;

/// Result alias used throughout the crate
pub type Result<T> = std::result::Result<T, Error>;

/// Errors produced while fetching commit data or inferring merge details
#[derive(Debug, Error)]
pub enum Error {
    /// Caller passed data that cannot be classified (missing merge commit, no commits)
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// The repository owning a pull request could not be resolved
    #[error("pull request has no repository: unable to load {owner}/{repo}")]
    MissingRepository {
        /// Repository owner
        owner: String,
        /// Repository name
        repo: String,
        /// Why the lookup failed
        #[source]
        source: Box<Error>,
    },

    /// A hosting platform call failed
    #[error("{context}: {source}")]
    FetchFailed {
        /// What was being fetched (includes the PR number or SHA)
        context: String,
        /// Underlying failure
        #[source]
        source: Box<Error>,
    },

    /// The platform answered successfully but without a usable commit
    #[error("commit returned empty when querying sha {0}")]
    EmptyCommit(String),

    /// The platform listed fewer PR commits than the pull request reports
    ///
    /// GitHub stops listing PR commits at 250, so the last listed commit is
    /// not the PR's final commit.
    #[error("listed {fetched} of {expected} commits in PR #{number}")]
    IncompleteCommitList {
        /// Pull request number
        number: u64,
        /// Commit count reported on the pull request
        expected: usize,
        /// Commits actually listed
        fetched: usize,
    },

    /// None of the merge commit's parents carries the PR's final tree
    #[error("unable to find patch tree of merge commit {sha} among {parents} parents")]
    PatchTreeNotFound {
        /// Merge commit SHA
        sha: String,
        /// Number of parents examined
        parents: usize,
    },

    /// The operation was cancelled through its cancellation token
    #[error("operation cancelled")]
    Cancelled,

    /// A single platform request exceeded the configured timeout
    #[error("request timed out after {0:?}")]
    Timeout(Duration),

    /// GitHub API error
    #[error("GitHub API error: {0}")]
    GitHubApi(String),

    /// Octocrab error
    #[error(transparent)]
    Octocrab(#[from] octocrab::Error),

    /// Configuration error
    #[error("config error: {0}")]
    Config(String),

    /// Failure raised by a custom [`PlatformService`](crate::platform::PlatformService)
    /// implementation that has no more specific variant
    #[error("platform error: {0}")]
    Platform(String),
}

impl Error {
    /// Wrap an underlying error as [`Error::FetchFailed`] with context.
    ///
    /// Cancellation passes through untouched so callers can tell an abort
    /// apart from an outage.
    pub fn fetch_failed(context: impl Into<String>, source: Self) -> Self {
        match source {
            Self::Cancelled => Self::Cancelled,
            source => Self::FetchFailed {
                context: context.into(),
                source: Box::new(source),
            },
        }
    }

    /// Whether this error, or any error it wraps, is [`Error::Cancelled`]
    pub fn is_cancelled(&self) -> bool {
        match self {
            Self::Cancelled => true,
            Self::FetchFailed { source, .. } | Self::MissingRepository { source, .. } => {
                source.is_cancelled()
            }
            _ => false,
        }
    }
}
