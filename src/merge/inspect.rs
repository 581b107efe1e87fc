//! Merge inspection - effectful gathering around the pure decisions
//!
//! `MergeInspector` fetches what the classifier and the patch resolver need
//! for one pull request and hands it to them.

use crate::error::{Error, Result};
use crate::merge::{cancellable, classify_merge_mode, resolve_patch_parent};
use crate::platform::PlatformService;
use crate::types::{Commit, MergeAnalysis, MergeMode, PullRequest, Repository};
use tokio::sync::OnceCell;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info};

/// Inspects how a single merged pull request landed
///
/// The owning repository is resolved on first use and reused afterwards.
/// Commits are fetched on every call; hold on to the returned list when the
/// same data is needed twice.
pub struct MergeInspector<'a> {
    platform: &'a dyn PlatformService,
    pr: PullRequest,
    cancel: CancellationToken,
    repository: OnceCell<Repository>,
}

impl<'a> MergeInspector<'a> {
    /// Create an inspector for `pr`
    pub fn new(platform: &'a dyn PlatformService, pr: PullRequest) -> Self {
        Self {
            platform,
            pr,
            cancel: CancellationToken::new(),
            repository: OnceCell::new(),
        }
    }

    /// Abort platform calls when `cancel` fires
    #[must_use]
    pub fn with_cancellation(mut self, cancel: CancellationToken) -> Self {
        self.cancel = cancel;
        self
    }

    /// The pull request being inspected
    pub const fn pull_request(&self) -> &PullRequest {
        &self.pr
    }

    /// Repository the pull request lives in
    ///
    /// A failed lookup is reported as [`Error::MissingRepository`]; the
    /// inspector never continues without a repository.
    pub async fn repository(&self) -> Result<&Repository> {
        self.repository
            .get_or_try_init(|| async {
                cancellable(
                    &self.cancel,
                    self.platform.get_repository(&self.pr.owner, &self.pr.repo),
                )
                .await
                .map_err(|e| {
                    if e.is_cancelled() {
                        return Error::Cancelled;
                    }
                    error!(owner = %self.pr.owner, repo = %self.pr.repo, error = %e, "failed to load repository");
                    Error::MissingRepository {
                        owner: self.pr.owner.clone(),
                        repo: self.pr.repo.clone(),
                        source: Box::new(e),
                    }
                })
            })
            .await
    }

    /// All commits of the pull request, oldest first
    pub async fn commits(&self) -> Result<Vec<Commit>> {
        let commits = cancellable(
            &self.cancel,
            self.platform
                .list_pr_commits(&self.pr.owner, &self.pr.repo, self.pr.number),
        )
        .await
        .map_err(|e| {
            Error::fetch_failed(format!("querying GitHub for commits in PR {}", self.pr.number), e)
        })?;

        info!(pr_number = self.pr.number, count = commits.len(), "read commits from PR");
        Ok(commits)
    }

    /// The commit recorded as the pull request's merge commit
    pub async fn merge_commit(&self) -> Result<Commit> {
        let sha = self.pr.merge_commit_sha.as_deref().ok_or_else(|| {
            Error::InvalidInput(format!("PR #{} has no merge commit sha", self.pr.number))
        })?;
        let repo = self.repository().await?;

        debug!(pr_number = self.pr.number, sha, "fetching merge commit");
        match cancellable(
            &self.cancel,
            self.platform.get_commit(&repo.owner, &repo.name, sha),
        )
        .await
        {
            Ok(commit) => Ok(commit),
            Err(e @ Error::EmptyCommit(_)) => Err(e),
            Err(e) => Err(Error::fetch_failed(
                format!("querying GitHub for merge commit {sha}"),
                e,
            )),
        }
    }

    /// Determine how the pull request was merged
    ///
    /// `commits` must be the PR's full commit list (see [`Self::commits`]);
    /// taking it as an argument lets callers supply fixtures.
    pub async fn merge_mode(&self, commits: &[Commit]) -> Result<MergeMode> {
        let merge_commit = self.merge_commit().await?;
        classify_merge_mode(self.pr.number, Some(&merge_commit), commits)
    }

    /// Parent index of the merge commit to diff against for a cherry pick
    pub async fn patch_parent(&self) -> Result<usize> {
        let commits = self.commits().await?;
        if commits.is_empty() {
            return Err(Error::InvalidInput(
                "unable to find patch tree, commit list is empty".to_string(),
            ));
        }

        let merge_commit = self.merge_commit().await?;
        let repo = self.repository().await?;
        resolve_patch_parent(self.platform, &self.cancel, repo, &merge_commit, &commits).await
    }

    /// Merge mode plus, for merge commits, the patch parent
    pub async fn analyze(&self) -> Result<MergeAnalysis> {
        let commits = self.commits().await?;
        let merge_commit = self.merge_commit().await?;
        let mode = classify_merge_mode(self.pr.number, Some(&merge_commit), &commits)?;

        let patch_parent = if mode == MergeMode::Merge {
            let repo = self.repository().await?;
            Some(
                resolve_patch_parent(self.platform, &self.cancel, repo, &merge_commit, &commits)
                    .await?,
            )
        } else {
            None
        };

        Ok(MergeAnalysis {
            mode,
            merge_commit_sha: merge_commit.sha,
            patch_parent,
        })
    }
}
