//! Merge mode classification - pure decision over fetched commits
//!
//! No I/O happens here; the merge commit and PR commits are passed in, which
//! keeps the decision easy to test against fixtures.

use crate::error::{Error, Result};
use crate::types::{Commit, MergeMode};
use tracing::info;

/// Determine how a PR was merged from its merge commit and its commits
///
/// Decision order:
/// 1. A merge commit with more than one parent is a [`MergeMode::Merge`].
/// 2. A single-commit PR is reported as [`MergeMode::Squash`].
/// 3. Otherwise the merge commit's tree is compared with the tree of the last
///    PR commit: equal trees mean [`MergeMode::Rebase`] (the last rebased
///    commit reproduces the PR head exactly), different trees mean
///    [`MergeMode::Squash`] (a new combined tree was written).
///
/// # Known limitation
///
/// A one-commit PR that was squashed and one that was rebased produce
/// identical trees, so they cannot be told apart. Such PRs are always
/// classified as `Squash`.
///
/// # Arguments
/// * `pr_number` - PR number, used for log output only
/// * `merge_commit` - Commit the platform recorded as the PR's merge commit
/// * `pr_commits` - The PR's commits, oldest first
pub fn classify_merge_mode(
    pr_number: u64,
    merge_commit: Option<&Commit>,
    pr_commits: &[Commit],
) -> Result<MergeMode> {
    let merge_commit = merge_commit.ok_or_else(|| {
        Error::InvalidInput(format!("unable to get merge mode of PR #{pr_number}: no merge commit"))
    })?;

    let Some(last_commit) = pr_commits.last() else {
        return Err(Error::InvalidInput(format!(
            "unable to get merge mode of PR #{pr_number}: commit list is empty"
        )));
    };

    if merge_commit.is_merge() {
        info!(pr_number, "merged via a merge commit");
        return Ok(MergeMode::Merge);
    }

    if pr_commits.len() == 1 {
        info!(pr_number, "single-commit PR, considering it a squash");
        return Ok(MergeMode::Squash);
    }

    let merge_tree = &merge_commit.tree_sha;
    let pr_tree = &last_commit.tree_sha;
    info!(pr_number, merge_tree = %merge_tree, pr_tree = %pr_tree, "comparing trees");

    if merge_tree == pr_tree {
        info!(pr_number, "merged via rebase");
        Ok(MergeMode::Rebase)
    } else {
        info!(pr_number, "merged via squash");
        Ok(MergeMode::Squash)
    }
}
