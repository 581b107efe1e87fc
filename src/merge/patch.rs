//! Patch tree resolution for merge commits
//!
//! A merge commit joins the base branch history with the PR branch. To build
//! a cherry-pick diff the caller needs to know which parent carries the PR
//! branch's final tree; that parent is the one whose tree matches the tree of
//! the PR's last commit.

use crate::error::{Error, Result};
use crate::merge::cancellable;
use crate::platform::PlatformService;
use crate::types::{Commit, Repository};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

/// Index of the first parent tree equal to `target_tree`
///
/// First match wins when several parents share the tree.
pub fn find_patch_parent<'a>(
    target_tree: &str,
    parent_trees: impl IntoIterator<Item = &'a str>,
) -> Option<usize> {
    parent_trees
        .into_iter()
        .position(|tree| tree == target_tree)
}

/// Pick the patch parent from parents that were already fetched
///
/// Same rule as [`resolve_patch_parent`] for callers holding the parent
/// commits, e.g. from a cache or fixtures. `parent_commits` must follow the
/// merge commit's parent order.
pub fn select_patch_parent(
    merge_commit: &Commit,
    parent_commits: &[Commit],
    pr_commits: &[Commit],
) -> Result<usize> {
    let Some(last_commit) = pr_commits.last() else {
        return Err(Error::InvalidInput(
            "unable to find patch tree, commit list is empty".to_string(),
        ));
    };
    if parent_commits.len() != merge_commit.parents.len() {
        return Err(Error::InvalidInput(format!(
            "merge commit {} has {} parents but {} parent commits were given",
            merge_commit.sha,
            merge_commit.parents.len(),
            parent_commits.len()
        )));
    }

    find_patch_parent(
        &last_commit.tree_sha,
        parent_commits.iter().map(|c| c.tree_sha.as_str()),
    )
    .ok_or_else(|| Error::PatchTreeNotFound {
        sha: merge_commit.sha.clone(),
        parents: parent_commits.len(),
    })
}

/// Find which parent of `merge_commit` should be diffed for a cherry pick
///
/// Parents are fetched one at a time in their recorded order and the scan
/// stops at the first parent whose tree equals the tree of the last PR
/// commit. Never falls back to parent 0: when nothing matches the result is
/// [`Error::PatchTreeNotFound`].
///
/// # Arguments
/// * `platform` - Platform service used to fetch each parent
/// * `cancel` - Aborts the scan, and any in-flight fetch, when triggered
/// * `repo` - Repository holding the merge commit
/// * `merge_commit` - The PR's merge commit
/// * `pr_commits` - The PR's commits, oldest first
pub async fn resolve_patch_parent(
    platform: &dyn PlatformService,
    cancel: &CancellationToken,
    repo: &Repository,
    merge_commit: &Commit,
    pr_commits: &[Commit],
) -> Result<usize> {
    let Some(last_commit) = pr_commits.last() else {
        return Err(Error::InvalidInput(
            "unable to find patch tree, commit list is empty".to_string(),
        ));
    };
    let pr_tree = last_commit.tree_sha.as_str();

    for (index, parent) in merge_commit.parents.iter().enumerate() {
        let parent_commit = cancellable(
            cancel,
            platform.get_commit(&repo.owner, &repo.name, &parent.sha),
        )
        .await
        .map_err(|e| {
            Error::fetch_failed(format!("querying GitHub for parent commit {}", parent.sha), e)
        })?;

        debug!(
            pr_tree,
            parent = index,
            parent_tree = %parent_commit.tree_sha,
            "comparing parent tree"
        );
        if parent_commit.tree_sha == pr_tree {
            info!(
                merge_commit = %merge_commit.sha,
                parent = index,
                parent_summary = parent_commit.summary.as_deref().unwrap_or_default(),
                "cherry pick to be performed diffing the parent tree"
            );
            return Ok(index);
        }
    }

    Err(Error::PatchTreeNotFound {
        sha: merge_commit.sha.clone(),
        parents: merge_commit.parents.len(),
    })
}
