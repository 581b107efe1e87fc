//! Shared test fixtures

#![allow(dead_code)]

pub mod mock_platform;

pub use mock_platform::MockPlatformService;

use merge_sleuth::types::{Commit, ParentRef, PullRequest};

/// Build a commit with the given SHA, tree and parent SHAs
pub fn make_commit(sha: &str, tree: &str, parents: &[&str]) -> Commit {
    Commit {
        sha: sha.to_string(),
        tree_sha: tree.to_string(),
        parents: parents
            .iter()
            .map(|p| ParentRef { sha: (*p).to_string() })
            .collect(),
        summary: Some(format!("Commit {sha}")),
        committed_at: None,
    }
}

/// Build a linear list of PR commits `c1..cN` whose trees are `trees`
pub fn make_pr_commits(trees: &[&str]) -> Vec<Commit> {
    let mut parent = "base".to_string();
    trees
        .iter()
        .enumerate()
        .map(|(i, tree)| {
            let sha = format!("c{}", i + 1);
            let commit = make_commit(&sha, tree, &[&parent]);
            parent = sha;
            commit
        })
        .collect()
}

/// A merged PR in the `test/repo` repository
pub fn make_pr(number: u64, merge_sha: &str) -> PullRequest {
    PullRequest::new("test", "repo", number).with_merge_commit(merge_sha)
}
