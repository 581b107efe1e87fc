//! Mock platform service for testing
//!
//! These are test utilities - not all may be used in current tests but are
//! available for future test development.

#![allow(dead_code)]

use async_trait::async_trait;
use merge_sleuth::error::{Error, Result};
use merge_sleuth::platform::PlatformService;
use merge_sleuth::types::{Commit, Repository};
use std::collections::{HashMap, HashSet};
use std::sync::Mutex;

/// Call record for `get_commit`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GetCommitCall {
    pub owner: String,
    pub name: String,
    pub sha: String,
}

/// Simple mock platform service for testing
///
/// Features:
/// - Canned repositories, commits and PR commit lists
/// - Call tracking for verification
/// - Error injection per SHA / per operation
/// - Hanging calls for cancellation tests
pub struct MockPlatformService {
    repositories: Mutex<HashMap<(String, String), Repository>>,
    commits: Mutex<HashMap<String, Commit>>,
    pr_commits: Mutex<HashMap<u64, Vec<Commit>>>,
    // Call tracking
    get_repository_calls: Mutex<Vec<(String, String)>>,
    get_commit_calls: Mutex<Vec<GetCommitCall>>,
    list_pr_commits_calls: Mutex<Vec<u64>>,
    // Error injection
    error_on_get_repository: Mutex<Option<String>>,
    error_on_list_pr_commits: Mutex<Option<String>>,
    error_on_commit: Mutex<HashMap<String, String>>,
    empty_commits: Mutex<HashSet<String>>,
    hanging_commits: Mutex<HashSet<String>>,
}

impl MockPlatformService {
    /// Create an empty mock
    pub fn new() -> Self {
        Self {
            repositories: Mutex::new(HashMap::new()),
            commits: Mutex::new(HashMap::new()),
            pr_commits: Mutex::new(HashMap::new()),
            get_repository_calls: Mutex::new(Vec::new()),
            get_commit_calls: Mutex::new(Vec::new()),
            list_pr_commits_calls: Mutex::new(Vec::new()),
            error_on_get_repository: Mutex::new(None),
            error_on_list_pr_commits: Mutex::new(None),
            error_on_commit: Mutex::new(HashMap::new()),
            empty_commits: Mutex::new(HashSet::new()),
            hanging_commits: Mutex::new(HashSet::new()),
        }
    }

    /// Create a mock that already knows the `test/repo` repository
    pub fn with_test_repo() -> Self {
        let mock = Self::new();
        mock.add_repository(Repository {
            owner: "test".to_string(),
            name: "repo".to_string(),
            default_branch: Some("main".to_string()),
        });
        mock
    }

    // === Response setup ===

    /// Register a repository
    pub fn add_repository(&self, repo: Repository) {
        self.repositories
            .lock()
            .unwrap()
            .insert((repo.owner.clone(), repo.name.clone()), repo);
    }

    /// Register a commit, keyed by its SHA
    pub fn add_commit(&self, commit: Commit) {
        self.commits
            .lock()
            .unwrap()
            .insert(commit.sha.clone(), commit);
    }

    /// Register several commits
    pub fn add_commits(&self, commits: &[Commit]) {
        for commit in commits {
            self.add_commit(commit.clone());
        }
    }

    /// Set the commit list returned for a PR
    pub fn set_pr_commits(&self, pr_number: u64, commits: Vec<Commit>) {
        self.pr_commits.lock().unwrap().insert(pr_number, commits);
    }

    // === Error injection methods ===

    /// Make `get_repository` return an error
    pub fn fail_get_repository(&self, msg: &str) {
        *self.error_on_get_repository.lock().unwrap() = Some(msg.to_string());
    }

    /// Make `list_pr_commits` return an error
    pub fn fail_list_pr_commits(&self, msg: &str) {
        *self.error_on_list_pr_commits.lock().unwrap() = Some(msg.to_string());
    }

    /// Make `get_commit` fail for one SHA
    pub fn fail_commit(&self, sha: &str, msg: &str) {
        self.error_on_commit
            .lock()
            .unwrap()
            .insert(sha.to_string(), msg.to_string());
    }

    /// Make `get_commit` answer with an empty payload for one SHA
    pub fn empty_commit(&self, sha: &str) {
        self.empty_commits.lock().unwrap().insert(sha.to_string());
    }

    /// Make `get_commit` never complete for one SHA
    pub fn hang_commit(&self, sha: &str) {
        self.hanging_commits.lock().unwrap().insert(sha.to_string());
    }

    // === Call verification methods ===

    /// All `get_repository` calls as (owner, name)
    pub fn get_repository_calls(&self) -> Vec<(String, String)> {
        self.get_repository_calls.lock().unwrap().clone()
    }

    /// All `get_commit` calls
    pub fn get_commit_calls(&self) -> Vec<GetCommitCall> {
        self.get_commit_calls.lock().unwrap().clone()
    }

    /// SHAs requested through `get_commit`, in call order
    pub fn fetched_shas(&self) -> Vec<String> {
        self.get_commit_calls()
            .into_iter()
            .map(|c| c.sha)
            .collect()
    }

    /// All `list_pr_commits` calls
    pub fn list_pr_commits_calls(&self) -> Vec<u64> {
        self.list_pr_commits_calls.lock().unwrap().clone()
    }

    /// Assert that `get_commit` was never called for `sha`
    pub fn assert_commit_not_fetched(&self, sha: &str) {
        let shas = self.fetched_shas();
        assert!(
            !shas.iter().any(|s| s == sha),
            "Expected get_commit({sha}) NOT to be called but it was: {shas:?}"
        );
    }
}

#[async_trait]
impl PlatformService for MockPlatformService {
    async fn get_repository(&self, owner: &str, name: &str) -> Result<Repository> {
        self.get_repository_calls
            .lock()
            .unwrap()
            .push((owner.to_string(), name.to_string()));

        // Check for injected error
        if let Some(msg) = self.error_on_get_repository.lock().unwrap().as_ref() {
            return Err(Error::Platform(msg.clone()));
        }

        let repos = self.repositories.lock().unwrap();
        repos
            .get(&(owner.to_string(), name.to_string()))
            .cloned()
            .ok_or_else(|| Error::Platform(format!("repository {owner}/{name} not found")))
    }

    async fn get_commit(&self, owner: &str, name: &str, sha: &str) -> Result<Commit> {
        self.get_commit_calls.lock().unwrap().push(GetCommitCall {
            owner: owner.to_string(),
            name: name.to_string(),
            sha: sha.to_string(),
        });

        let hang = self.hanging_commits.lock().unwrap().contains(sha);
        if hang {
            std::future::pending::<()>().await;
        }

        // Check for injected error
        if let Some(msg) = self.error_on_commit.lock().unwrap().get(sha) {
            return Err(Error::Platform(msg.clone()));
        }
        if self.empty_commits.lock().unwrap().contains(sha) {
            return Err(Error::EmptyCommit(sha.to_string()));
        }

        let commits = self.commits.lock().unwrap();
        commits
            .get(sha)
            .cloned()
            .ok_or_else(|| Error::Platform(format!("get_commit: no response configured for {sha}")))
    }

    async fn list_pr_commits(&self, _owner: &str, _name: &str, number: u64) -> Result<Vec<Commit>> {
        self.list_pr_commits_calls.lock().unwrap().push(number);

        // Check for injected error
        if let Some(msg) = self.error_on_list_pr_commits.lock().unwrap().as_ref() {
            return Err(Error::Platform(msg.clone()));
        }

        let responses = self.pr_commits.lock().unwrap();
        Ok(responses.get(&number).cloned().unwrap_or_default())
    }
}
