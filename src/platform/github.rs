//! GitHub platform service implementation

use crate::config::GitHubConfig;
use crate::error::{Error, Result};
use crate::platform::PlatformService;
use crate::types::{Commit, ParentRef, Repository};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use octocrab::Octocrab;
use serde::{Deserialize, Serialize};
use std::future::Future;
use std::time::Duration;
use tracing::{debug, info};

const DEFAULT_PER_PAGE: u8 = 100;
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

// REST response shapes. Only the fields merge inference reads are modelled.

#[derive(Deserialize)]
struct RestCommit {
    #[serde(default)]
    sha: String,
    commit: Option<RestCommitDetail>,
    #[serde(default)]
    parents: Vec<RestParent>,
}

#[derive(Deserialize)]
struct RestCommitDetail {
    #[serde(default)]
    message: String,
    tree: Option<RestTree>,
    committer: Option<RestSignature>,
}

#[derive(Deserialize)]
struct RestTree {
    sha: String,
}

#[derive(Deserialize)]
struct RestSignature {
    date: Option<DateTime<Utc>>,
}

#[derive(Deserialize)]
struct RestParent {
    sha: String,
}

#[derive(Deserialize)]
struct RestRepository {
    name: String,
    owner: RestOwner,
    default_branch: Option<String>,
}

#[derive(Deserialize)]
struct RestOwner {
    login: String,
}

#[derive(Deserialize)]
struct RestPullRequest {
    /// Total commits on the PR, including any the commit listing leaves out
    commits: usize,
}

#[derive(Serialize)]
struct PageParams {
    per_page: u8,
    page: u32,
}

impl RestCommit {
    /// Convert to our `Commit`, rejecting payloads without a SHA or tree
    fn into_commit(self, requested: &str) -> Result<Commit> {
        let detail = self.commit;
        let tree_sha = detail
            .as_ref()
            .and_then(|d| d.tree.as_ref())
            .map(|t| t.sha.clone())
            .unwrap_or_default();

        if self.sha.trim().is_empty() || tree_sha.trim().is_empty() {
            return Err(Error::EmptyCommit(requested.to_string()));
        }

        let (summary, committed_at) = detail.map_or((None, None), |d| {
            let summary = d.message.lines().next().map(ToString::to_string);
            (summary, d.committer.and_then(|c| c.date))
        });

        Ok(Commit {
            sha: self.sha,
            tree_sha,
            parents: self
                .parents
                .into_iter()
                .map(|p| ParentRef { sha: p.sha })
                .collect(),
            summary,
            committed_at,
        })
    }
}

/// GitHub service using octocrab
pub struct GitHubService {
    client: Octocrab,
    /// Page size for PR commit listing
    per_page: u8,
    /// Per-request timeout
    timeout: Duration,
}

impl GitHubService {
    /// Create a new GitHub service
    ///
    /// `host` selects a GitHub Enterprise instance; `None` means github.com.
    pub fn new(token: &str, host: Option<&str>) -> Result<Self> {
        let mut builder = Octocrab::builder().personal_token(token.to_string());

        if let Some(h) = host {
            let base_url = format!("https://{}/api/v3", h.trim_end_matches('/'));
            builder = builder
                .base_uri(base_url)
                .map_err(|e| Error::GitHubApi(e.to_string()))?;
        }

        let client = builder
            .build()
            .map_err(|e| Error::GitHubApi(e.to_string()))?;

        Ok(Self::from_octocrab(client))
    }

    /// Create a service that talks to an explicit API base URL
    ///
    /// Used for proxies and for pointing the client at a local test server.
    pub fn with_base_url(token: &str, base_url: &str) -> Result<Self> {
        let client = Octocrab::builder()
            .personal_token(token.to_string())
            .base_uri(base_url)
            .map_err(|e| Error::GitHubApi(e.to_string()))?
            .build()
            .map_err(|e| Error::GitHubApi(e.to_string()))?;

        Ok(Self::from_octocrab(client))
    }

    /// Create a service from configuration and a resolved token
    pub fn from_config(token: &str, config: &GitHubConfig) -> Result<Self> {
        Ok(Self::new(token, config.host.as_deref())?
            .with_per_page(config.per_page)
            .with_timeout(config.request_timeout()))
    }

    /// Wrap a pre-configured octocrab client
    pub const fn from_octocrab(client: Octocrab) -> Self {
        Self {
            client,
            per_page: DEFAULT_PER_PAGE,
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Override the page size used for PR commit listing (clamped to 1..=100)
    #[must_use]
    pub fn with_per_page(mut self, per_page: u8) -> Self {
        self.per_page = per_page.clamp(1, DEFAULT_PER_PAGE);
        self
    }

    /// Override the per-request timeout
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Run a request under the configured timeout
    async fn timed<T>(&self, request: impl Future<Output = octocrab::Result<T>>) -> Result<T> {
        tokio::time::timeout(self.timeout, request)
            .await
            .map_err(|_| Error::Timeout(self.timeout))?
            .map_err(Error::from)
    }
}

#[async_trait]
impl PlatformService for GitHubService {
    async fn get_repository(&self, owner: &str, name: &str) -> Result<Repository> {
        debug!(owner, name, "getting repository");
        let route = format!("/repos/{owner}/{name}");
        let repo: RestRepository = self.timed(self.client.get(route, None::<&()>)).await?;

        debug!(owner, name, "got repository");
        Ok(Repository {
            owner: repo.owner.login,
            name: repo.name,
            default_branch: repo.default_branch,
        })
    }

    async fn get_commit(&self, owner: &str, name: &str, sha: &str) -> Result<Commit> {
        debug!(owner, name, sha, "getting commit");
        let route = format!("/repos/{owner}/{name}/commits/{sha}");
        let commit: Option<RestCommit> = self.timed(self.client.get(route, None::<&()>)).await?;

        let commit = commit
            .ok_or_else(|| Error::EmptyCommit(sha.to_string()))?
            .into_commit(sha)?;
        debug!(
            sha,
            tree = %commit.tree_sha,
            parents = commit.parents.len(),
            summary = commit.summary.as_deref().unwrap_or_default(),
            committed_at = ?commit.committed_at,
            "got commit"
        );
        Ok(commit)
    }

    async fn list_pr_commits(&self, owner: &str, name: &str, number: u64) -> Result<Vec<Commit>> {
        debug!(owner, name, pr_number = number, "listing PR commits");
        let pull: RestPullRequest = self
            .timed(
                self.client
                    .get(format!("/repos/{owner}/{name}/pulls/{number}"), None::<&()>),
            )
            .await?;

        let route = format!("/repos/{owner}/{name}/pulls/{number}/commits");
        let mut commits = Vec::new();

        for page in 1u32.. {
            let params = PageParams {
                per_page: self.per_page,
                page,
            };
            let batch: Vec<RestCommit> = self
                .timed(self.client.get(route.as_str(), Some(&params)))
                .await?;
            let batch_len = batch.len();

            for raw in batch {
                let requested = raw.sha.clone();
                commits.push(raw.into_commit(&requested)?);
            }

            debug!(pr_number = number, page, count = batch_len, "read commit page");
            if batch_len < usize::from(self.per_page) {
                break;
            }
        }

        // The listing is capped (250 on github.com) and ends with a short page
        if commits.len() != pull.commits {
            return Err(Error::IncompleteCommitList {
                number,
                expected: pull.commits,
                fetched: commits.len(),
            });
        }

        info!(pr_number = number, count = commits.len(), "read PR commits");
        Ok(commits)
    }
}
