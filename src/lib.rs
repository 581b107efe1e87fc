//! merge-sleuth: infer how a merged pull request landed on its base branch.
//!
//! Hosting platforms do not always record whether a pull request was merged
//! with a merge commit, squashed, or rebased. This crate reconstructs that
//! from commit topology, and for merge commits finds which parent to diff
//! against when producing a cherry-pick patch.
//!
//! ```no_run
//! use merge_sleuth::config::Config;
//! use merge_sleuth::merge::MergeInspector;
//! use merge_sleuth::platform::create_platform_service;
//! use merge_sleuth::types::PullRequest;
//!
//! # async fn run() -> merge_sleuth::error::Result<()> {
//! let config = Config::load()?;
//! let platform = create_platform_service(&config)?;
//! let pr = PullRequest::new("octo", "widgets", 42).with_merge_commit("9f1c2e7");
//! let analysis = MergeInspector::new(platform.as_ref(), pr).analyze().await?;
//! println!("merged via {}", analysis.mode);
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod error;
pub mod merge;
pub mod platform;
pub mod types;

pub use error::{Error, Result};
pub use merge::{MergeInspector, classify_merge_mode, resolve_patch_parent};
pub use types::{Commit, MergeAnalysis, MergeMode, ParentRef, PullRequest, Repository};
