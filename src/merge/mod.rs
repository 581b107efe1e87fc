//! Merge inference for merged pull requests
//!
//! Two-phase pattern:
//! 1. Gather - fetch PR commits and the merge commit (effectful, see `inspect`)
//! 2. Decide - classify the merge mode and pick the patch parent (`classify`,
//!    `patch`; the classifier is pure, the resolver only fetches parents)

mod classify;
mod inspect;
mod patch;

pub use classify::classify_merge_mode;
pub use inspect::MergeInspector;
pub use patch::{find_patch_parent, resolve_patch_parent, select_patch_parent};

use crate::error::{Error, Result};
use std::future::Future;
use tokio_util::sync::CancellationToken;

/// Race a platform call against cancellation.
///
/// The in-flight call is dropped as soon as the token fires.
pub(crate) async fn cancellable<T>(
    cancel: &CancellationToken,
    call: impl Future<Output = Result<T>>,
) -> Result<T> {
    tokio::select! {
        biased;
        () = cancel.cancelled() => Err(Error::Cancelled),
        result = call => result,
    }
}
