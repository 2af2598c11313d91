//! Centralized stale-element recovery.
//!
//! Reads of frequently mutating collections (cart lines, the hover
//! preview) can lose the race against a re-render between resolve and
//! read. Rather than scattering ad hoc `catch`-and-retry at call sites,
//! every such path goes through [`once_on_stale`]: re-run the whole
//! resolve-and-read once if it failed stale, then give up. Leaf accessors
//! on elements the caller just resolved do not retry.

use std::future::Future;

use tracing::debug;

use crate::result::CafeteraResult;

/// Run `operation`; if it fails with a stale-element error, run it once
/// more and return that outcome.
pub async fn once_on_stale<T, F, Fut>(what: &str, operation: F) -> CafeteraResult<T>
where
    F: Fn() -> Fut,
    Fut: Future<Output = CafeteraResult<T>>,
{
    match operation().await {
        Err(err) if err.is_stale() => {
            debug!(what, "stale reference, re-resolving once");
            operation().await
        }
        other => other,
    }
}
