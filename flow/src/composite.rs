//! Shared composite machinery: the capability record and the completion
//! cascade every wrapper shape builds on.

use futures::future::join_all;
use weir_core::block::{Block, CompletionFuture, DynBlock};
use weir_core::error::Result;
use weir_core::options::Propagation;

/// The composition surfaces of a logical block: which blocks receive
/// shutdown signals, which must settle before the tail may be driven, and
/// which carry the outward identity. Exposed as plain references so callers
/// never need to inspect the runtime type of an opaque block handle.
#[derive(Clone)]
pub struct CompositeParts {
    pub heads: Vec<DynBlock>,
    pub frontier: Vec<DynBlock>,
    pub tail: Vec<DynBlock>,
}

pub trait Composite: Block {
    fn parts(&self) -> CompositeParts;
}

/// Frontier-to-tail cascade: drives the tail with the frontier's outcome,
/// then reports the tail's own terminal state, so a fault while the tail
/// drains supersedes a successful upstream outcome.
pub(crate) fn cascade(frontier: CompletionFuture, tail: DynBlock) -> CompletionFuture {
    Box::pin(async move {
        match frontier.await {
            Ok(()) => tail.complete(),
            Err(e) => tail.fault(e),
        }
        tail.completion().await
    })
}

/// Conjunction of terminal states: resolves once every member has settled,
/// reporting the first-encountered error when any member faulted. Which of
/// several simultaneous faults is reported is unspecified beyond "one of
/// them".
pub(crate) fn conjoin(completions: Vec<CompletionFuture>) -> CompletionFuture {
    Box::pin(async move {
        let outcomes = join_all(completions).await;
        outcomes.into_iter().collect::<Result<Vec<()>>>().map(|_| ())
    })
}

/// A composite's completion under its propagation mode. With `Enabled` the
/// wrapper owns the frontier-to-tail cascade; otherwise the tail's own
/// completion is exposed as-is and any cascade belongs to the edges.
pub(crate) fn resolve_completion(mode: Propagation, frontier: &DynBlock, tail: &DynBlock) -> CompletionFuture {
    match mode {
        Propagation::Enabled => cascade(frontier.completion(), tail.clone()),
        Propagation::Inherit | Propagation::Disabled => tail.completion(),
    }
}
