//! Single-edge logical block.

use crate::composite::{resolve_completion, Composite, CompositeParts};
use crate::fan_in::FanInComposite;
use crate::link::{connect, LinkConfig};
use std::sync::Arc;
use weir_core::block::{Block, CompletionFuture, DynBlock, DynSource};
use weir_core::error::{Error, Result};
use weir_core::options::Propagation;

/// Composes a head, a completion-observation frontier and a tail into one
/// logical block. Shutdown always enters at the head and the exposed
/// completion reflects the tail, so a caller cannot tell the composition
/// from a primitive block.
pub struct EdgeComposite {
    head: DynBlock,
    frontier: DynBlock,
    tail: DynBlock,
    mode: Propagation,
}

impl EdgeComposite {
    pub fn new(head: DynBlock, frontier: DynBlock, tail: DynBlock, mode: Propagation) -> Self {
        Self { head, frontier, tail, mode }
    }

    /// Exposes an already-wired head/tail pair as one block. Completion of
    /// the tail is left to whatever wiring the caller established.
    pub fn encapsulate(head: DynBlock, tail: DynBlock) -> Self {
        Self::new(head.clone(), head, tail, Propagation::Inherit)
    }

    /// Encapsulates several heads behind one logical block; shutdown signals
    /// broadcast to all of them.
    pub fn encapsulate_many(heads: Vec<DynBlock>, tail: DynBlock) -> Result<Self> {
        let union: DynBlock = Arc::new(FanInComposite::new(heads)?);
        Ok(Self::new(union.clone(), union, tail, Propagation::Inherit))
    }
}

/// Links a source to the configured target and wraps the pair as one logical
/// block. The edge itself is kept a pure message path; when the caller's
/// options ask for propagation the wrapper owns the cascade, with the source
/// as its frontier. Using the source rather than its innermost tail as the
/// frontier is what lets a wrapped composite bring its own aggregate
/// completion along when it is chained onward.
pub fn chain<T: Send + 'static>(source: DynSource<T>, config: LinkConfig<T>) -> Result<EdgeComposite> {
    let tail: DynBlock = config.target.clone().ok_or(Error::MissingEndpoint("target"))?;
    let (config, mode) = config.disarmed();
    connect(&source, config)?;
    let head: DynBlock = source;
    Ok(EdgeComposite::new(head.clone(), head, tail, mode))
}

impl Block for EdgeComposite {
    fn complete(&self) {
        self.head.complete();
    }

    fn fault(&self, error: Error) {
        self.head.fault(error);
    }

    fn completion(&self) -> CompletionFuture {
        resolve_completion(self.mode, &self.frontier, &self.tail)
    }
}

impl Composite for EdgeComposite {
    fn parts(&self) -> CompositeParts {
        CompositeParts {
            heads: vec![self.head.clone()],
            frontier: vec![self.frontier.clone()],
            tail: vec![self.tail.clone()],
        }
    }
}
