//! Source-faced single-edge composite.

use crate::composite::{resolve_completion, Composite, CompositeParts};
use crate::link::{connect, LinkConfig};
use weir_core::block::{Block, CompletionFuture, DynBlock, DynPropagator, DynSource, Source};
use weir_core::error::{Error, Result};
use weir_core::link::Link;
use weir_core::options::Propagation;

/// An edge composite that keeps a source identity so the composition stays
/// linkable: shutdown enters at the head while messages leave through the
/// tail source.
pub struct SourceComposite<T> {
    head: DynBlock,
    frontier: DynBlock,
    tail: DynSource<T>,
    mode: Propagation,
}

impl<T: Send + 'static> SourceComposite<T> {
    pub fn new(head: DynBlock, frontier: DynBlock, tail: DynSource<T>, mode: Propagation) -> Self {
        Self { head, frontier, tail, mode }
    }

    pub fn encapsulate(head: DynBlock, tail: DynSource<T>) -> Self {
        Self::new(head.clone(), head, tail, Propagation::Inherit)
    }

    fn tail_block(&self) -> DynBlock {
        self.tail.clone()
    }
}

/// Links a source into a propagator and exposes the pair as one source-faced
/// logical block: the original source is the head and the frontier, the
/// propagator carries the outward identity for further linking.
pub fn chain_through<I: Send + 'static, O: Send + 'static>(
    source: DynSource<I>,
    through: DynPropagator<I, O>,
    config: LinkConfig<I>,
) -> Result<SourceComposite<O>> {
    let (mut config, mode) = config.disarmed();
    config.target = Some(through.clone());
    connect(&source, config)?;
    let head: DynBlock = source;
    Ok(SourceComposite::new(head.clone(), head, through, mode))
}

impl<T: Send + 'static> Block for SourceComposite<T> {
    fn complete(&self) {
        self.head.complete();
    }

    fn fault(&self, error: Error) {
        self.head.fault(error);
    }

    fn completion(&self) -> CompletionFuture {
        resolve_completion(self.mode, &self.frontier, &self.tail_block())
    }
}

impl<T: Send + 'static> Source<T> for SourceComposite<T> {
    fn attach(&self, link: Link<T>) {
        self.tail.attach(link);
    }
}

impl<T: Send + 'static> Composite for SourceComposite<T> {
    fn parts(&self) -> CompositeParts {
        CompositeParts {
            heads: vec![self.head.clone()],
            frontier: vec![self.frontier.clone()],
            tail: vec![self.tail_block()],
        }
    }
}
