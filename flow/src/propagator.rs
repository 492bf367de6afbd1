//! Propagator-faced composite.

use crate::composite::{resolve_completion, Composite, CompositeParts};
use async_trait::async_trait;
use weir_core::block::{Block, CompletionFuture, DynBlock, DynSource, DynTarget, Source, Target};
use weir_core::error::{Error, Result};
use weir_core::link::Link;
use weir_core::options::Propagation;

/// A target head and a source tail exposed as one logical propagator, so a
/// whole sub-pipeline can sit in the middle of a larger one.
pub struct PropagatorComposite<I, O> {
    head: DynTarget<I>,
    frontier: DynBlock,
    tail: DynSource<O>,
    mode: Propagation,
}

impl<I: Send + 'static, O: Send + 'static> PropagatorComposite<I, O> {
    pub fn new(head: DynTarget<I>, frontier: DynBlock, tail: DynSource<O>, mode: Propagation) -> Self {
        Self { head, frontier, tail, mode }
    }

    pub fn encapsulate(head: DynTarget<I>, tail: DynSource<O>) -> Self {
        let frontier: DynBlock = head.clone();
        Self::new(head, frontier, tail, Propagation::Inherit)
    }

    fn tail_block(&self) -> DynBlock {
        self.tail.clone()
    }
}

impl<I: Send + 'static, O: Send + 'static> Block for PropagatorComposite<I, O> {
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

#[async_trait]
impl<I: Send + 'static, O: Send + 'static> Target<I> for PropagatorComposite<I, O> {
    async fn post(&self, item: I) -> Result<()> {
        self.head.post(item).await
    }
}

impl<I: Send + 'static, O: Send + 'static> Source<O> for PropagatorComposite<I, O> {
    fn attach(&self, link: Link<O>) {
        self.tail.attach(link);
    }
}

impl<I: Send + 'static, O: Send + 'static> Composite for PropagatorComposite<I, O> {
    fn parts(&self) -> CompositeParts {
        let head: DynBlock = self.head.clone();
        CompositeParts {
            heads: vec![head],
            frontier: vec![self.frontier.clone()],
            tail: vec![self.tail_block()],
        }
    }
}
