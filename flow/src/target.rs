//! Target-faced composite.

use crate::composite::{Composite, CompositeParts};
use async_trait::async_trait;
use weir_core::block::{Block, CompletionFuture, DynBlock, DynTarget, Target};
use weir_core::error::{Error, Result};

/// A head target and a tail block exposed as one logical target: offers and
/// shutdown signals enter at the head, the observable terminal state is the
/// tail's. The wiring between the two belongs to the caller.
pub struct TargetComposite<T> {
    head: DynTarget<T>,
    tail: DynBlock,
}

impl<T: Send + 'static> TargetComposite<T> {
    pub fn new(head: DynTarget<T>, tail: DynBlock) -> Self {
        Self { head, tail }
    }

    pub fn encapsulate(head: DynTarget<T>, tail: DynBlock) -> Self {
        Self::new(head, tail)
    }

    fn head_block(&self) -> DynBlock {
        self.head.clone()
    }
}

impl<T: Send + 'static> Block for TargetComposite<T> {
    fn complete(&self) {
        self.head.complete();
    }

    fn fault(&self, error: Error) {
        self.head.fault(error);
    }

    fn completion(&self) -> CompletionFuture {
        self.tail.completion()
    }
}

#[async_trait]
impl<T: Send + 'static> Target<T> for TargetComposite<T> {
    async fn post(&self, item: T) -> Result<()> {
        self.head.post(item).await
    }
}

impl<T: Send + 'static> Composite for TargetComposite<T> {
    fn parts(&self) -> CompositeParts {
        CompositeParts {
            heads: vec![self.head_block()],
            frontier: vec![self.tail.clone()],
            tail: vec![self.tail.clone()],
        }
    }
}
