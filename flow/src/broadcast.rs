//! 1:M broadcast aggregation.
//!
//! A broadcasting block replicates messages to its registered targets but
//! its own terminal state is not observable as a single future covering the
//! drain of every target. This composite supplies the missing cascade: once
//! the broadcasting source settles, every registered target is driven to the
//! same outcome and the exposed completion is the conjunction of all of
//! their completions.

use crate::composite::{conjoin, Composite, CompositeParts};
use crate::link::{connect, LinkConfig};
use async_trait::async_trait;
use weir_core::block::{Block, CompletionFuture, DynBlock, DynPropagator, DynSource, DynTarget, Target};
use weir_core::error::{Error, Result};
use weir_core::options::LinkOptions;

/// One broadcasting propagator and its registered targets exposed as a
/// single logical target.
pub struct BroadcastComposite<T> {
    head: DynTarget<T>,
    source: DynBlock,
    targets: Vec<DynBlock>,
}

impl<T: Send + 'static> BroadcastComposite<T> {
    pub fn new(broadcast: DynPropagator<T, T>, targets: Vec<DynBlock>) -> Self {
        let head: DynTarget<T> = broadcast.clone();
        let source: DynBlock = broadcast;
        Self { head, source, targets }
    }
}

/// Links the broadcasting block to every target, with the edges kept pure
/// message paths so the composite is the single owner of the cascade.
pub fn tee<T: Send + 'static>(
    broadcast: DynPropagator<T, T>,
    targets: Vec<DynTarget<T>>,
) -> Result<BroadcastComposite<T>> {
    let upstream: DynSource<T> = broadcast.clone();
    for target in &targets {
        let config = LinkConfig {
            target: Some(target.clone()),
            options: LinkOptions::detached(),
            ..Default::default()
        };
        connect(&upstream, config)?;
    }
    let targets = targets.into_iter().map(|target| -> DynBlock { target }).collect();
    Ok(BroadcastComposite::new(broadcast, targets))
}

impl<T: Send + 'static> Block for BroadcastComposite<T> {
    fn complete(&self) {
        self.source.complete();
    }

    fn fault(&self, error: Error) {
        self.source.fault(error);
    }

    fn completion(&self) -> CompletionFuture {
        if self.targets.is_empty() {
            return self.source.completion();
        }
        let upstream = self.source.completion();
        let targets = self.targets.clone();
        Box::pin(async move {
            match upstream.await {
                Ok(()) => {
                    for target in &targets {
                        target.complete();
                    }
                }
                Err(e) => {
                    for target in &targets {
                        target.fault(e.clone());
                    }
                }
            }
            conjoin(targets.iter().map(|target| target.completion()).collect()).await
        })
    }
}

#[async_trait]
impl<T: Send + 'static> Target<T> for BroadcastComposite<T> {
    async fn post(&self, item: T) -> Result<()> {
        self.head.post(item).await
    }
}

impl<T: Send + 'static> Composite for BroadcastComposite<T> {
    fn parts(&self) -> CompositeParts {
        CompositeParts {
            heads: vec![self.source.clone()],
            frontier: vec![self.source.clone()],
            tail: self.targets.clone(),
        }
    }
}
