//! Transforming block.

use crate::links::LinkSet;
use async_trait::async_trait;
use log::trace;
use std::sync::Arc;
use weir_core::block::{Block, CompletionFuture, Source, Target};
use weir_core::channel::Channel;
use weir_core::completion::CompletionSignal;
use weir_core::error::{Error, Result};
use weir_core::link::Link;
use weir_core::options::BlockOptions;

pub type Transform<I, O> = Box<dyn Fn(I) -> Result<O> + Send + Sync>;

/// Applies a fallible handler to every accepted message and forwards the
/// produced messages to its links. A handler error faults the block and the
/// fault cascades over every completion-propagating edge.
pub struct TransformBlock<I, O> {
    inner: Arc<Inner<I, O>>,
}

struct Inner<I, O> {
    input: Channel<I>,
    handler: Transform<I, O>,
    links: LinkSet<O>,
    completion: CompletionSignal,
}

impl<I: Send + 'static, O: Send + 'static> TransformBlock<I, O> {
    pub fn new(options: BlockOptions, handler: impl Fn(I) -> Result<O> + Send + Sync + 'static) -> Self {
        let inner = Arc::new(Inner {
            input: Channel::new(options.capacity),
            handler: Box::new(handler),
            links: LinkSet::new(),
            completion: CompletionSignal::new(),
        });
        tokio::spawn(Self::worker(inner.clone()));
        Self { inner }
    }

    async fn worker(inner: Arc<Inner<I, O>>) {
        let interrupt = inner.completion.listener();
        loop {
            tokio::select! {
                biased;
                _ = interrupt.clone() => break,
                alive = Self::step(&inner) => if !alive { break },
            }
        }
        inner.input.close();
        inner.completion.settle(Ok(()));
        let outcome = inner.completion.outcome().unwrap_or(Ok(()));
        inner.links.propagate(&outcome);
        trace!("transform block worker done");
    }

    async fn step(inner: &Inner<I, O>) -> bool {
        match inner.input.recv().await {
            Ok(item) => match (inner.handler)(item) {
                Ok(out) => {
                    inner.links.deliver(out).await;
                    true
                }
                Err(e) => {
                    inner.completion.settle(Err(e));
                    false
                }
            },
            Err(_) => false,
        }
    }
}

impl<I: Send + 'static, O: Send + 'static> Block for TransformBlock<I, O> {
    fn complete(&self) {
        self.inner.input.close();
    }

    fn fault(&self, error: Error) {
        if self.inner.completion.settle(Err(error)) {
            self.inner.input.close();
        }
    }

    fn completion(&self) -> CompletionFuture {
        self.inner.completion.future()
    }
}

impl<I: Send + 'static, O: Send + 'static> Source<O> for TransformBlock<I, O> {
    fn attach(&self, link: Link<O>) {
        let late = link.clone();
        self.inner.links.attach(link);
        if let Some(outcome) = self.inner.completion.outcome() {
            late.cascade(&outcome);
        }
    }
}

#[async_trait]
impl<I: Send + 'static, O: Send + 'static> Target<I> for TransformBlock<I, O> {
    async fn post(&self, item: I) -> Result<()> {
        Ok(self.inner.input.send(item).await?)
    }
}
