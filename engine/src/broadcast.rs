//! Replicating block.

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

/// Offers a clone of every accepted message to each registered link. A
/// message arriving while no link is registered is dropped; unobserved
/// values are not retained.
pub struct BroadcastBlock<T> {
    inner: Arc<Inner<T>>,
}

struct Inner<T> {
    input: Channel<T>,
    links: LinkSet<T>,
    completion: CompletionSignal,
}

impl<T: Clone + Send + 'static> BroadcastBlock<T> {
    pub fn new(options: BlockOptions) -> Self {
        let inner = Arc::new(Inner {
            input: Channel::new(options.capacity),
            links: LinkSet::new(),
            completion: CompletionSignal::new(),
        });
        tokio::spawn(Self::worker(inner.clone()));
        Self { inner }
    }

    async fn worker(inner: Arc<Inner<T>>) {
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
        trace!("broadcast block worker done");
    }

    async fn step(inner: &Inner<T>) -> bool {
        match inner.input.recv().await {
            Ok(item) => {
                inner.links.replicate(item).await;
                true
            }
            Err(_) => false,
        }
    }
}

impl<T: Clone + Send + 'static> Block for BroadcastBlock<T> {
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

impl<T: Clone + Send + 'static> Source<T> for BroadcastBlock<T> {
    fn attach(&self, link: Link<T>) {
        let late = link.clone();
        self.inner.links.attach(link);
        if let Some(outcome) = self.inner.completion.outcome() {
            late.cascade(&outcome);
        }
    }
}

#[async_trait]
impl<T: Clone + Send + 'static> Target<T> for BroadcastBlock<T> {
    async fn post(&self, item: T) -> Result<()> {
        Ok(self.inner.input.send(item).await?)
    }
}
