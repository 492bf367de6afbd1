//! Terminal consuming block.

use async_trait::async_trait;
use log::trace;
use std::sync::Arc;
use weir_core::block::{Block, CompletionFuture, Target};
use weir_core::channel::Channel;
use weir_core::completion::CompletionSignal;
use weir_core::error::{Error, Result};
use weir_core::options::BlockOptions;

pub type Action<T> = Box<dyn Fn(T) -> Result<()> + Send + Sync>;

/// Runs a fallible handler over every accepted message, one at a time. A
/// handler error faults the block; completion settles once the queue has
/// drained after `complete`.
pub struct ActionBlock<T> {
    inner: Arc<Inner<T>>,
}

struct Inner<T> {
    input: Channel<T>,
    handler: Action<T>,
    completion: CompletionSignal,
}

impl<T: Send + 'static> ActionBlock<T> {
    pub fn new(options: BlockOptions, handler: impl Fn(T) -> Result<()> + Send + Sync + 'static) -> Self {
        let inner = Arc::new(Inner {
            input: Channel::new(options.capacity),
            handler: Box::new(handler),
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
        trace!("action block worker done");
    }

    async fn step(inner: &Inner<T>) -> bool {
        match inner.input.recv().await {
            Ok(item) => match (inner.handler)(item) {
                Ok(()) => true,
                Err(e) => {
                    inner.completion.settle(Err(e));
                    false
                }
            },
            Err(_) => false,
        }
    }
}

impl<T: Send + 'static> Block for ActionBlock<T> {
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

#[async_trait]
impl<T: Send + 'static> Target<T> for ActionBlock<T> {
    async fn post(&self, item: T) -> Result<()> {
        Ok(self.inner.input.send(item).await?)
    }
}
