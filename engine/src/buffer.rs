//! FIFO buffering block.

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

/// Buffers offered messages and forwards them in order to its links.
/// `complete` closes the intake while queued messages keep flowing;
/// completion settles once every buffered message has been handed to a link
/// target, so per-edge and composite-owned completion cascades can never
/// outrun the messages themselves.
pub struct BufferBlock<T> {
    inner: Arc<Inner<T>>,
}

struct Inner<T> {
    input: Channel<T>,
    links: LinkSet<T>,
    completion: CompletionSignal,
}

impl<T: Send + 'static> BufferBlock<T> {
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
        trace!("buffer block worker done");
    }

    async fn step(inner: &Inner<T>) -> bool {
        match inner.input.recv().await {
            Ok(item) => {
                inner.links.deliver(item).await;
                true
            }
            Err(_) => false,
        }
    }
}

impl<T: Send + 'static> Block for BufferBlock<T> {
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

impl<T: Send + 'static> Source<T> for BufferBlock<T> {
    fn attach(&self, link: Link<T>) {
        let late = link.clone();
        self.inner.links.attach(link);
        // an edge attached after the worker already cascaded still observes
        // the terminal state
        if let Some(outcome) = self.inner.completion.outcome() {
            late.cascade(&outcome);
        }
    }
}

#[async_trait]
impl<T: Send + 'static> Target<T> for BufferBlock<T> {
    async fn post(&self, item: T) -> Result<()> {
        Ok(self.inner.input.send(item).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::action::ActionBlock;
    use parking_lot::Mutex;
    use weir_core::options::LinkOptions;

    #[tokio::test]
    async fn forwards_in_order_and_completes_after_drain() {
        let buffer = Arc::new(BufferBlock::new(BlockOptions::default()));
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = {
            let seen = seen.clone();
            Arc::new(ActionBlock::new(BlockOptions::default(), move |item: u32| {
                seen.lock().push(item);
                Ok(())
            }))
        };
        buffer.attach(Link::new(sink.clone(), LinkOptions::default()));

        for item in 0..5u32 {
            buffer.post(item).await.unwrap();
        }
        buffer.complete();
        buffer.completion().await.unwrap();
        sink.completion().await.unwrap();
        assert_eq!(*seen.lock(), vec![0, 1, 2, 3, 4]);
    }

    #[tokio::test]
    async fn fault_settles_with_the_error_and_cascades() {
        let buffer: Arc<BufferBlock<u32>> = Arc::new(BufferBlock::new(BlockOptions::default()));
        let sink = Arc::new(ActionBlock::new(BlockOptions::default(), |_: u32| Ok(())));
        buffer.attach(Link::new(sink.clone(), LinkOptions::default()));

        buffer.fault(Error::General("boom".into()));
        assert!(matches!(buffer.completion().await, Err(Error::General(_))));
        assert!(matches!(sink.completion().await, Err(Error::General(_))));
        assert!(buffer.post(1).await.is_err());
    }

    #[tokio::test]
    async fn predicate_routes_declined_items() {
        let buffer = Arc::new(BufferBlock::new(BlockOptions::default()));
        let evens = Arc::new(Mutex::new(Vec::new()));
        let odds = Arc::new(Mutex::new(Vec::new()));
        let even_sink = {
            let evens = evens.clone();
            Arc::new(ActionBlock::new(BlockOptions::default(), move |item: u32| {
                evens.lock().push(item);
                Ok(())
            }))
        };
        let odd_sink = {
            let odds = odds.clone();
            Arc::new(ActionBlock::new(BlockOptions::default(), move |item: u32| {
                odds.lock().push(item);
                Ok(())
            }))
        };
        let mut link = Link::new(even_sink.clone(), LinkOptions::default());
        link.predicate = Some(Arc::new(|item: &u32| item % 2 == 0));
        link.declined_target = Some(odd_sink.clone());
        buffer.attach(link);

        for item in 0..6u32 {
            buffer.post(item).await.unwrap();
        }
        buffer.complete();
        buffer.completion().await.unwrap();
        even_sink.completion().await.unwrap();
        assert_eq!(*evens.lock(), vec![0, 2, 4]);
        assert_eq!(*odds.lock(), vec![1, 3, 5]);
    }

    #[tokio::test]
    async fn items_posted_before_wiring_are_kept() {
        let buffer = Arc::new(BufferBlock::new(BlockOptions::default()));
        buffer.post(7u32).await.unwrap();
        tokio::task::yield_now().await;

        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = {
            let seen = seen.clone();
            Arc::new(ActionBlock::new(BlockOptions::default(), move |item: u32| {
                seen.lock().push(item);
                Ok(())
            }))
        };
        buffer.attach(Link::new(sink.clone(), LinkOptions::default()));
        buffer.complete();
        buffer.completion().await.unwrap();
        sink.completion().await.unwrap();
        assert_eq!(*seen.lock(), vec![7]);
    }
}
