//! Manually-settled block stubs for wrapper delegation tests, standing in
//! for real engine blocks the way the original tests mock the raw block
//! interface.

use async_trait::async_trait;
use parking_lot::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use weir_core::block::{Block, CompletionFuture, Source, Target};
use weir_core::completion::CompletionSignal;
use weir_core::error::{Error, Result};
use weir_core::link::Link;

#[derive(Default)]
struct StubState {
    completes: AtomicUsize,
    faults: AtomicUsize,
    last_fault: Mutex<Option<Error>>,
    signal: CompletionSignal,
}

impl StubState {
    fn complete(&self) {
        self.completes.fetch_add(1, Ordering::SeqCst);
        self.signal.settle(Ok(()));
    }

    fn fault(&self, error: Error) {
        self.faults.fetch_add(1, Ordering::SeqCst);
        *self.last_fault.lock() = Some(error.clone());
        self.signal.settle(Err(error));
    }
}

macro_rules! stub_block_impl {
    () => {
        fn complete(&self) {
            self.state.complete();
        }

        fn fault(&self, error: Error) {
            self.state.fault(error);
        }

        fn completion(&self) -> CompletionFuture {
            self.state.signal.future()
        }
    };
}

/// Bare block stub: counts shutdown signals, settles only when told to.
#[derive(Default)]
pub(crate) struct StubBlock {
    state: StubState,
}

impl StubBlock {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Settles the completion without counting as an observed signal, the
    /// way a real block settles from inside its own worker.
    pub fn settle(&self, outcome: Result<()>) {
        self.state.signal.settle(outcome);
    }

    pub fn completes(&self) -> usize {
        self.state.completes.load(Ordering::SeqCst)
    }

    pub fn faults(&self) -> usize {
        self.state.faults.load(Ordering::SeqCst)
    }

    pub fn last_fault(&self) -> Option<Error> {
        self.state.last_fault.lock().clone()
    }
}

impl Block for StubBlock {
    stub_block_impl!();
}

/// Source stub: records attached links.
#[derive(Default)]
pub(crate) struct StubSource<T> {
    state: StubState,
    links: Mutex<Vec<Link<T>>>,
}

impl<T: Send + 'static> StubSource<T> {
    pub fn new() -> Arc<Self> {
        Arc::new(Self { state: StubState::default(), links: Mutex::new(Vec::new()) })
    }

    pub fn settle(&self, outcome: Result<()>) {
        self.state.signal.settle(outcome);
    }

    pub fn attached(&self) -> usize {
        self.links.lock().len()
    }

    pub fn completes(&self) -> usize {
        self.state.completes.load(Ordering::SeqCst)
    }

    pub fn faults(&self) -> usize {
        self.state.faults.load(Ordering::SeqCst)
    }
}

impl<T: Send + 'static> Block for StubSource<T> {
    stub_block_impl!();
}

impl<T: Send + 'static> Source<T> for StubSource<T> {
    fn attach(&self, link: Link<T>) {
        self.links.lock().push(link);
    }
}

/// Target stub: records offered messages.
pub(crate) struct StubTarget<T> {
    state: StubState,
    posts: Mutex<Vec<T>>,
}

impl<T: Send + 'static> StubTarget<T> {
    pub fn new() -> Arc<Self> {
        Arc::new(Self { state: StubState::default(), posts: Mutex::new(Vec::new()) })
    }

    pub fn settle(&self, outcome: Result<()>) {
        self.state.signal.settle(outcome);
    }

    pub fn completes(&self) -> usize {
        self.state.completes.load(Ordering::SeqCst)
    }

    pub fn faults(&self) -> usize {
        self.state.faults.load(Ordering::SeqCst)
    }

    pub fn posts(&self) -> Vec<T>
    where
        T: Clone,
    {
        self.posts.lock().clone()
    }
}

impl<T: Send + 'static> Block for StubTarget<T> {
    stub_block_impl!();
}

#[async_trait]
impl<T: Send + 'static> Target<T> for StubTarget<T> {
    async fn post(&self, item: T) -> Result<()> {
        self.posts.lock().push(item);
        Ok(())
    }
}
