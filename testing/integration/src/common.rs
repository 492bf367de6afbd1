//! Shared fixtures.

use parking_lot::Mutex;
use std::sync::Arc;
use weir_core::block::{DynSource, DynTarget, Target};
use weir_core::options::BlockOptions;
use weir_engine::action::ActionBlock;
use weir_engine::buffer::BufferBlock;

/// A consumer recording every accepted message.
pub struct Recorder<T> {
    seen: Arc<Mutex<Vec<T>>>,
    block: Arc<ActionBlock<T>>,
}

impl<T: Send + 'static> Recorder<T> {
    pub fn new() -> Self {
        let seen: Arc<Mutex<Vec<T>>> = Arc::new(Mutex::new(Vec::new()));
        let block = {
            let seen = seen.clone();
            Arc::new(ActionBlock::new(BlockOptions::default(), move |item: T| {
                seen.lock().push(item);
                Ok(())
            }))
        };
        Self { seen, block }
    }

    pub fn target(&self) -> DynTarget<T> {
        self.block.clone()
    }

    pub fn block(&self) -> Arc<ActionBlock<T>> {
        self.block.clone()
    }

    pub fn seen(&self) -> Vec<T>
    where
        T: Clone,
    {
        self.seen.lock().clone()
    }

    pub fn count(&self) -> usize {
        self.seen.lock().len()
    }
}

impl<T: Send + 'static> Default for Recorder<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// An unbounded buffering source pre-loaded with the given items.
pub async fn feed_source<T: Send + 'static>(items: Vec<T>) -> (Arc<BufferBlock<T>>, DynSource<T>) {
    let buffer = Arc::new(BufferBlock::new(BlockOptions::default()));
    for item in items {
        buffer.post(item).await.expect("feeding a fresh source");
    }
    let source: DynSource<T> = buffer.clone();
    (buffer, source)
}

/// Items `prefix-0 .. prefix-(n-1)`.
pub fn labeled(prefix: &str, n: usize) -> Vec<String> {
    (0..n).map(|i| format!("{prefix}-{i}")).collect()
}

/// The `prefix` items in arrival order, for per-source order checks.
pub fn emitted_by(seen: &[String], prefix: &str) -> Vec<String> {
    seen.iter().filter(|item| item.starts_with(prefix)).cloned().collect()
}
