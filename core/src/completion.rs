//! One-shot terminal-state signaling.

use crate::block::CompletionFuture;
use crate::error::Result;
use parking_lot::Mutex;
use std::sync::Arc;
use triggered::{trigger, Listener, Trigger};

/// Terminal state of a block: settled exactly once, observed any number of
/// times. The first `settle` wins and later calls are no-ops, which is what
/// makes `complete`/`fault` idempotent for every block built on top.
#[derive(Clone, Debug)]
pub struct CompletionSignal {
    inner: Arc<Inner>,
}

#[derive(Debug)]
struct Inner {
    trigger: Trigger,
    listener: Listener,
    outcome: Mutex<Option<Result<()>>>,
}

impl CompletionSignal {
    pub fn new() -> Self {
        let (trigger, listener) = trigger();
        Self { inner: Arc::new(Inner { trigger, listener, outcome: Mutex::new(None) }) }
    }

    /// Records the terminal outcome. Returns false when the signal was
    /// already settled.
    pub fn settle(&self, outcome: Result<()>) -> bool {
        {
            let mut guard = self.inner.outcome.lock();
            if guard.is_some() {
                return false;
            }
            *guard = Some(outcome);
        }
        self.inner.trigger.trigger();
        true
    }

    pub fn is_settled(&self) -> bool {
        self.inner.outcome.lock().is_some()
    }

    /// The recorded outcome, if any.
    pub fn outcome(&self) -> Option<Result<()>> {
        self.inner.outcome.lock().clone()
    }

    /// A listener firing once the signal settles. Lets a worker notice a
    /// fault injected from outside its own loop.
    pub fn listener(&self) -> Listener {
        self.inner.listener.clone()
    }

    /// The terminal state as a future.
    pub fn future(&self) -> CompletionFuture {
        let inner = self.inner.clone();
        Box::pin(async move {
            inner.listener.clone().await;
            // the outcome slot is written before the trigger fires
            inner.outcome.lock().clone().unwrap_or(Ok(()))
        })
    }
}

impl Default for CompletionSignal {
    fn default() -> Self {
        Self::new()
    }
}
