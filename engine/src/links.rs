//! Link registry shared by the engine's producing blocks.

use parking_lot::Mutex;
use tokio::sync::Notify;
use weir_core::error::Result;
use weir_core::link::Link;

/// Outgoing edges of a block, in registration order.
pub struct LinkSet<T> {
    links: Mutex<Vec<Link<T>>>,
    changed: Notify,
}

impl<T: Send + 'static> LinkSet<T> {
    pub fn new() -> Self {
        Self { links: Mutex::new(Vec::new()), changed: Notify::new() }
    }

    pub fn attach(&self, link: Link<T>) {
        self.links.lock().push(link);
        self.changed.notify_waiters();
    }

    pub fn is_empty(&self) -> bool {
        self.links.lock().is_empty()
    }

    fn snapshot(&self) -> Vec<Link<T>> {
        self.links.lock().clone()
    }

    /// Offers one message to the links in order; the first link whose
    /// predicate accepts the message consumes it. A message declined by every
    /// predicate goes to the first declined route found among the links and
    /// is otherwise dropped. With no links registered yet, waits until one is
    /// attached, so messages posted ahead of wiring are not lost.
    pub async fn deliver(&self, item: T) {
        let links = loop {
            let links = self.snapshot();
            if !links.is_empty() {
                break links;
            }
            // enable the waiter before re-checking, otherwise an attach
            // landing in between is never observed
            let mut attached = std::pin::pin!(self.changed.notified());
            attached.as_mut().enable();
            if !self.is_empty() {
                continue;
            }
            attached.await;
        };
        for link in &links {
            if link.accepts(&item) {
                let _ = link.target.post(item).await;
                return;
            }
        }
        for link in &links {
            if let Some(declined) = &link.declined_target {
                let _ = declined.post(item).await;
                return;
            }
            if let Some(handler) = &link.declined_handler {
                handler(item);
                return;
            }
        }
    }

    /// Replicates one message to every link whose predicate accepts it. With
    /// no links registered the message is dropped, matching broadcast
    /// semantics where unobserved values are not retained.
    pub async fn replicate(&self, item: T)
    where
        T: Clone,
    {
        for link in &self.snapshot() {
            if link.accepts(&item) {
                let _ = link.target.post(item.clone()).await;
            }
        }
    }

    /// Cascades the block's terminal outcome over every edge that carries
    /// completion propagation.
    pub fn propagate(&self, outcome: &Result<()>) {
        for link in &self.snapshot() {
            link.cascade(outcome);
        }
    }
}

impl<T: Send + 'static> Default for LinkSet<T> {
    fn default() -> Self {
        Self::new()
    }
}
