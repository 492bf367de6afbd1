//! The block capability contract: the minimal surface every composed unit
//! exposes, whether it is an engine primitive or a composite of many blocks.
//! Composites re-expose the same surface, so any composite can itself be the
//! head, frontier or tail of a further composition.

use crate::error::{Error, Result};
use crate::link::Link;
use async_trait::async_trait;
use futures_util::future::BoxFuture;
use std::sync::Arc;

/// Future of a block's terminal state.
pub type CompletionFuture = BoxFuture<'static, Result<()>>;

pub trait Block: Send + Sync {
    /// Signals that no further messages will be offered. Idempotent.
    fn complete(&self);

    /// Signals abortive shutdown carrying the given error. Idempotent; the
    /// first terminal transition wins.
    fn fault(&self, error: Error);

    /// The block's terminal state. May be called any number of times; every
    /// returned future resolves to the same outcome.
    fn completion(&self) -> CompletionFuture;
}

pub type DynBlock = Arc<dyn Block>;

/// A block producing messages of type `T`.
pub trait Source<T: Send + 'static>: Block {
    /// Registers an outgoing edge. A buffering source offers each message to
    /// its links in registration order; a broadcasting source replicates to
    /// every link. Messages are handed to the link targets before the source
    /// settles its own completion.
    fn attach(&self, link: Link<T>);
}

pub type DynSource<T> = Arc<dyn Source<T>>;

/// A block accepting messages of type `T`.
#[async_trait]
pub trait Target<T: Send + 'static>: Block {
    /// Offers one message, waiting for buffer space when the target is
    /// bounded. Fails once the target has stopped accepting.
    async fn post(&self, item: T) -> Result<()>;
}

pub type DynTarget<T> = Arc<dyn Target<T>>;

/// A block that is both a target for `I` and a source of `O`.
pub trait Propagator<I: Send + 'static, O: Send + 'static>: Target<I> + Source<O> {}

impl<I: Send + 'static, O: Send + 'static, B: Target<I> + Source<O>> Propagator<I, O> for B {}

pub type DynPropagator<I, O> = Arc<dyn Propagator<I, O>>;
