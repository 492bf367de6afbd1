//! Edge description shared by the engine and the composition layer.

use crate::block::DynTarget;
use crate::error::Result;
use crate::options::LinkOptions;
use std::sync::Arc;

pub type Predicate<T> = Arc<dyn Fn(&T) -> bool + Send + Sync>;
pub type DeclinedHandler<T> = Arc<dyn Fn(T) + Send + Sync>;

/// One wired edge: the consuming target plus the optional filtering and
/// declined-item routing, with the per-edge options.
pub struct Link<T> {
    pub target: DynTarget<T>,
    pub predicate: Option<Predicate<T>>,
    pub declined_target: Option<DynTarget<T>>,
    pub declined_handler: Option<DeclinedHandler<T>>,
    pub options: LinkOptions,
}

impl<T> Link<T> {
    pub fn new(target: DynTarget<T>, options: LinkOptions) -> Self {
        Self { target, predicate: None, declined_target: None, declined_handler: None, options }
    }

    pub fn accepts(&self, item: &T) -> bool {
        self.predicate.as_ref().is_none_or(|keep| keep(item))
    }

    /// Drives the target with the source's terminal outcome when this edge
    /// carries completion propagation.
    pub fn cascade(&self, outcome: &Result<()>) {
        if !self.options.propagate_completion {
            return;
        }
        match outcome {
            Ok(()) => self.target.complete(),
            Err(e) => self.target.fault(e.clone()),
        }
    }
}

impl<T> Clone for Link<T> {
    fn clone(&self) -> Self {
        Self {
            target: self.target.clone(),
            predicate: self.predicate.clone(),
            declined_target: self.declined_target.clone(),
            declined_handler: self.declined_handler.clone(),
            options: self.options,
        }
    }
}
