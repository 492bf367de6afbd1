//! Link coordination: one message edge between a source and a target.

use log::trace;
use weir_core::block::{DynSource, DynTarget};
use weir_core::error::{Error, Result};
use weir_core::link::{DeclinedHandler, Link, Predicate};
use weir_core::options::{LinkOptions, Propagation};

/// Configuration of one edge: the target plus the optional filtering and
/// declined-item routing, with the edge options. One value with named
/// optional fields replaces a combinatorial set of linking overloads.
pub struct LinkConfig<T> {
    pub target: Option<DynTarget<T>>,
    pub predicate: Option<Predicate<T>>,
    pub declined_target: Option<DynTarget<T>>,
    pub declined_handler: Option<DeclinedHandler<T>>,
    pub options: LinkOptions,
}

impl<T> LinkConfig<T> {
    pub fn to(target: DynTarget<T>) -> Self {
        Self { target: Some(target), ..Default::default() }
    }

    /// Same edge with its completion propagation turned off, plus the mode
    /// the wrapper takes over. Used by the aggregating composites, which
    /// must keep their edges pure message paths and own the cascade
    /// themselves.
    pub(crate) fn disarmed(self) -> (Self, Propagation) {
        let reinstated = Propagation::reinstated(self.options);
        (Self { options: LinkOptions::detached(), ..self }, reinstated)
    }

    pub(crate) fn into_link(self) -> Result<Link<T>> {
        let target = self.target.ok_or(Error::MissingEndpoint("target"))?;
        Ok(Link {
            target,
            predicate: self.predicate,
            declined_target: self.declined_target,
            declined_handler: self.declined_handler,
            options: self.options,
        })
    }
}

impl<T> Default for LinkConfig<T> {
    fn default() -> Self {
        Self {
            target: None,
            predicate: None,
            declined_target: None,
            declined_handler: None,
            options: LinkOptions::default(),
        }
    }
}

impl<T> Clone for LinkConfig<T> {
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

/// Establishes the edge described by `config`. Fails synchronously when the
/// target reference is absent; everything else is delegated to the source's
/// own link registry.
pub fn connect<T: Send + 'static>(source: &DynSource<T>, config: LinkConfig<T>) -> Result<()> {
    let link = config.into_link()?;
    source.attach(link);
    trace!("edge established");
    Ok(())
}
