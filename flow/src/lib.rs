//! Completion-propagation composition layer.
//!
//! A link's own completion propagation is only correct for a single
//! upstream/single downstream edge. The composites in this crate make N:1
//! and 1:M topologies shut down correctly: edges are kept as pure message
//! paths where necessary and completion is reinstated as an aggregate owned
//! by the wrapper, so no block is completed while a sibling still holds
//! undelivered messages.
//!
//! Every composite re-exposes the block capability contract and can itself
//! be the head, frontier or tail of a further composition.

pub mod broadcast;
pub mod composite;
pub mod edge;
pub mod fan_in;
pub mod link;
pub mod propagator;
pub mod source;
pub mod target;

#[cfg(test)]
pub(crate) mod mock;
