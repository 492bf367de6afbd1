//! N:1 source aggregation.
//!
//! When several sources feed one consumer, per-edge completion propagation
//! lets the first source to finish complete the consumer while its siblings
//! still hold queued messages, silently dropping them. The fan-in composite
//! keeps the edges pure message paths and reinstates propagation as a
//! conjunction over the whole source set: the consumer is driven only once
//! every source has reached a terminal state.

use crate::composite::{conjoin, Composite, CompositeParts};
use crate::edge::EdgeComposite;
use crate::link::{connect, LinkConfig};
use crate::source::SourceComposite;
use std::sync::Arc;
use weir_core::block::{Block, CompletionFuture, DynBlock, DynPropagator, DynSource};
use weir_core::error::{Error, Result};

/// N independently-completing blocks exposed as one: shutdown signals
/// broadcast to every member and completion is the conjunction of all of
/// them.
pub struct FanInComposite {
    members: Vec<DynBlock>,
}

impl FanInComposite {
    pub fn new(members: Vec<DynBlock>) -> Result<Self> {
        if members.is_empty() {
            return Err(Error::MissingEndpoint("sources"));
        }
        Ok(Self { members })
    }
}

impl Block for FanInComposite {
    fn complete(&self) {
        // every member must individually agree to stop producing
        for member in &self.members {
            member.complete();
        }
    }

    fn fault(&self, error: Error) {
        for member in &self.members {
            member.fault(error.clone());
        }
    }

    fn completion(&self) -> CompletionFuture {
        conjoin(self.members.iter().map(|member| member.completion()).collect())
    }
}

impl Composite for FanInComposite {
    fn parts(&self) -> CompositeParts {
        CompositeParts {
            heads: self.members.clone(),
            frontier: self.members.clone(),
            tail: self.members.clone(),
        }
    }
}

fn union_of<T: Send + 'static>(sources: &[DynSource<T>]) -> Result<Arc<FanInComposite>> {
    let members = sources.iter().map(|source| -> DynBlock { source.clone() }).collect();
    Ok(Arc::new(FanInComposite::new(members)?))
}

/// Links every source to the configured target and wraps the union as one
/// logical block whose frontier is the whole source set.
pub fn merge<T: Send + 'static>(sources: Vec<DynSource<T>>, config: LinkConfig<T>) -> Result<EdgeComposite> {
    let tail: DynBlock = config.target.clone().ok_or(Error::MissingEndpoint("target"))?;
    let (config, mode) = config.disarmed();
    let union = union_of(&sources)?;
    for source in &sources {
        connect(source, config.clone())?;
    }
    let head: DynBlock = union;
    Ok(EdgeComposite::new(head.clone(), head, tail, mode))
}

/// Links every source into a propagator and keeps the merged flow linkable:
/// the union is the head and the frontier, the propagator the outward
/// source identity.
pub fn merge_through<I: Send + 'static, O: Send + 'static>(
    sources: Vec<DynSource<I>>,
    through: DynPropagator<I, O>,
    config: LinkConfig<I>,
) -> Result<SourceComposite<O>> {
    let (mut config, mode) = config.disarmed();
    config.target = Some(through.clone());
    let union = union_of(&sources)?;
    for source in &sources {
        connect(source, config.clone())?;
    }
    let head: DynBlock = union;
    Ok(SourceComposite::new(head.clone(), head, through, mode))
}
