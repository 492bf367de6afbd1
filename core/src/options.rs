//! Block and link options. Every value is passed explicitly where a block or
//! an edge is created; the `Default` impls document the defaults and there is
//! no process-wide option state.

/// Buffering capacity of a primitive block.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Capacity {
    #[default]
    Unbounded,
    /// Rounded up to one when zero is requested.
    Bounded(usize),
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct BlockOptions {
    pub capacity: Capacity,
}

impl BlockOptions {
    pub fn bounded(capacity: usize) -> Self {
        Self { capacity: Capacity::Bounded(capacity) }
    }
}

/// Options of a single message edge.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LinkOptions {
    /// Cascade the source's terminal state into the target once the source
    /// settles. On by default, which is correct for a single-edge pipeline
    /// where the edge is the only completion path into the target.
    pub propagate_completion: bool,
}

impl LinkOptions {
    pub fn detached() -> Self {
        Self { propagate_completion: false }
    }
}

impl Default for LinkOptions {
    fn default() -> Self {
        Self { propagate_completion: true }
    }
}

/// How a composite treats completion of its frontier.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Propagation {
    /// Defer to the edge's own `propagate_completion` option.
    #[default]
    Inherit,
    /// The composite itself drives the tail once the frontier settles.
    Enabled,
    /// The tail's completion is independent and exposed as-is.
    Disabled,
}

impl Propagation {
    /// The mode a wrapper takes over an edge whose own propagation was
    /// disarmed on the caller's behalf.
    pub fn reinstated(options: LinkOptions) -> Self {
        if options.propagate_completion { Propagation::Enabled } else { Propagation::Disabled }
    }
}
