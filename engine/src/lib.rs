//! Primitive message-passing blocks: buffering, transforming, consuming and
//! broadcasting units that execute on the tokio runtime. Each block runs one
//! detached worker task which drains the intake queue, hands messages to the
//! registered links, settles the block's completion signal and finally
//! cascades the terminal state over every completion-propagating edge.
//!
//! Blocks must be constructed within a tokio runtime.

pub mod action;
pub mod broadcast;
pub mod buffer;
pub mod links;
pub mod transform;
