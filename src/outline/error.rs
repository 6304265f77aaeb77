// Error taxonomy for the outline panel pair
//
// Everything here stays local to the view/controller pair: programmer
// errors (disposed view, double attach) are fatal in debug builds and
// logged in release; malformed models are recovered by rendering a
// diagnostic placeholder and reporting upstream. Nothing escapes to the
// host as an unhandled fault.

use thiserror::Error;

use crate::outline::model::SourceId;

/// A structural invariant violated by a delivered snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ModelDefect {
    /// The first node of the document-order sequence is not a root.
    #[error("first node {label:?} has depth {depth}, expected a root at depth 0")]
    LeadingDepth { label: String, depth: usize },

    /// A node is nested more than one level below its predecessor, so its
    /// depth cannot be parent depth + 1 for any parent.
    #[error("node {index} ({label:?}) jumps from depth {previous} to depth {depth}")]
    DepthJump {
        index: usize,
        label: String,
        previous: usize,
        depth: usize,
    },
}

/// Errors raised by the outline view/controller pair.
#[derive(Debug, Error)]
pub enum PanelError {
    /// Operation on a view after `teardown`. Programmer error.
    #[error("operation on a torn-down outline view")]
    DisposedView,

    /// `attach` called on a controller that already went through attach.
    /// Programmer error.
    #[error("outline controller is already attached")]
    AlreadyAttached,

    /// A delivered snapshot violated the structure invariants. Recovered
    /// locally; carried here so the defect can be reported upstream.
    #[error("malformed structure model for {source_id}: {defect}")]
    MalformedModel {
        source_id: SourceId,
        #[source]
        defect: ModelDefect,
    },
}
