// Events that flow between the workspace host, the outline controller,
// and the analysis collaborator
//
// Two directions, two enums: EditorEvent travels down from the editing
// session (file lifecycle plus finished analysis), WorkspaceRequest
// travels back up from the panel (navigation, fault reports). Both cross
// task boundaries over mpsc channels, so pattern matching keeps the
// hand-offs type-safe.

use crate::outline::model::{SourceId, SourceOffset, StructureModel};

/// What happened to a file in the editing session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileEventKind {
    Opened,
    Edited,
    Closed,
}

impl FileEventKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            FileEventKind::Opened => "opened",
            FileEventKind::Edited => "edited",
            FileEventKind::Closed => "closed",
        }
    }
}

/// Events delivered to the workspace host's event loop.
#[derive(Debug, Clone)]
pub enum EditorEvent {
    /// A file lifecycle change: opened, edited, or closed.
    File {
        source: SourceId,
        kind: FileEventKind,
    },

    /// The analysis collaborator finished a snapshot. Deliveries may race;
    /// the controller's staleness guard sorts out-of-order arrivals out.
    StructureReady { model: StructureModel },
}

/// Requests the outline panel sends back to the workspace.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WorkspaceRequest {
    /// Move the editor caret to `offset` within `source`.
    Navigate {
        source: SourceId,
        offset: SourceOffset,
    },

    /// A delivered structure model was malformed; the panel degraded to a
    /// placeholder and reports the defect here.
    OutlineFault { source: SourceId, message: String },
}
