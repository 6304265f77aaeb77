// Outline core - the structure display contract
//
// Everything the panel pair needs: the snapshot model delivered by the
// analysis side, the pure formatting that turns a snapshot into display
// text, the error taxonomy, and the controller that wires the pieces to
// the workspace. The panel surface itself lives with the other TUI
// components in `tui::components::outline_panel`.

pub mod controller;
pub mod error;
pub mod format;
pub mod model;

pub use controller::{OutlineController, Phase, StructureProvider};
pub use error::{ModelDefect, PanelError};
pub use model::{SourceId, SourceOffset, StructureModel, StructureNode, SymbolKind};
