// Outline formatting - turns a StructureModel into the text blob the view
// displays
//
// One node becomes exactly one line: a fixed-width indent per depth level
// followed by the label, in document order. No wrapping, no re-sorting.
// Formatting is pure, so the same snapshot always yields identical text.

use crate::outline::model::{SourceOffset, StructureModel};

/// Shown when a file was analysed and genuinely has no symbols. Distinct
/// from the view's initial empty state (an empty string).
pub const NO_STRUCTURE_PLACEHOLDER: &str = "(no structure)";

/// Shown instead of a snapshot that failed validation. The raw model is
/// never rendered.
pub const MALFORMED_PLACEHOLDER: &str = "(outline unavailable: malformed structure data)";

/// Default indent unit, overridable via config.
pub const DEFAULT_INDENT_WIDTH: usize = 2;

/// Renders the outline text for a validated snapshot.
///
/// Depth-first document order is already the order of `model.nodes()`;
/// this only prefixes each label with `depth * indent_width` spaces.
pub fn render_text(model: &StructureModel, indent_width: usize) -> String {
    if model.is_empty() {
        return NO_STRUCTURE_PLACEHOLDER.to_string();
    }

    let mut out = String::new();
    for (i, node) in model.nodes().iter().enumerate() {
        if i > 0 {
            out.push('\n');
        }
        for _ in 0..node.depth * indent_width {
            out.push(' ');
        }
        out.push_str(&node.label);
    }
    out
}

/// Builds the row -> source offset table matching `render_text` line for
/// line. The controller keeps this beyond the render so clicks on the
/// display can be resolved to navigation targets.
pub fn navigation_index(model: &StructureModel) -> Vec<SourceOffset> {
    model.nodes().iter().map(|n| n.offset).collect()
}
