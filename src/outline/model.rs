// Structure snapshot types delivered by the analysis collaborator
//
// A StructureModel is one immutable snapshot of a source file's symbol
// outline: an identity, a revision counter, and the symbols in document
// order. The analysis side constructs these; the panel only reads them.

use std::fmt;

use crate::outline::error::ModelDefect;

/// Opaque identity of a source file (usually a workspace-relative path).
///
/// The panel never interprets the contents; it only passes the identity
/// back to the workspace on navigation and error reports.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SourceId(String);

impl SourceId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SourceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for SourceId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

/// Byte offset into a source file, used for navigation callbacks.
///
/// The panel forwards offsets unchanged; only the workspace knows how to
/// turn one into a caret position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SourceOffset(pub u64);

impl fmt::Display for SourceOffset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Kind of a symbol in the outline. The set is owned by the analysis
/// collaborator; the panel treats it as opaque metadata.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SymbolKind {
    Namespace,
    Type,
    Function,
    Member,
    Constant,
}

/// One entry in a structure outline.
///
/// Nodes are stored flat, in document order (pre-order traversal of the
/// symbol tree); the tree shape is carried by `depth`. Roots have depth 0
/// and a child sits exactly one level below its parent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StructureNode {
    /// Text shown for this entry, exactly as the analysis produced it.
    pub label: String,
    pub kind: SymbolKind,
    /// Nesting level; 0 for roots.
    pub depth: usize,
    /// Where this symbol starts in the source, for navigation.
    pub offset: SourceOffset,
}

impl StructureNode {
    pub fn new(
        label: impl Into<String>,
        kind: SymbolKind,
        depth: usize,
        offset: u64,
    ) -> Self {
        Self {
            label: label.into(),
            kind,
            depth,
            offset: SourceOffset(offset),
        }
    }
}

/// One immutable snapshot of a file's outline.
///
/// Revisions are strictly increasing per source: every re-analysis after
/// an edit yields a snapshot with a greater revision than any previously
/// delivered for that file. The panel relies on this for its staleness
/// guard and never mutates a snapshot.
#[derive(Debug, Clone)]
pub struct StructureModel {
    source: SourceId,
    revision: u64,
    nodes: Vec<StructureNode>,
}

impl StructureModel {
    pub fn new(source: impl Into<SourceId>, revision: u64, nodes: Vec<StructureNode>) -> Self {
        Self {
            source: source.into(),
            revision,
            nodes,
        }
    }

    pub fn source(&self) -> &SourceId {
        &self.source
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Nodes in document order. Never re-sorted.
    pub fn nodes(&self) -> &[StructureNode] {
        &self.nodes
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Checks the depth invariant over the flat document-order sequence:
    /// the first node must be a root, and no node may be nested more than
    /// one level below its predecessor (a deeper jump means a child whose
    /// depth is not parent depth + 1).
    pub fn validate(&self) -> Result<(), ModelDefect> {
        let mut previous: Option<usize> = None;
        for (index, node) in self.nodes.iter().enumerate() {
            match previous {
                None => {
                    if node.depth != 0 {
                        return Err(ModelDefect::LeadingDepth {
                            label: node.label.clone(),
                            depth: node.depth,
                        });
                    }
                }
                Some(prev) => {
                    if node.depth > prev + 1 {
                        return Err(ModelDefect::DepthJump {
                            index,
                            label: node.label.clone(),
                            previous: prev,
                            depth: node.depth,
                        });
                    }
                }
            }
            previous = Some(node.depth);
        }
        Ok(())
    }
}

impl From<String> for SourceId {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn node(label: &str, depth: usize) -> StructureNode {
        StructureNode::new(label, SymbolKind::Type, depth, 0)
    }

    #[test]
    fn test_empty_model_is_valid() {
        let model = StructureModel::new("a.rs", 1, vec![]);
        assert!(model.validate().is_ok());
        assert!(model.is_empty());
    }

    #[test]
    fn test_well_formed_tree_is_valid() {
        let model = StructureModel::new(
            "a.rs",
            1,
            vec![
                node("Foo", 0),
                node("bar", 1),
                node("baz", 1),
                node("qux", 2),
                node("Other", 0),
            ],
        );
        assert!(model.validate().is_ok());
    }

    #[test]
    fn test_root_with_nonzero_depth_is_rejected() {
        let model = StructureModel::new("a.rs", 1, vec![node("orphan", 1)]);
        assert!(matches!(
            model.validate(),
            Err(ModelDefect::LeadingDepth { depth: 1, .. })
        ));
    }

    #[test]
    fn test_depth_jump_is_rejected() {
        let model = StructureModel::new(
            "a.rs",
            1,
            vec![node("Foo", 0), node("deep", 2)],
        );
        match model.validate() {
            Err(ModelDefect::DepthJump {
                index,
                previous,
                depth,
                ..
            }) => {
                assert_eq!(index, 1);
                assert_eq!(previous, 0);
                assert_eq!(depth, 2);
            }
            other => panic!("expected depth jump, got {:?}", other),
        }
    }

    #[test]
    fn test_dedent_is_allowed() {
        // Coming back up any number of levels is legal pre-order shape.
        let model = StructureModel::new(
            "a.rs",
            1,
            vec![node("A", 0), node("b", 1), node("c", 2), node("D", 0)],
        );
        assert!(model.validate().is_ok());
    }

    #[test]
    fn test_nodes_keep_document_order() {
        let model = StructureModel::new(
            "a.rs",
            3,
            vec![node("zeta", 0), node("alpha", 0)],
        );
        let labels: Vec<_> = model.nodes().iter().map(|n| n.label.as_str()).collect();
        assert_eq!(labels, vec!["zeta", "alpha"]);
    }
}
