// Outline controller - policy between the workspace and the display
//
// Owns the outline panel and decides when to refresh it, how a snapshot
// becomes display text, and where interaction goes. The workspace holds
// no reference to the panel; it talks to this controller, and the
// controller talks back through a channel handle recorded at attach.
//
// Everything here runs on the UI event thread and returns quickly; the
// expensive analysis happens elsewhere and arrives as `on_file_changed`
// deliveries, in whatever order the collaborator manages. The per-file
// revision watermarks below make the effective render order monotonic
// regardless.

use std::collections::HashMap;

use tokio::sync::mpsc;

use crate::events::{FileEventKind, WorkspaceRequest};
use crate::outline::error::PanelError;
use crate::outline::format::{self, MALFORMED_PLACEHOLDER};
use crate::outline::model::{SourceId, SourceOffset, StructureModel};
use crate::tui::components::outline_panel::OutlinePanel;
use crate::tui::traits::{Handled, Interactive};
use crossterm::event::KeyEvent;

/// Hand-off to the analysis collaborator: ask for a fresh snapshot of a
/// source. Fire-and-forget; results come back through the event loop as
/// `on_file_changed` deliveries.
pub trait StructureProvider {
    fn request_structure(&self, source: &SourceId);
}

/// Lifecycle of the controller. `Attached` splits further into "no model
/// yet" and "has model" through `displayed()`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Unattached,
    Attached,
    Detached,
}

impl Phase {
    pub fn as_str(&self) -> &'static str {
        match self {
            Phase::Unattached => "unattached",
            Phase::Attached => "attached",
            Phase::Detached => "detached",
        }
    }
}

/// Counters surfaced in the status bar.
#[derive(Debug, Clone, Copy, Default)]
pub struct PanelStats {
    /// Accepted snapshots that reached the display
    pub rendered: u64,
    /// Deliveries dropped by the staleness guard
    pub stale_dropped: u64,
    /// Deliveries that failed validation
    pub malformed: u64,
}

/// What the panel is currently showing, kept only as far as navigation
/// needs it: the source identity and the row -> offset table of the last
/// accepted render. The snapshot itself is dropped after formatting.
struct Displayed {
    source: SourceId,
    revision: u64,
    nav: Vec<SourceOffset>,
}

/// Mediates between the workspace host and the outline panel.
pub struct OutlineController {
    phase: Phase,
    view: OutlinePanel,
    provider: Box<dyn StructureProvider>,
    workspace: Option<mpsc::UnboundedSender<WorkspaceRequest>>,

    // The panel's interaction listener feeds this queue; it drains on the
    // same call stack right after input dispatch.
    interaction_tx: mpsc::UnboundedSender<usize>,
    interaction_rx: mpsc::UnboundedReceiver<usize>,

    indent_width: usize,
    current: Option<Displayed>,
    /// Last rendered revision per source, for the staleness guard.
    watermarks: HashMap<SourceId, u64>,
    stats: PanelStats,
}

impl OutlineController {
    /// Creates the controller together with its owned panel. The pair is
    /// torn down together via `detach`.
    pub fn new(provider: Box<dyn StructureProvider>, indent_width: usize) -> Self {
        let (interaction_tx, interaction_rx) = mpsc::unbounded_channel();
        Self {
            phase: Phase::Unattached,
            view: OutlinePanel::new(),
            provider,
            workspace: None,
            interaction_tx,
            interaction_rx,
            indent_width,
            current: None,
            watermarks: HashMap::new(),
            stats: PanelStats::default(),
        }
    }

    /// Records the workspace back-reference and registers the panel's
    /// interaction listener. Must be called before any other operation;
    /// a second call fails.
    pub fn attach(
        &mut self,
        workspace: mpsc::UnboundedSender<WorkspaceRequest>,
    ) -> Result<(), PanelError> {
        if self.phase != Phase::Unattached {
            return Err(PanelError::AlreadyAttached);
        }

        self.workspace = Some(workspace);
        let tx = self.interaction_tx.clone();
        self.view
            .on_interaction(Box::new(move |row| {
                let _ = tx.send(row);
            }));
        self.phase = Phase::Attached;
        tracing::debug!("Outline controller attached");
        Ok(())
    }

    /// A file lifecycle notification from the workspace.
    pub fn on_file_event(&mut self, source: &SourceId, kind: FileEventKind) {
        if !self.guard_attached("file event") {
            return;
        }

        tracing::debug!("File {}: {}", kind.as_str(), source);
        match kind {
            FileEventKind::Opened => {
                // Never leave another file's outline on display while the
                // new analysis is in flight.
                if self.current.as_ref().is_some_and(|c| &c.source != source) {
                    self.clear_display();
                }
                self.provider.request_structure(source);
            }
            FileEventKind::Edited => {
                self.provider.request_structure(source);
            }
            FileEventKind::Closed => {
                self.watermarks.remove(source);
                if self.current.as_ref().is_some_and(|c| &c.source == source) {
                    self.clear_display();
                }
            }
        }
    }

    /// A fresh snapshot from the analysis collaborator.
    ///
    /// Stale deliveries (revision not greater than the last rendered one
    /// for that source) are dropped silently; malformed snapshots degrade
    /// to a diagnostic placeholder plus one upstream fault report. After
    /// `detach` this is a no-op, never an error.
    pub fn on_file_changed(&mut self, model: StructureModel) {
        if !self.guard_attached("structure delivery") {
            return;
        }

        let source = model.source().clone();
        let revision = model.revision();

        if let Some(&last) = self.watermarks.get(&source) {
            if revision <= last {
                self.stats.stale_dropped += 1;
                tracing::debug!(
                    "Dropping stale outline for {} (revision {} <= {})",
                    source,
                    revision,
                    last
                );
                return;
            }
        }

        if let Err(defect) = model.validate() {
            self.stats.malformed += 1;
            let error = PanelError::MalformedModel {
                source_id: source.clone(),
                defect,
            };
            tracing::warn!("{}", error);
            self.push_to_view(revision, MALFORMED_PLACEHOLDER.to_string());
            self.watermarks.insert(source.clone(), revision);
            self.current = None;
            self.report_fault(source, error.to_string());
            return;
        }

        let text = format::render_text(&model, self.indent_width);
        let nav = format::navigation_index(&model);
        self.push_to_view(revision, text);
        self.watermarks.insert(source.clone(), revision);
        self.current = Some(Displayed {
            source,
            revision,
            nav,
        });
        self.stats.rendered += 1;
        // The snapshot is consumed here; only the navigation table and
        // the revision watermark survive the render.
    }

    /// A line selection surfaced by the panel. Resolves the row through
    /// the navigation table of the last accepted render and forwards the
    /// source identity and offset unchanged. No model loaded means no-op.
    pub fn on_interaction(&mut self, row: usize) {
        if self.phase != Phase::Attached {
            return;
        }
        let Some(current) = &self.current else {
            return;
        };
        let Some(&offset) = current.nav.get(row) else {
            return;
        };

        tracing::debug!(
            "Navigate to {} @ {} (row {})",
            current.source,
            offset,
            row
        );
        if let Some(workspace) = &self.workspace {
            let _ = workspace.send(WorkspaceRequest::Navigate {
                source: current.source.clone(),
                offset,
            });
        }
    }

    /// Unregisters from the workspace and tears down the owned panel.
    /// Idempotent; reachable from any state.
    pub fn detach(&mut self) {
        if self.phase == Phase::Detached {
            return;
        }
        self.phase = Phase::Detached;
        self.workspace = None;
        self.current = None;
        self.watermarks.clear();
        self.view.teardown();
        tracing::debug!("Outline controller detached");
    }

    /// Forward a key event to the panel, then route any selection it
    /// produced.
    pub fn handle_key(&mut self, key: KeyEvent) -> Handled {
        if self.phase != Phase::Attached {
            return Handled::No;
        }
        let handled = self.view.handle_key(key);
        self.pump_interactions();
        handled
    }

    /// A click at the given viewport row of the panel's content area.
    pub fn click(&mut self, viewport_row: usize) {
        if self.phase != Phase::Attached {
            return;
        }
        self.view.click_row(viewport_row);
        self.pump_interactions();
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn stats(&self) -> PanelStats {
        self.stats
    }

    /// Source identity and revision currently on display, if a snapshot
    /// has been accepted.
    pub fn displayed(&self) -> Option<(&SourceId, u64)> {
        self.current.as_ref().map(|c| (&c.source, c.revision))
    }

    pub fn view(&self) -> &OutlinePanel {
        &self.view
    }

    pub fn view_mut(&mut self) -> &mut OutlinePanel {
        &mut self.view
    }

    fn pump_interactions(&mut self) {
        while let Ok(row) = self.interaction_rx.try_recv() {
            self.on_interaction(row);
        }
    }

    fn clear_display(&mut self) {
        self.push_to_view(0, String::new());
        self.current = None;
    }

    fn push_to_view(&mut self, revision: u64, text: String) {
        if let Err(err) = self.view.render(revision, text) {
            // Unreachable while attached: the panel is only torn down by
            // detach. Fatal in debug, logged in release.
            debug_assert!(false, "render on live controller failed: {err}");
            tracing::error!("Outline render failed: {}", err);
        }
    }

    fn report_fault(&mut self, source: SourceId, message: String) {
        if let Some(workspace) = &self.workspace {
            let _ = workspace.send(WorkspaceRequest::OutlineFault { source, message });
        }
    }

    fn guard_attached(&self, what: &str) -> bool {
        match self.phase {
            Phase::Attached => true,
            Phase::Detached => {
                // Background analysis may legitimately finish after the
                // panel went away.
                tracing::debug!("Ignoring {} after detach", what);
                false
            }
            Phase::Unattached => {
                debug_assert!(false, "{what} before attach");
                tracing::warn!("Ignoring {} before attach", what);
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::outline::format::NO_STRUCTURE_PLACEHOLDER;
    use crate::outline::model::{StructureNode, SymbolKind};
    use std::sync::{Arc, Mutex};

    struct NullProvider;

    impl StructureProvider for NullProvider {
        fn request_structure(&self, _source: &SourceId) {}
    }

    #[derive(Clone, Default)]
    struct RecordingProvider {
        requests: Arc<Mutex<Vec<SourceId>>>,
    }

    impl StructureProvider for RecordingProvider {
        fn request_structure(&self, source: &SourceId) {
            self.requests.lock().unwrap().push(source.clone());
        }
    }

    fn attached() -> (
        OutlineController,
        mpsc::UnboundedReceiver<WorkspaceRequest>,
    ) {
        let (tx, rx) = mpsc::unbounded_channel();
        let mut controller = OutlineController::new(Box::new(NullProvider), 2);
        controller.attach(tx).unwrap();
        (controller, rx)
    }

    fn model(source: &str, revision: u64, nodes: Vec<StructureNode>) -> StructureModel {
        StructureModel::new(source, revision, nodes)
    }

    fn two_symbols(source: &str, revision: u64) -> StructureModel {
        model(
            source,
            revision,
            vec![
                StructureNode::new("Foo", SymbolKind::Type, 0, 7),
                StructureNode::new("Bar", SymbolKind::Member, 1, 42),
            ],
        )
    }

    fn drain(rx: &mut mpsc::UnboundedReceiver<WorkspaceRequest>) -> Vec<WorkspaceRequest> {
        let mut out = Vec::new();
        while let Ok(req) = rx.try_recv() {
            out.push(req);
        }
        out
    }

    #[test]
    fn test_attach_twice_fails() {
        let (tx, _rx) = mpsc::unbounded_channel();
        let (tx2, _rx2) = mpsc::unbounded_channel();
        let mut controller = OutlineController::new(Box::new(NullProvider), 2);

        assert!(controller.attach(tx).is_ok());
        assert!(matches!(
            controller.attach(tx2),
            Err(PanelError::AlreadyAttached)
        ));
    }

    #[test]
    fn test_accepted_snapshot_reaches_the_view() {
        let (mut controller, _rx) = attached();
        controller.on_file_changed(two_symbols("A", 1));

        assert_eq!(controller.view().displayed_text(), "Foo\n  Bar");
        assert_eq!(controller.view().revision(), 1);
        assert_eq!(controller.displayed(), Some((&SourceId::new("A"), 1)));
    }

    #[test]
    fn test_stale_revision_is_dropped() {
        let (mut controller, _rx) = attached();
        controller.on_file_changed(two_symbols("A", 2));
        let after_two = controller.view().displayed_text().to_string();

        controller.on_file_changed(model(
            "A",
            1,
            vec![StructureNode::new("Old", SymbolKind::Type, 0, 0)],
        ));

        assert_eq!(controller.view().displayed_text(), after_two);
        assert_eq!(controller.view().revision(), 2);
        assert_eq!(controller.stats().stale_dropped, 1);
    }

    #[test]
    fn test_equal_revision_is_dropped_too() {
        let (mut controller, _rx) = attached();
        controller.on_file_changed(two_symbols("A", 3));
        controller.on_file_changed(model(
            "A",
            3,
            vec![StructureNode::new("Other", SymbolKind::Type, 0, 0)],
        ));

        assert_eq!(controller.view().displayed_text(), "Foo\n  Bar");
        assert_eq!(controller.stats().stale_dropped, 1);
    }

    #[test]
    fn test_display_converges_on_max_revision_in_any_order() {
        let rev_text = |rev: u64| {
            model(
                "A",
                rev,
                vec![StructureNode::new(
                    format!("rev{rev}"),
                    SymbolKind::Type,
                    0,
                    rev,
                )],
            )
        };

        for order in [vec![1, 2, 3], vec![3, 1, 2], vec![2, 3, 1], vec![3, 2, 1]] {
            let (mut controller, _rx) = attached();
            for rev in order {
                controller.on_file_changed(rev_text(rev));
            }
            assert_eq!(controller.view().displayed_text(), "rev3");
            assert_eq!(controller.view().revision(), 3);
        }
    }

    #[test]
    fn test_empty_snapshot_shows_placeholder() {
        let (mut controller, _rx) = attached();
        controller.on_file_changed(two_symbols("A", 1));
        controller.on_file_changed(model("A", 2, vec![]));

        assert_eq!(
            controller.view().displayed_text(),
            NO_STRUCTURE_PLACEHOLDER
        );
        assert_eq!(controller.view().revision(), 2);
    }

    #[test]
    fn test_malformed_snapshot_degrades_and_reports_once() {
        let (mut controller, mut rx) = attached();
        controller.on_file_changed(model(
            "A",
            1,
            vec![
                StructureNode::new("Root", SymbolKind::Type, 0, 0),
                StructureNode::new("Lost", SymbolKind::Member, 2, 9),
            ],
        ));

        assert_eq!(controller.view().displayed_text(), MALFORMED_PLACEHOLDER);
        assert!(!controller.view().displayed_text().contains("Lost"));
        assert_eq!(controller.stats().malformed, 1);

        let requests = drain(&mut rx);
        assert_eq!(requests.len(), 1);
        match &requests[0] {
            WorkspaceRequest::OutlineFault { source, message } => {
                assert_eq!(source, &SourceId::new("A"));
                assert!(message.contains("Lost"));
            }
            other => panic!("expected fault report, got {:?}", other),
        }
    }

    #[test]
    fn test_interaction_forwards_source_and_offset() {
        let (mut controller, mut rx) = attached();
        controller.on_file_changed(two_symbols("A", 1));

        controller.on_interaction(1);

        let requests = drain(&mut rx);
        assert_eq!(
            requests,
            vec![WorkspaceRequest::Navigate {
                source: SourceId::new("A"),
                offset: SourceOffset(42),
            }]
        );
    }

    #[test]
    fn test_interaction_without_model_is_noop() {
        let (mut controller, mut rx) = attached();
        controller.on_interaction(0);
        assert!(drain(&mut rx).is_empty());
    }

    #[test]
    fn test_interaction_on_placeholder_is_noop() {
        let (mut controller, mut rx) = attached();
        controller.on_file_changed(model("A", 1, vec![]));
        controller.on_interaction(0);
        assert!(drain(&mut rx).is_empty());
    }

    #[test]
    fn test_click_resolves_through_the_panel() {
        let (mut controller, mut rx) = attached();
        controller.on_file_changed(two_symbols("A", 1));
        controller.view_mut().sync_viewport(10);

        controller.click(1);

        assert_eq!(
            drain(&mut rx),
            vec![WorkspaceRequest::Navigate {
                source: SourceId::new("A"),
                offset: SourceOffset(42),
            }]
        );
    }

    #[test]
    fn test_late_delivery_after_detach_is_silent() {
        let (mut controller, mut rx) = attached();
        controller.on_file_changed(two_symbols("A", 1));
        controller.detach();

        controller.on_file_changed(two_symbols("A", 2));

        assert!(controller.view().is_disposed());
        assert_eq!(controller.view().displayed_text(), "");
        assert!(drain(&mut rx).is_empty());
        assert_eq!(controller.phase(), Phase::Detached);
    }

    #[test]
    fn test_detach_is_idempotent() {
        let (mut controller, _rx) = attached();
        controller.detach();
        controller.detach();
        assert_eq!(controller.phase(), Phase::Detached);
    }

    #[test]
    fn test_opened_and_edited_request_structure() {
        let provider = RecordingProvider::default();
        let requests = provider.requests.clone();
        let (tx, _rx) = mpsc::unbounded_channel();
        let mut controller = OutlineController::new(Box::new(provider), 2);
        controller.attach(tx).unwrap();

        let a = SourceId::new("A");
        controller.on_file_event(&a, FileEventKind::Opened);
        controller.on_file_event(&a, FileEventKind::Edited);
        controller.on_file_event(&a, FileEventKind::Closed);

        assert_eq!(requests.lock().unwrap().len(), 2);
    }

    #[test]
    fn test_closed_clears_display_and_watermark() {
        let (mut controller, _rx) = attached();
        let a = SourceId::new("A");
        controller.on_file_changed(two_symbols("A", 5));
        assert!(controller.displayed().is_some());

        controller.on_file_event(&a, FileEventKind::Closed);
        assert_eq!(controller.view().displayed_text(), "");
        assert!(controller.displayed().is_none());

        // Reopening restarts the revision sequence for the source.
        controller.on_file_changed(two_symbols("A", 1));
        assert_eq!(controller.view().revision(), 1);
    }

    #[test]
    fn test_watermarks_are_per_source() {
        let (mut controller, _rx) = attached();
        controller.on_file_changed(two_symbols("A", 5));
        controller.on_file_changed(two_symbols("B", 1));

        assert_eq!(controller.displayed(), Some((&SourceId::new("B"), 1)));
        assert_eq!(controller.stats().stale_dropped, 0);
    }

    #[test]
    fn test_opening_another_file_clears_the_old_outline() {
        let (mut controller, _rx) = attached();
        controller.on_file_changed(two_symbols("A", 1));
        controller.on_file_event(&SourceId::new("B"), FileEventKind::Opened);

        assert_eq!(controller.view().displayed_text(), "");
        assert!(controller.displayed().is_none());
    }
}
