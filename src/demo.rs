// Demo mode: a scripted editing session to showcase the panel
//
// Plays the role of both the editing session and the analysis
// collaborator: emits file lifecycle events on a fixed cadence, answers
// structure requests with evolving outline snapshots, and deliberately
// injects one stale re-delivery and one malformed snapshot so the
// staleness guard and the diagnostic placeholder can be watched live.

use std::collections::HashMap;
use std::time::Duration;

use tokio::sync::{mpsc, oneshot};
use tokio::time::sleep;

use crate::events::{EditorEvent, FileEventKind};
use crate::outline::controller::StructureProvider;
use crate::outline::model::{SourceId, StructureModel, StructureNode, SymbolKind};

/// The analysis hand-off handle given to the controller. Requests are
/// forwarded to the demo task, which answers through the editor event
/// channel after a short "analysis" delay.
pub struct DemoAnalyst {
    requests: mpsc::UnboundedSender<SourceId>,
}

impl DemoAnalyst {
    pub fn channel() -> (Self, mpsc::UnboundedReceiver<SourceId>) {
        let (requests, requests_rx) = mpsc::unbounded_channel();
        (Self { requests }, requests_rx)
    }
}

impl StructureProvider for DemoAnalyst {
    fn request_structure(&self, source: &SourceId) {
        // The demo task may already be gone during shutdown.
        let _ = self.requests.send(source.clone());
    }
}

/// One scripted step of the demo session.
enum Step {
    File(&'static str, FileEventKind),
    /// Re-deliver the current snapshot unchanged; the panel must drop it.
    ReplayStale(&'static str),
    /// Deliver a snapshot with a broken nesting chain.
    DeliverMalformed(&'static str),
}

const GEOMETRY: &str = "src/geometry.rs";
const SCENE: &str = "src/render/scene.rs";
const README: &str = "README.md";

fn demo_script() -> Vec<Step> {
    use FileEventKind::*;
    vec![
        Step::File(GEOMETRY, Opened),
        Step::File(GEOMETRY, Edited),
        Step::ReplayStale(GEOMETRY),
        Step::File(SCENE, Opened),
        Step::DeliverMalformed(SCENE),
        Step::File(SCENE, Edited),
        Step::File(README, Opened),
        Step::File(README, Closed),
        Step::File(GEOMETRY, Opened),
        Step::File(GEOMETRY, Edited),
    ]
}

/// Run the scripted session until shutdown.
pub async fn run_demo(
    tx: mpsc::Sender<EditorEvent>,
    mut requests_rx: mpsc::UnboundedReceiver<SourceId>,
    mut shutdown_rx: oneshot::Receiver<()>,
    cadence: Duration,
) {
    // Initial delay to let the TUI render its empty state.
    sleep(Duration::from_millis(1200)).await;

    let mut session = DemoSession::new();
    let mut steps = demo_script().into_iter();

    loop {
        tokio::select! {
            _ = &mut shutdown_rx => {
                tracing::info!("Demo received shutdown signal");
                return;
            }

            // The controller asked for a fresh snapshot.
            Some(source) = requests_rx.recv() => {
                sleep(cadence / 4).await; // pretend the analysis takes a moment
                if let Some(event) = session.analyze(&source) {
                    if tx.send(event).await.is_err() {
                        return;
                    }
                }
            }

            // Next scripted step.
            _ = sleep(cadence) => {
                let Some(step) = steps.next() else {
                    continue; // script done, keep answering requests
                };
                for event in session.apply(step) {
                    if tx.send(event).await.is_err() {
                        return;
                    }
                }
            }
        }
    }
}

/// Per-source analysis state: how often the file was "edited" (selects
/// the outline variant) and the revision counter.
struct DemoSession {
    revisions: HashMap<SourceId, u64>,
    takes: HashMap<SourceId, usize>,
}

impl DemoSession {
    fn new() -> Self {
        Self {
            revisions: HashMap::new(),
            takes: HashMap::new(),
        }
    }

    /// Produce the next snapshot for a requested source.
    fn analyze(&mut self, source: &SourceId) -> Option<EditorEvent> {
        let revision = {
            let counter = self.revisions.entry(source.clone()).or_insert(0);
            *counter += 1;
            *counter
        };
        let take = *self.takes.get(source).unwrap_or(&0);

        tracing::info!("Analysis finished: {} (revision {})", source, revision);
        Some(EditorEvent::StructureReady {
            model: StructureModel::new(source.clone(), revision, outline_take(source, take)),
        })
    }

    fn apply(&mut self, step: Step) -> Vec<EditorEvent> {
        match step {
            Step::File(source, kind) => {
                let source = SourceId::new(source);
                match kind {
                    FileEventKind::Opened => {
                        tracing::info!("Demo: opening {}", source);
                    }
                    FileEventKind::Edited => {
                        tracing::info!("Demo: editing {}", source);
                        *self.takes.entry(source.clone()).or_insert(0) += 1;
                    }
                    FileEventKind::Closed => {
                        tracing::info!("Demo: closing {}", source);
                        self.revisions.remove(&source);
                        self.takes.remove(&source);
                    }
                }
                vec![EditorEvent::File { source, kind }]
            }

            Step::ReplayStale(source) => {
                let source = SourceId::new(source);
                let Some(&revision) = self.revisions.get(&source) else {
                    return Vec::new();
                };
                let take = *self.takes.get(&source).unwrap_or(&0);
                tracing::info!(
                    "Demo: replaying revision {} of {} out of order",
                    revision,
                    source
                );
                vec![EditorEvent::StructureReady {
                    model: StructureModel::new(source.clone(), revision, outline_take(&source, take)),
                }]
            }

            Step::DeliverMalformed(source) => {
                let source = SourceId::new(source);
                let revision = {
                    let counter = self.revisions.entry(source.clone()).or_insert(0);
                    *counter += 1;
                    *counter
                };
                tracing::info!("Demo: delivering a malformed snapshot of {}", source);
                vec![EditorEvent::StructureReady {
                    model: StructureModel::new(
                        source,
                        revision,
                        vec![
                            StructureNode::new("Scene", SymbolKind::Type, 0, 0),
                            // Depth 2 under a root: broken nesting chain.
                            StructureNode::new("lights", SymbolKind::Member, 2, 180),
                        ],
                    ),
                }]
            }
        }
    }
}

/// Outline variants per source; `take` grows with each scripted edit.
fn outline_take(source: &SourceId, take: usize) -> Vec<StructureNode> {
    use SymbolKind::*;

    match source.as_str() {
        GEOMETRY => {
            let mut nodes = vec![
                StructureNode::new("geometry", Namespace, 0, 0),
                StructureNode::new("Point", Type, 1, 24),
                StructureNode::new("x", Member, 2, 44),
                StructureNode::new("y", Member, 2, 58),
                StructureNode::new("length", Function, 1, 90),
            ];
            if take >= 1 {
                nodes.extend([
                    StructureNode::new("Segment", Type, 1, 160),
                    StructureNode::new("start", Member, 2, 184),
                    StructureNode::new("end", Member, 2, 204),
                    StructureNode::new("midpoint", Function, 1, 240),
                ]);
            }
            if take >= 2 {
                nodes.extend([
                    StructureNode::new("translate", Function, 1, 320),
                    StructureNode::new("EPSILON", Constant, 1, 380),
                ]);
            }
            nodes
        }

        SCENE => {
            let mut nodes = vec![
                StructureNode::new("render", Namespace, 0, 0),
                StructureNode::new("Scene", Type, 1, 30),
                StructureNode::new("camera", Member, 2, 52),
                StructureNode::new("objects", Member, 2, 76),
                StructureNode::new("draw", Function, 1, 120),
            ];
            if take >= 1 {
                nodes.extend([
                    StructureNode::new("Light", Type, 1, 210),
                    StructureNode::new("intensity", Member, 2, 234),
                    StructureNode::new("illuminate", Function, 1, 280),
                ]);
            }
            nodes
        }

        // A file with nothing to outline; the panel shows its
        // "no structure" text instead of a blank region.
        README => Vec::new(),

        other => vec![StructureNode::new(other, Namespace, 0, 0)],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_revisions_increase_per_source() {
        let mut session = DemoSession::new();
        let geometry = SourceId::new(GEOMETRY);

        for expected in 1..=3u64 {
            match session.analyze(&geometry) {
                Some(EditorEvent::StructureReady { model }) => {
                    assert_eq!(model.revision(), expected);
                }
                other => panic!("expected delivery, got {:?}", other),
            }
        }
    }

    #[test]
    fn test_edit_grows_the_outline() {
        let mut session = DemoSession::new();
        let geometry = SourceId::new(GEOMETRY);

        let Some(EditorEvent::StructureReady { model: first }) = session.analyze(&geometry)
        else {
            panic!("expected delivery");
        };
        session.apply(Step::File(GEOMETRY, FileEventKind::Edited));
        let Some(EditorEvent::StructureReady { model: second }) = session.analyze(&geometry)
        else {
            panic!("expected delivery");
        };

        assert!(second.nodes().len() > first.nodes().len());
        assert!(second.revision() > first.revision());
    }

    #[test]
    fn test_stale_replay_repeats_current_revision() {
        let mut session = DemoSession::new();
        let geometry = SourceId::new(GEOMETRY);
        session.analyze(&geometry);
        session.analyze(&geometry);

        let events = session.apply(Step::ReplayStale(GEOMETRY));
        match &events[..] {
            [EditorEvent::StructureReady { model }] => assert_eq!(model.revision(), 2),
            other => panic!("expected one delivery, got {:?}", other),
        }
    }

    #[test]
    fn test_malformed_step_fails_validation() {
        let mut session = DemoSession::new();
        let events = session.apply(Step::DeliverMalformed(SCENE));
        match &events[..] {
            [EditorEvent::StructureReady { model }] => assert!(model.validate().is_err()),
            other => panic!("expected one delivery, got {:?}", other),
        }
    }

    #[test]
    fn test_every_scripted_outline_is_well_formed() {
        for source in [GEOMETRY, SCENE, README] {
            let source = SourceId::new(source);
            for take in 0..3 {
                let model = StructureModel::new(source.clone(), 1, outline_take(&source, take));
                assert!(
                    model.validate().is_ok(),
                    "take {} of {} is malformed",
                    take,
                    source
                );
            }
        }
    }

    #[test]
    fn test_close_resets_the_revision_sequence() {
        let mut session = DemoSession::new();
        let geometry = SourceId::new(GEOMETRY);
        session.analyze(&geometry);
        session.analyze(&geometry);
        session.apply(Step::File(GEOMETRY, FileEventKind::Closed));

        match session.analyze(&geometry) {
            Some(EditorEvent::StructureReady { model }) => assert_eq!(model.revision(), 1),
            other => panic!("expected delivery, got {:?}", other),
        }
    }
}
