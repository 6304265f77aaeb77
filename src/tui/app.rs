// TUI application state - the workspace host
//
// The App plays the application-wide controller: it owns the outline
// controller (which owns the panel), feeds it file lifecycle events and
// structure deliveries, and services the requests the panel sends back
// (navigation, fault reports). There is no real editor caret here; a
// navigation request updates the status line and the log.

use std::time::Instant;

use crossterm::event::KeyEvent;
use ratatui::layout::Rect;
use tokio::sync::mpsc;

use crate::config::Config;
use crate::events::{EditorEvent, WorkspaceRequest};
use crate::logging::LogBuffer;
use crate::outline::controller::StructureProvider;
use crate::outline::model::{SourceId, SourceOffset};
use crate::outline::OutlineController;
use crate::theme::Theme;
use crate::tui::components::logs_panel::LogsPanel;
use crate::tui::scroll::FocusablePanel;
use crate::tui::traits::{Handled, Interactive, Scrollable};

/// Main application state for the TUI
pub struct App {
    /// The outline controller/panel pair; created and torn down with the
    /// App.
    pub outline: OutlineController,

    pub logs_panel: LogsPanel,

    /// Log buffer shared with the tracing layer
    pub log_buffer: LogBuffer,

    pub theme: Theme,

    /// Which panel receives input
    pub focused: FocusablePanel,

    /// Whether the app should quit
    pub should_quit: bool,

    /// Last navigation request serviced, shown in the status bar
    pub last_navigation: Option<(SourceId, SourceOffset)>,

    /// Last fault reported by the panel, shown in the status bar
    pub notice: Option<String>,

    /// Layout slots of the panels, refreshed by each draw; used to route
    /// mouse input
    pub outline_area: Rect,
    pub logs_area: Rect,

    requests_rx: mpsc::UnboundedReceiver<WorkspaceRequest>,

    /// When the app started (for uptime display)
    start_time: Instant,
}

impl App {
    pub fn new(
        config: &Config,
        log_buffer: LogBuffer,
        provider: Box<dyn StructureProvider>,
    ) -> Self {
        let (requests_tx, requests_rx) = mpsc::unbounded_channel();
        let mut outline = OutlineController::new(provider, config.indent_width);
        outline
            .attach(requests_tx)
            .expect("fresh controller attaches exactly once");

        Self {
            outline,
            logs_panel: LogsPanel::new(),
            log_buffer,
            theme: Theme::by_name(&config.theme),
            focused: FocusablePanel::default(),
            should_quit: false,
            last_navigation: None,
            notice: None,
            outline_area: Rect::default(),
            logs_area: Rect::default(),
            requests_rx,
            start_time: Instant::now(),
        }
    }

    /// Route one editing-session event into the outline controller.
    pub fn on_editor_event(&mut self, event: EditorEvent) {
        match event {
            EditorEvent::File { source, kind } => {
                self.outline.on_file_event(&source, kind);
            }
            EditorEvent::StructureReady { model } => {
                let rendered_before = self.outline.stats().rendered;
                self.outline.on_file_changed(model);
                // A fresh good outline supersedes any fault notice.
                if self.outline.stats().rendered > rendered_before {
                    self.notice = None;
                }
            }
        }
    }

    /// Service requests the panel sent since the last loop turn.
    pub fn drain_requests(&mut self) {
        while let Ok(request) = self.requests_rx.try_recv() {
            match request {
                WorkspaceRequest::Navigate { source, offset } => {
                    tracing::info!("Editor caret -> {} @ byte {}", source, offset);
                    self.last_navigation = Some((source, offset));
                }
                WorkspaceRequest::OutlineFault { source, message } => {
                    tracing::error!("Outline fault for {}: {}", source, message);
                    self.notice = Some(message);
                }
            }
        }
    }

    pub fn focus_next(&mut self) {
        self.focused = self.focused.next();
    }

    pub fn focus_prev(&mut self) {
        self.focused = self.focused.prev();
    }

    /// Dispatch a key to the focused panel via the Interactive trait.
    pub fn dispatch_to_focused(&mut self, key: KeyEvent) -> Handled {
        let handled = match self.focused {
            FocusablePanel::Outline => self.outline.handle_key(key),
            FocusablePanel::Logs => self.logs_panel.handle_key(key),
        };
        self.drain_requests();
        handled
    }

    /// Hint text for the focused panel.
    pub fn focus_hint(&self) -> Option<&'static str> {
        match self.focused {
            FocusablePanel::Outline => self.outline.view().focus_hint(),
            FocusablePanel::Logs => self.logs_panel.focus_hint(),
        }
    }

    /// A left click at terminal position (x, y). Focuses the panel under
    /// the cursor; inside the outline content area it selects the line.
    pub fn handle_click(&mut self, x: u16, y: u16) {
        if let Some(row) = content_row(self.outline_area, x, y) {
            self.focused = FocusablePanel::Outline;
            self.outline.click(row);
            self.drain_requests();
        } else if rect_contains(self.logs_area, x, y) {
            self.focused = FocusablePanel::Logs;
        }
    }

    /// Mouse wheel at terminal position (x, y); scrolls the panel under
    /// the cursor.
    pub fn handle_wheel(&mut self, up: bool, x: u16, y: u16) {
        if rect_contains(self.outline_area, x, y) {
            let view = self.outline.view_mut();
            if up {
                view.scroll_up();
            } else {
                view.scroll_down();
            }
        } else if rect_contains(self.logs_area, x, y) {
            if up {
                self.logs_panel.scroll_up();
            } else {
                self.logs_panel.scroll_down();
            }
        }
    }

    /// Tear down the panel pair; called once on the way out.
    pub fn shutdown(&mut self) {
        self.outline.detach();
    }

    /// Uptime as HH:MM:SS
    pub fn uptime(&self) -> String {
        let seconds = self.start_time.elapsed().as_secs();
        format!(
            "{:02}:{:02}:{:02}",
            seconds / 3600,
            (seconds % 3600) / 60,
            seconds % 60
        )
    }
}

fn rect_contains(rect: Rect, x: u16, y: u16) -> bool {
    x >= rect.x && x < rect.x + rect.width && y >= rect.y && y < rect.y + rect.height
}

/// Translate a terminal position into a viewport row of a bordered
/// panel's content area. Returns None on the border or outside.
fn content_row(rect: Rect, x: u16, y: u16) -> Option<usize> {
    if rect.width < 3 || rect.height < 3 {
        return None;
    }
    let inside_x = x > rect.x && x < rect.x + rect.width - 1;
    let inside_y = y > rect.y && y < rect.y + rect.height - 1;
    if inside_x && inside_y {
        Some((y - rect.y - 1) as usize)
    } else {
        None
    }
}
