// Outline panel component - the structure display surface
//
// A passive, read-only text region. The controller pushes formatted text
// into it with `render`; user interaction (line selection by click or
// keyboard) is surfaced through a single registered listener. The panel
// never inspects the text it displays and holds no analysis state.
//
// Lifecycle: construction allocates the region, `teardown` releases it.
// After teardown every render fails with `PanelError::DisposedView`;
// teardown itself may be repeated freely.

use crate::outline::error::PanelError;
use crate::tui::scroll::{FocusablePanel, ScrollState};
use crate::tui::traits::{Component, Handled, Interactive, RenderContext, Scrollable};
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::Line,
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use unicode_width::UnicodeWidthChar;

/// Listener invoked with the content row index when the user selects a
/// line. Exactly one is registered at a time; the last registration wins.
pub type InteractionListener = Box<dyn FnMut(usize) + Send>;

/// The structure display surface.
pub struct OutlinePanel {
    /// Revision of the currently displayed blob, 0 before the first render.
    revision: u64,

    /// The displayed text, exactly as the controller provided it.
    text: String,

    /// Line cache derived from `text`, rebuilt on each render.
    lines: Vec<String>,

    scroll: ScrollState,

    /// Keyboard selection (content row index)
    selected: Option<usize>,

    listener: Option<InteractionListener>,

    disposed: bool,
}

impl OutlinePanel {
    /// Allocates the display region. Called exactly once per panel; the
    /// region starts empty, which is a valid state distinct from any
    /// rendered placeholder.
    pub fn new() -> Self {
        Self {
            revision: 0,
            text: String::new(),
            lines: Vec::new(),
            scroll: ScrollState::anchored_top(),
            selected: None,
            listener: None,
            disposed: false,
        }
    }

    /// Atomically replaces the displayed content.
    ///
    /// Accepts any string, including empty; the panel performs no
    /// interpretation. After a successful return, `displayed_text` yields
    /// exactly `text` and `revision` yields `revision`.
    pub fn render(&mut self, revision: u64, text: impl Into<String>) -> Result<(), PanelError> {
        if self.disposed {
            return Err(PanelError::DisposedView);
        }

        self.text = text.into();
        self.lines = if self.text.is_empty() {
            Vec::new()
        } else {
            self.text.lines().map(str::to_string).collect()
        };
        self.revision = revision;
        self.selected = None;
        self.scroll.scroll_to_top();
        Ok(())
    }

    /// Registers the selection listener. Last registration wins.
    pub fn on_interaction(&mut self, listener: InteractionListener) {
        self.listener = Some(listener);
    }

    /// Releases the display region. Idempotent; once torn down, `render`
    /// fails with `DisposedView`.
    pub fn teardown(&mut self) {
        if self.disposed {
            return;
        }
        self.disposed = true;
        self.revision = 0;
        self.text.clear();
        self.lines.clear();
        self.selected = None;
        self.listener = None;
    }

    pub fn is_disposed(&self) -> bool {
        self.disposed
    }

    /// The displayed blob, exactly as last rendered.
    pub fn displayed_text(&self) -> &str {
        &self.text
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    /// Sync scroll dimensions with the viewport; call once per frame
    /// before drawing.
    pub fn sync_viewport(&mut self, viewport_height: usize) {
        self.scroll.update_dimensions(self.lines.len(), viewport_height);
        if let Some(sel) = self.selected {
            if sel >= self.lines.len() {
                self.selected = self.lines.len().checked_sub(1);
            }
        }
    }

    /// A click on the given viewport row (0 = first content line below
    /// the border). Selects the line and notifies the listener.
    pub fn click_row(&mut self, viewport_row: usize) {
        if self.disposed {
            return;
        }
        let row = self.scroll.offset() + viewport_row;
        if row < self.lines.len() {
            self.selected = Some(row);
            self.fire(row);
        }
    }

    fn fire(&mut self, row: usize) {
        if let Some(listener) = self.listener.as_mut() {
            listener(row);
        }
    }

    fn select_next(&mut self) {
        let count = self.lines.len();
        if count == 0 {
            return;
        }
        let next = match self.selected {
            Some(i) if i + 1 < count => i + 1,
            Some(i) => i,
            None => 0,
        };
        self.selected = Some(next);
        self.scroll.reveal(next);
    }

    fn select_previous(&mut self) {
        let count = self.lines.len();
        if count == 0 {
            return;
        }
        let prev = match self.selected {
            Some(i) if i > 0 => i - 1,
            Some(i) => i,
            None => 0,
        };
        self.selected = Some(prev);
        self.scroll.reveal(prev);
    }
}

impl Default for OutlinePanel {
    fn default() -> Self {
        Self::new()
    }
}

impl Component for OutlinePanel {
    fn id(&self) -> FocusablePanel {
        FocusablePanel::Outline
    }

    fn render(&self, f: &mut Frame, area: Rect, ctx: &RenderContext) {
        let focused = ctx.is_focused(self.id());
        let border_color = if focused {
            ctx.theme.border_focused
        } else {
            ctx.theme.border
        };

        let title = if self.selected.is_some() && focused {
            " Structure [select] "
        } else if focused {
            " Structure "
        } else {
            " Structure · "
        };

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(border_color))
            .title(title)
            .title_style(Style::default().fg(ctx.theme.title));

        let inner_width = area.width.saturating_sub(2) as usize;
        let (start, end) = self.scroll.visible_range();

        let rendered: Vec<Line> = self.lines[start..end.min(self.lines.len())]
            .iter()
            .enumerate()
            .map(|(i, line)| {
                let row = start + i;
                let style = if focused && self.selected == Some(row) {
                    Style::default()
                        .fg(ctx.theme.selection_fg)
                        .bg(ctx.theme.selection_bg)
                        .add_modifier(Modifier::BOLD)
                } else {
                    Style::default().fg(ctx.theme.outline_text)
                };
                Line::styled(truncate_to_width(line, inner_width), style)
            })
            .collect();

        f.render_widget(Paragraph::new(rendered).block(block), area);
    }
}

impl Scrollable for OutlinePanel {
    fn scroll_state(&self) -> &ScrollState {
        &self.scroll
    }

    fn scroll_state_mut(&mut self) -> &mut ScrollState {
        &mut self.scroll
    }
}

impl Interactive for OutlinePanel {
    fn handle_key(&mut self, key: KeyEvent) -> Handled {
        if self.disposed {
            return Handled::No;
        }
        match key.code {
            KeyCode::Up | KeyCode::Char('k') => {
                self.select_previous();
                Handled::Yes
            }
            KeyCode::Down | KeyCode::Char('j') => {
                self.select_next();
                Handled::Yes
            }
            KeyCode::PageUp => {
                self.page_up();
                Handled::Yes
            }
            KeyCode::PageDown => {
                self.page_down();
                Handled::Yes
            }
            KeyCode::Home => {
                self.scroll_to_top();
                if !self.lines.is_empty() {
                    self.selected = Some(0);
                }
                Handled::Yes
            }
            KeyCode::End => {
                self.scroll_to_bottom();
                if !self.lines.is_empty() {
                    self.selected = Some(self.lines.len() - 1);
                }
                Handled::Yes
            }
            KeyCode::Enter => {
                if let Some(row) = self.selected {
                    self.fire(row);
                    Handled::Yes
                } else {
                    Handled::No
                }
            }
            KeyCode::Esc => {
                if self.selected.is_some() {
                    self.selected = None;
                    Handled::Yes
                } else {
                    Handled::No
                }
            }
            _ => Handled::No,
        }
    }

    fn focus_hint(&self) -> Option<&'static str> {
        Some("↑↓:select  Enter:go to symbol  Esc:clear")
    }
}

/// Truncate a line to `max` display columns, appending an ellipsis when
/// anything was cut. Width-aware so CJK and emoji labels stay aligned.
fn truncate_to_width(line: &str, max: usize) -> String {
    if max == 0 {
        return String::new();
    }

    let total: usize = line.chars().map(|c| c.width().unwrap_or(0)).sum();
    if total <= max {
        return line.to_string();
    }

    let mut out = String::new();
    let mut used = 0usize;
    for c in line.chars() {
        let cw = c.width().unwrap_or(0);
        if used + cw > max.saturating_sub(1) {
            break;
        }
        used += cw;
        out.push(c);
    }
    out.push('…');
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::theme::Theme;
    use ratatui::{backend::TestBackend, Terminal};
    use std::sync::{Arc, Mutex};

    fn recording_listener() -> (InteractionListener, Arc<Mutex<Vec<usize>>>) {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = seen.clone();
        let listener = Box::new(move |row| sink.lock().unwrap().push(row));
        (listener, seen)
    }

    #[test]
    fn test_render_replaces_content_and_revision() {
        let mut panel = OutlinePanel::new();
        assert_eq!(panel.displayed_text(), "");
        assert_eq!(panel.revision(), 0);

        OutlinePanel::render(&mut panel,3, "Foo\n  Bar").unwrap();
        assert_eq!(panel.displayed_text(), "Foo\n  Bar");
        assert_eq!(panel.revision(), 3);
        assert_eq!(panel.line_count(), 2);

        OutlinePanel::render(&mut panel,4, "").unwrap();
        assert_eq!(panel.displayed_text(), "");
        assert_eq!(panel.revision(), 4);
        assert_eq!(panel.line_count(), 0);
    }

    #[test]
    fn test_render_after_teardown_fails() {
        let mut panel = OutlinePanel::new();
        OutlinePanel::render(&mut panel,1, "x").unwrap();
        panel.teardown();
        assert!(matches!(
            OutlinePanel::render(&mut panel,2, "y"),
            Err(PanelError::DisposedView)
        ));
        assert_eq!(panel.displayed_text(), "");
    }

    #[test]
    fn test_teardown_is_idempotent() {
        let mut panel = OutlinePanel::new();
        panel.teardown();
        panel.teardown();
        assert!(panel.is_disposed());
    }

    #[test]
    fn test_last_listener_registration_wins() {
        let mut panel = OutlinePanel::new();
        OutlinePanel::render(&mut panel,1, "a\nb\nc").unwrap();
        panel.sync_viewport(10);

        let (first, first_seen) = recording_listener();
        let (second, second_seen) = recording_listener();
        panel.on_interaction(first);
        panel.on_interaction(second);

        panel.click_row(1);
        assert!(first_seen.lock().unwrap().is_empty());
        assert_eq!(*second_seen.lock().unwrap(), vec![1]);
    }

    #[test]
    fn test_click_accounts_for_scroll_offset() {
        let mut panel = OutlinePanel::new();
        let text = (0..10).map(|i| i.to_string()).collect::<Vec<_>>().join("\n");
        OutlinePanel::render(&mut panel,1, text).unwrap();
        panel.sync_viewport(4);
        panel.scroll_down();
        panel.scroll_down();

        let (listener, seen) = recording_listener();
        panel.on_interaction(listener);
        panel.click_row(1);
        assert_eq!(*seen.lock().unwrap(), vec![3]);
    }

    #[test]
    fn test_click_past_content_is_ignored() {
        let mut panel = OutlinePanel::new();
        OutlinePanel::render(&mut panel,1, "only").unwrap();
        panel.sync_viewport(10);

        let (listener, seen) = recording_listener();
        panel.on_interaction(listener);
        panel.click_row(5);
        assert!(seen.lock().unwrap().is_empty());
    }

    #[test]
    fn test_enter_fires_on_selected_row() {
        let mut panel = OutlinePanel::new();
        OutlinePanel::render(&mut panel,1, "a\nb").unwrap();
        panel.sync_viewport(10);

        let (listener, seen) = recording_listener();
        panel.on_interaction(listener);

        panel.handle_key(KeyEvent::from(KeyCode::Down));
        panel.handle_key(KeyEvent::from(KeyCode::Down));
        panel.handle_key(KeyEvent::from(KeyCode::Enter));
        assert_eq!(*seen.lock().unwrap(), vec![1]);
    }

    #[test]
    fn test_enter_without_selection_bubbles_up() {
        let mut panel = OutlinePanel::new();
        OutlinePanel::render(&mut panel,1, "a\nb").unwrap();
        assert_eq!(
            panel.handle_key(KeyEvent::from(KeyCode::Enter)),
            Handled::No
        );
    }

    #[test]
    fn test_draw_shows_indented_outline() {
        let mut panel = OutlinePanel::new();
        OutlinePanel::render(&mut panel,1, "Foo\n  Bar").unwrap();
        panel.sync_viewport(6);

        let theme = Theme::dark();
        let ctx = RenderContext::new(&theme, FocusablePanel::Outline);
        let backend = TestBackend::new(20, 8);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal
            .draw(|f| Component::render(&panel, f, f.area(), &ctx))
            .unwrap();

        let buffer = terminal.backend().buffer();
        let mut content = String::new();
        for y in 0..buffer.area.height {
            for x in 0..buffer.area.width {
                content.push_str(buffer[(x, y)].symbol());
            }
            content.push('\n');
        }
        assert!(content.contains("Foo"));
        assert!(content.contains("  Bar"));
        assert!(content.contains("Structure"));
    }

    #[test]
    fn test_truncate_to_width() {
        assert_eq!(truncate_to_width("short", 10), "short");
        assert_eq!(truncate_to_width("exactly", 7), "exactly");
        assert_eq!(truncate_to_width("elongated", 6), "elong…");
        assert_eq!(truncate_to_width("anything", 0), "");
    }
}
