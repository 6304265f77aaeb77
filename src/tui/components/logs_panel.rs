//! Logs panel component
//!
//! A self-contained component that displays system log entries. Owns its
//! scroll and selection state; the App only syncs the entry snapshot each
//! frame and routes input.

use crate::logging::{LogEntry, LogLevel};
use crate::theme::Theme;
use crate::tui::scroll::{FocusablePanel, ScrollState};
use crate::tui::traits::{Component, Handled, Interactive, RenderContext, Scrollable};
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    widgets::{Block, Borders, List, ListItem},
    Frame,
};

/// Logs panel with auto-follow for streaming entries
pub struct LogsPanel {
    scroll: ScrollState,

    /// Selected entry index (None = follow mode)
    selected: Option<usize>,

    /// Snapshot of the log buffer, refreshed each frame
    entries: Vec<LogEntry>,
}

impl LogsPanel {
    pub fn new() -> Self {
        Self {
            scroll: ScrollState::following(),
            selected: None,
            entries: Vec::new(),
        }
    }

    /// Refresh the entry snapshot and scroll dimensions; call once per
    /// frame before drawing.
    pub fn sync_entries(&mut self, entries: Vec<LogEntry>, viewport_height: usize) {
        self.entries = entries;
        self.scroll
            .update_dimensions(self.entries.len(), viewport_height);

        if let Some(idx) = self.selected {
            if idx >= self.entries.len() {
                self.selected = self.entries.len().checked_sub(1);
            }
        }
    }

    fn select_next(&mut self) {
        match self.selected {
            Some(idx) if idx + 1 < self.entries.len() => {
                self.selected = Some(idx + 1);
                self.scroll.reveal(idx + 1);
            }
            None if !self.entries.is_empty() => {
                self.selected = Some(self.entries.len() - 1);
            }
            _ => {}
        }
    }

    fn select_previous(&mut self) {
        match self.selected {
            Some(idx) if idx > 0 => {
                self.selected = Some(idx - 1);
                self.scroll.reveal(idx - 1);
            }
            None if !self.entries.is_empty() => {
                self.selected = Some(self.entries.len() - 1);
            }
            _ => {}
        }
    }
}

impl Default for LogsPanel {
    fn default() -> Self {
        Self::new()
    }
}

impl Component for LogsPanel {
    fn id(&self) -> FocusablePanel {
        FocusablePanel::Logs
    }

    fn render(&self, f: &mut Frame, area: Rect, ctx: &RenderContext) {
        let focused = ctx.is_focused(self.id());
        let (start, end) = self.scroll.visible_range();

        let items: Vec<ListItem> = self.entries[start..end.min(self.entries.len())]
            .iter()
            .enumerate()
            .map(|(i, entry)| {
                let absolute = start + i;
                let base = log_level_style(entry.level, ctx.theme);
                let style = if focused && self.selected == Some(absolute) {
                    Style::default()
                        .fg(ctx.theme.selection_fg)
                        .bg(ctx.theme.selection_bg)
                        .add_modifier(Modifier::BOLD)
                } else {
                    base
                };
                ListItem::new(format_log_entry(entry)).style(style)
            })
            .collect();

        let border_color = if focused {
            ctx.theme.border_focused
        } else {
            ctx.theme.border
        };

        let title = if self.selected.is_some() && focused {
            " System Logs [select] "
        } else if self.scroll.auto_follow {
            " System Logs "
        } else {
            " System Logs [scroll] "
        };

        let list = List::new(items).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(border_color))
                .title(title)
                .title_style(Style::default().fg(ctx.theme.title)),
        );

        f.render_widget(list, area);
    }
}

impl Scrollable for LogsPanel {
    fn scroll_state(&self) -> &ScrollState {
        &self.scroll
    }

    fn scroll_state_mut(&mut self) -> &mut ScrollState {
        &mut self.scroll
    }
}

impl Interactive for LogsPanel {
    fn handle_key(&mut self, key: KeyEvent) -> Handled {
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
                Handled::Yes
            }
            KeyCode::End => {
                self.scroll_to_bottom();
                Handled::Yes
            }
            KeyCode::Esc => {
                if self.selected.is_some() {
                    self.selected = None;
                    self.scroll.auto_follow = true;
                    Handled::Yes
                } else {
                    Handled::No
                }
            }
            _ => Handled::No,
        }
    }

    fn focus_hint(&self) -> Option<&'static str> {
        Some("↑↓:select  Esc:follow")
    }
}

/// Format a log entry for display
fn format_log_entry(entry: &LogEntry) -> String {
    format!(
        "[{}] {:5} {}",
        entry.timestamp.format("%H:%M:%S"),
        entry.level.as_str(),
        entry.message
    )
}

/// Color style for a log level
fn log_level_style(level: LogLevel, theme: &Theme) -> Style {
    let color = match level {
        LogLevel::Error => theme.log_error,
        LogLevel::Warn => theme.log_warn,
        LogLevel::Info => theme.log_info,
        LogLevel::Debug => theme.log_debug,
        LogLevel::Trace => theme.log_trace,
    };
    let style = Style::default().fg(color);
    if level == LogLevel::Error {
        style.add_modifier(Modifier::BOLD)
    } else {
        style
    }
}
