// Status bar component
//
// Renders session state at the bottom: uptime, controller phase, the
// displayed source and revision, delivery counters, the last navigation,
// and key hints for the focused panel. A reported fault takes over the
// line until the next render replaces it.

use crate::tui::app::App;
use ratatui::{
    layout::Rect,
    style::Style,
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Render the status bar
pub fn render(f: &mut Frame, area: Rect, app: &App) {
    let stats = app.outline.stats();

    let shown = match app.outline.displayed() {
        Some((source, revision)) => format!(
            "{} r{} · {} lines",
            source,
            revision,
            app.outline.view().line_count()
        ),
        None => "no outline".to_string(),
    };

    let navigation = match &app.last_navigation {
        Some((source, offset)) => format!(" │ ➜ {}@{}", source, offset),
        None => String::new(),
    };

    let counters = if stats.stale_dropped > 0 || stats.malformed > 0 {
        format!(
            " │ dropped {} · malformed {}",
            stats.stale_dropped, stats.malformed
        )
    } else {
        String::new()
    };

    let status_text = if let Some(notice) = &app.notice {
        format!(" ⚠ {}", notice)
    } else {
        let hint = app.focus_hint().unwrap_or("Tab:panels  q:quit");
        format!(
            " {} │ {} │ {}{}{} │ {}",
            app.uptime(),
            app.outline.phase().as_str(),
            shown,
            navigation,
            counters,
            hint,
        )
    };

    let color = if app.notice.is_some() {
        app.theme.log_warn
    } else {
        app.theme.status_bar
    };

    let status = Paragraph::new(status_text)
        .style(Style::default().fg(color))
        .block(Block::default().borders(Borders::TOP));

    f.render_widget(status, area);
}
