// UI rendering logic
//
// One frame: sync panel dimensions, remember the layout slots for mouse
// routing, then draw through the Component trait. Outline on the left,
// logs on the right, status bar across the bottom.

use crate::tui::app::App;
use crate::tui::components::status_bar;
use crate::tui::traits::{Component, RenderContext};
use ratatui::{
    layout::{Constraint, Direction, Layout},
    Frame,
};

/// Minimum columns before the logs panel is worth showing
const LOGS_MIN_WIDTH: u16 = 50;

/// Draw the whole frame
pub fn draw(f: &mut Frame, app: &mut App) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(3), Constraint::Length(2)])
        .split(f.area());

    let content = rows[0];
    let status = rows[1];

    // On narrow terminals the outline takes the whole content area.
    let (outline_area, logs_area) = if content.width < LOGS_MIN_WIDTH {
        (content, ratatui::layout::Rect::default())
    } else {
        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(58), Constraint::Percentage(42)])
            .split(content);
        (columns[0], columns[1])
    };

    app.outline_area = outline_area;
    app.logs_area = logs_area;

    let outline_height = outline_area.height.saturating_sub(2) as usize;
    app.outline.view_mut().sync_viewport(outline_height);

    let entries = app.log_buffer.snapshot();
    let logs_height = logs_area.height.saturating_sub(2) as usize;
    app.logs_panel.sync_entries(entries, logs_height);

    let ctx = RenderContext::new(&app.theme, app.focused);
    // Fully qualified: the outline panel's inherent `render` replaces
    // content; the widget drawing comes from the Component trait.
    Component::render(app.outline.view(), f, outline_area, &ctx);
    if logs_area.width > 0 {
        Component::render(&app.logs_panel, f, logs_area, &ctx);
    }

    status_bar::render(f, status, app);
}
