//! Core component trait - the foundation of the UI system
//!
//! Every panel that can be rendered implements `Component`. Identity is
//! the panel's `FocusablePanel` slot; rendering receives an immutable
//! context so drawing stays free of side effects.

use crate::theme::Theme;
use crate::tui::scroll::FocusablePanel;
use ratatui::{layout::Rect, Frame};

/// Immutable context passed to components during rendering
///
/// Components only see what they need during a draw: the palette and the
/// current focus. Mutable state updates happen before the draw pass.
#[derive(Debug, Clone, Copy)]
pub struct RenderContext<'a> {
    /// Color theme for styling
    pub theme: &'a Theme,

    /// Which panel currently has focus
    pub focus: FocusablePanel,
}

impl<'a> RenderContext<'a> {
    pub fn new(theme: &'a Theme, focus: FocusablePanel) -> Self {
        Self { theme, focus }
    }

    /// Check if a panel is currently focused
    pub fn is_focused(&self, id: FocusablePanel) -> bool {
        self.focus == id
    }
}

/// Base trait for all UI panels
///
/// A component is anything that can render itself into an allocated
/// rectangle. Panels that take input also implement [`Interactive`];
/// panels with overflowing content implement [`Scrollable`].
///
/// [`Interactive`]: super::Interactive
/// [`Scrollable`]: super::Scrollable
pub trait Component {
    /// Which focus slot this panel occupies
    fn id(&self) -> FocusablePanel;

    /// Render the component into `area`
    fn render(&self, f: &mut Frame, area: Rect, ctx: &RenderContext);
}
