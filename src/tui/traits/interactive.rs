//! Interactive trait for components that handle keyboard input
//!
//! The App routes key events to the focused panel; the panel decides
//! whether to consume the event or let it bubble up for global handling.

use super::Component;
use crossterm::event::KeyEvent;

/// Result of handling a key event
///
/// Tells the App whether the component consumed the event or whether it
/// should bubble up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Handled {
    /// Event was consumed by the component
    Yes,
    /// Event was not handled, should bubble up
    No,
}

impl Handled {
    pub fn was_handled(self) -> bool {
        self == Self::Yes
    }
}

/// Trait for components that handle keyboard input
///
/// # Event Flow
///
/// ```text
/// KeyEvent
///    │
///    ▼
/// event loop (global handlers: q, Tab)
///    │
///    │ if not handled
///    ▼
/// focused panel (via Interactive)
///    │
///    │ returns Handled::Yes or Handled::No
///    ▼
/// event loop (fallback)
/// ```
pub trait Interactive: Component {
    /// Handle a key event.
    ///
    /// Returns `Handled::Yes` if the component consumed the event,
    /// `Handled::No` if it should bubble up.
    fn handle_key(&mut self, key: KeyEvent) -> Handled;

    /// Hint text for the status bar while this component is focused.
    fn focus_hint(&self) -> Option<&'static str> {
        None
    }
}
