// Components module - the panels of the workspace
//
// - Outline panel: the structure display surface
// - Logs panel: system log entries
// - Status bar: session state at the bottom
//
// Each component is a focused, single-responsibility module.

pub mod logs_panel;
pub mod outline_panel;
pub mod status_bar;
