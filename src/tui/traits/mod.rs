//! Component trait system for TUI architecture
//!
//! This module defines the contracts that UI panels implement. Instead of
//! the App knowing how to render/scroll for every panel, components
//! declare their own capabilities through traits.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                         App                                 │
//! │   (workspace host: routes events, owns the panel set)       │
//! └─────────────────────────────────────────────────────────────┘
//!                    │                        │
//!                    ▼                        ▼
//!            ┌──────────────┐         ┌──────────────┐
//!            │   Outline    │         │     Logs     │
//!            │    Panel     │         │    Panel     │
//!            └──────────────┘         └──────────────┘
//!                    │                        │
//!                    └────────────┬───────────┘
//!                                 │
//!                        Implements traits:
//!                 Component, Scrollable, Interactive
//! ```
//!
//! - [`Component`] - render + identity
//! - [`Scrollable`] - shared scroll behavior over [`ScrollState`](crate::tui::scroll::ScrollState)
//! - [`Interactive`] - keyboard handling with bubble-up semantics

mod component;
mod interactive;
mod scrollable;

pub use component::{Component, RenderContext};
pub use interactive::{Handled, Interactive};
pub use scrollable::Scrollable;
