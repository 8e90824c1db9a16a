//! Event handling for the application.
//!
//! Terminal input, focus changes, and host build events all arrive as one
//! [`Event`] stream consumed synchronously by the application state machine.

mod handler;

pub use handler::EventHandler;

use crossterm::event::KeyEvent;

use crate::builds::BuildEvent;

/// Events consumed by the application.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// Periodic tick when no terminal event arrived.
    Tick,
    /// A key press.
    Key(KeyEvent),
    /// The terminal was resized.
    Resize(u16, u16),
    /// The host window gained or lost focus.
    Focus(bool),
    /// A build event from the host.
    Build(BuildEvent),
}
