//! User interface components and views.
//!
//! This module contains all TUI rendering logic: the session-builds dialog,
//! the settings editor, the outcome icon mapping, and shared components.

pub mod components;
pub mod icons;
pub mod theme;
mod views;

pub use components::{Notification, NotificationManager};
pub use views::{
    SessionBuildsAction, SessionBuildsError, SessionBuildsView, SettingsAction, SettingsView,
};
